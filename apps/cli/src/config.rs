use std::time::Duration;

use billing_forms_client::{RemoteLookupConfig, DEFAULT_BASE_URL};
use billing_forms_core::constants::DEFAULT_QUIET_INTERVAL;
use billing_forms_core::{Error, FieldValidatorConfig};

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    pub base_url: String,
    pub quiet_interval: Duration,
    pub request_timeout: Duration,
    pub session_cookie: Option<String>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let base_url = var("BF_VALIDATE_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let quiet_interval = match var("BF_QUIET_INTERVAL_MS") {
            Some(raw) => parse_millis("BF_QUIET_INTERVAL_MS", &raw)?,
            None => DEFAULT_QUIET_INTERVAL,
        };
        let request_timeout = match var("BF_REQUEST_TIMEOUT_MS") {
            Some(raw) => parse_millis("BF_REQUEST_TIMEOUT_MS", &raw)?,
            None => Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        };
        let session_cookie = var("BF_SESSION_COOKIE").filter(|v| !v.is_empty());
        let log_format = var("BF_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Ok(Self {
            base_url,
            quiet_interval,
            request_timeout,
            session_cookie,
            log_format,
        })
    }

    pub fn lookup_config(&self) -> RemoteLookupConfig {
        RemoteLookupConfig {
            base_url: self.base_url.clone(),
            timeout: self.request_timeout,
            session_cookie: self.session_cookie.clone(),
        }
    }

    pub fn field_config(&self) -> FieldValidatorConfig {
        FieldValidatorConfig {
            quiet_interval: self.quiet_interval,
        }
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, Error> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::InvalidConfigValue(format!("{} must be milliseconds, got '{}'", key, raw)))
}
