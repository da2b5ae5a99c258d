use std::time::Duration;

use async_trait::async_trait;
use billing_forms_core::errors::{Error, LookupError, Result};
use billing_forms_core::{BillingId, BillingIdLookup};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Client;
use serde::Deserialize;

/// Default timeout for lookup requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest error body kept in a [`LookupError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Default base URL of the allocation portal.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IsValidResponse {
    is_valid: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RemoteLookupConfig {
    /// Portal root, e.g. `https://portal.example.org`.
    pub base_url: String,
    pub timeout: Duration,
    /// Value of the `sessionid` cookie of a logged-in user, if the endpoint
    /// requires authentication.
    pub session_cookie: Option<String>,
}

impl Default for RemoteLookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_cookie: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RemoteBillingIdLookup
// ─────────────────────────────────────────────────────────────────────────────

/// Looks billing IDs up against the portal's validation endpoint.
pub struct RemoteBillingIdLookup {
    client: Client,
    base_url: String,
}

impl RemoteBillingIdLookup {
    pub fn new(config: RemoteLookupConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(session) = config.session_cookie.as_deref() {
            let value = HeaderValue::from_str(&format!("sessionid={}", session)).map_err(|e| {
                Error::InvalidConfigValue(format!("Session cookie is not a valid header: {}", e))
            })?;
            headers.insert(COOKIE, value);
        }

        // A login redirect must surface as an error, not as the login page.
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// URL queried for `billing_id`.
    pub fn endpoint_url(&self, billing_id: &BillingId) -> String {
        format!(
            "{}/billing/{}/is_valid/",
            self.base_url,
            urlencoding::encode(billing_id.as_str())
        )
    }
}

#[async_trait]
impl BillingIdLookup for RemoteBillingIdLookup {
    async fn is_valid(&self, billing_id: &BillingId) -> std::result::Result<bool, LookupError> {
        let url = self.endpoint_url(billing_id);
        debug!("Billing ID lookup: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.text().await.map_err(map_request_error)?;
        let is_valid = parse_is_valid(&body)?;
        debug!("Billing ID {} is_valid={}", billing_id, is_valid);
        Ok(is_valid)
    }
}

fn map_request_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Transport(e.to_string())
    }
}

fn parse_is_valid(body: &str) -> std::result::Result<bool, LookupError> {
    let response: IsValidResponse = serde_json::from_str(body)?;
    Ok(response.is_valid)
}

fn truncate_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}
