use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, warn};

use super::{BillingId, BillingIdLookup, Verdict};
use crate::constants::BATCH_LOOKUP_CONCURRENCY;

/// Validates billing IDs one at a time or in batches.
///
/// Malformed input is rejected locally and never reaches the lookup.
pub struct BillingIdService {
    lookup: Arc<dyn BillingIdLookup>,
}

impl BillingIdService {
    pub fn new(lookup: Arc<dyn BillingIdLookup>) -> Self {
        Self { lookup }
    }

    /// Validates a single raw value.
    pub async fn validate(&self, raw: &str) -> Verdict {
        let billing_id = match BillingId::parse(raw) {
            Ok(id) => id,
            Err(_) => {
                debug!("Skipping lookup for malformed billing ID '{}'", raw);
                return Verdict::Malformed;
            }
        };

        match self.lookup.is_valid(&billing_id).await {
            Ok(true) => Verdict::Valid,
            Ok(false) => Verdict::Invalid,
            Err(e) => {
                warn!("Failed to determine if billing ID {} is valid: {}", billing_id, e);
                Verdict::Unknown
            }
        }
    }

    /// Validates one billing ID per line.
    ///
    /// Lines are trimmed and blank lines skipped. Results are returned in
    /// input order even though lookups run concurrently.
    pub async fn validate_many(&self, text: &str) -> Vec<(String, Verdict)> {
        let candidates: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        debug!("Validating {} billing ID(s)", candidates.len());

        stream::iter(candidates)
            .map(|raw| async move {
                let verdict = self.validate(&raw).await;
                (raw, verdict)
            })
            .buffered(BATCH_LOOKUP_CONCURRENCY)
            .collect()
            .await
    }
}

/// Renders batch results as `"<id>: <Verdict>"` items joined by `", "`.
pub fn summarize(results: &[(String, Verdict)]) -> String {
    results
        .iter()
        .map(|(raw, verdict)| format!("{}: {}", raw, verdict))
        .collect::<Vec<_>>()
        .join(", ")
}
