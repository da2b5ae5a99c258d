//! Remote lookup trait for billing IDs.

use async_trait::async_trait;

use super::BillingId;
use crate::errors::LookupError;

/// Asks an external service whether a well-formed billing ID is currently
/// valid (its project and activity are open).
///
/// Implementations must be idempotent and side-effect free; callers may
/// issue one lookup per settled keystroke. `Ok(false)` means "known
/// invalid", while `Err` means the answer is unknown.
#[async_trait]
pub trait BillingIdLookup: Send + Sync {
    async fn is_valid(&self, billing_id: &BillingId) -> Result<bool, LookupError>;
}
