//! Billing ID module - format checks, remote lookup trait and batch validation.

mod billing_id_model;
mod billing_id_service;
mod billing_id_traits;


pub use billing_id_model::{is_billing_id_well_formed, BillingId, Verdict};
pub use billing_id_service::{summarize, BillingIdService};
pub use billing_id_traits::BillingIdLookup;
