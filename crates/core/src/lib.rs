//! Billing Forms Core - billing ID validation, bulk updates and page guards.
//!
//! This crate holds the interactive logic behind the billing ID management
//! pages. It is transport-agnostic: remote lookups go through the
//! [`BillingIdLookup`] trait, which the `client` crate implements over HTTP.
//!
//! # Modules
//!
//! - [`billing_id`] - identifier format, lookup trait and batch validation
//! - [`field`] - debounced validate-as-you-type for a single input
//! - [`bulk`] - "find and replace" / "set to" over update form rows
//! - [`navigation`] - confirm-before-leaving guard

pub mod billing_id;
pub mod bulk;
pub mod constants;
pub mod errors;
pub mod field;
pub mod navigation;

pub use billing_id::{
    is_billing_id_well_formed, summarize, BillingId, BillingIdLookup, BillingIdService, Verdict,
};
pub use bulk::{apply_bulk_action, ActionKind, BulkAction, UpdateRow};
pub use field::{
    spawn_field_validator, DebouncedFieldValidator, FieldStatus, FieldValidatorConfig,
    FieldValidatorHandle, FieldView,
};
pub use navigation::{Confirm, NavigationDecision, NavigationEvent, NavigationGuard};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
