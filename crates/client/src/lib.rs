//! HTTP client for the billing ID validation endpoint.
//!
//! Implements [`billing_forms_core::BillingIdLookup`] over
//! `GET {base_url}/billing/{billing_id}/is_valid/`, which answers with
//! `{"is_valid": bool}`.

mod client;

pub use client::{RemoteBillingIdLookup, RemoteLookupConfig, DEFAULT_BASE_URL};
