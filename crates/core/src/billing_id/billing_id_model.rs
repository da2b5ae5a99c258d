//! Billing ID parsing and the structural format check.
//!
//! A billing ID is a six-digit project ID and a three-digit activity ID
//! joined by a hyphen:
//!
//! ```
//! use billing_forms_core::billing_id::{is_billing_id_well_formed, BillingId};
//!
//! assert!(is_billing_id_well_formed("123456-001"));
//! assert!(!is_billing_id_well_formed("12345-001"));
//!
//! let id = BillingId::parse("123456-789").unwrap();
//! assert_eq!(id.project_id(), "123456");
//! assert_eq!(id.activity_id(), "789");
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{BILLING_ID_PATTERN, BILLING_ID_SEPARATOR};
use crate::errors::ValidationError;

lazy_static! {
    /// Format: ^[0-9]{6}-[0-9]{3}$ (project-activity)
    static ref BILLING_ID_REGEX: Regex =
        Regex::new(BILLING_ID_PATTERN).expect("Invalid regex pattern");
}

/// Returns whether the string has the structural shape of a billing ID.
///
/// This is a purely local check; it says nothing about whether the
/// project/activity pair is currently open.
pub fn is_billing_id_well_formed(raw: &str) -> bool {
    BILLING_ID_REGEX.is_match(raw)
}

/// A well-formed billing ID.
///
/// Can only be built through [`BillingId::parse`], so holding one means the
/// structural check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BillingId(String);

impl BillingId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if is_billing_id_well_formed(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::MalformedBillingId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The six-digit project part.
    pub fn project_id(&self) -> &str {
        self.split().0
    }

    /// The three-digit activity part.
    pub fn activity_id(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // The pattern guarantees exactly one separator.
        self.0
            .split_once(BILLING_ID_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for BillingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BillingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        BillingId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Outcome of validating a single raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Failed the structural check; no lookup was made.
    Malformed,
    /// The endpoint confirmed the ID.
    Valid,
    /// The endpoint rejected the ID.
    Invalid,
    /// The lookup failed, so validity is not known.
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Malformed => "Malformed",
            Verdict::Valid => "Valid",
            Verdict::Invalid => "Invalid",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
