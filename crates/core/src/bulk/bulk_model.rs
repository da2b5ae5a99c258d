//! Domain models for the bulk update form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::UPDATE_FORMSET_PREFIX;
use crate::errors::Error;

/// One row of the update-billing-IDs table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRow {
    /// Whether the row's checkbox is ticked.
    #[serde(default)]
    pub selected: bool,
    /// Billing ID the row currently uses (read-only column).
    pub current_billing_id: String,
    /// Value of the row's editable "updated billing ID" field.
    #[serde(default)]
    pub updated_billing_id: String,
}

impl UpdateRow {
    pub fn new(current_billing_id: impl Into<String>) -> Self {
        Self {
            selected: false,
            current_billing_id: current_billing_id.into(),
            updated_billing_id: String::new(),
        }
    }
}

/// Which action the form's selector is set to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    FindAndReplace,
    SetTo,
}

impl ActionKind {
    /// The "find" input is only shown for find-and-replace.
    pub fn shows_find_input(&self) -> bool {
        matches!(self, ActionKind::FindAndReplace)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::FindAndReplace => "find_and_replace",
            ActionKind::SetTo => "set_to",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "find_and_replace" => Ok(ActionKind::FindAndReplace),
            "set_to" => Ok(ActionKind::SetTo),
            other => Err(Error::Unexpected(format!("Unknown bulk action '{}'", other))),
        }
    }
}

/// A fully specified bulk action. Exactly one variant is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BulkAction {
    /// Rows whose current billing ID equals `find` get `replace`.
    FindAndReplace { find: String, replace: String },
    /// Rows get `value` unconditionally.
    SetTo { value: String },
}

impl BulkAction {
    /// Builds the action from the form's selector, "find" input and
    /// "updated" input. The find value is ignored for "set to".
    pub fn from_form(kind: ActionKind, find: &str, updated: &str) -> Self {
        match kind {
            ActionKind::FindAndReplace => BulkAction::FindAndReplace {
                find: find.to_string(),
                replace: updated.to_string(),
            },
            ActionKind::SetTo => BulkAction::SetTo {
                value: updated.to_string(),
            },
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            BulkAction::FindAndReplace { .. } => ActionKind::FindAndReplace,
            BulkAction::SetTo { .. } => ActionKind::SetTo,
        }
    }
}

/// Name of the editable field of row `index` in the posted formset,
/// e.g. `update_ids_form-3-updated_billing_id`.
pub fn formset_field_name(index: usize) -> String {
    format!("{}-{}-updated_billing_id", UPDATE_FORMSET_PREFIX, index)
}
