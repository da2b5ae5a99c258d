//! Field state, effects and configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::billing_id::BillingId;
use crate::constants::DEFAULT_QUIET_INTERVAL;

/// Visual verdict shown next to the input. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldStatus::Neutral => "neutral",
            FieldStatus::Valid => "valid",
            FieldStatus::Invalid => "invalid",
        };
        f.write_str(label)
    }
}

/// Everything the page renders for the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub status: FieldStatus,
    /// Whether the in-progress indicator is visible.
    pub in_progress: bool,
    /// Transient message from the last failed lookup, cleared on the next keystroke.
    pub lookup_error: Option<String>,
}

/// Identifies one scheduling of the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub(crate) u64);

/// Sequence number attached to a lookup. Strictly increasing per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupTicket(pub(crate) u64);

impl LookupTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Work the host must carry out on behalf of the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEffect {
    /// Call `on_timer_fire(token)` after `delay`, replacing any earlier timer.
    ScheduleTimer { token: TimerToken, delay: Duration },
    /// Drop the timer with this token without firing it.
    CancelTimer(TimerToken),
    /// Ask the lookup service about `billing_id`; report back with `ticket`.
    IssueLookup {
        ticket: LookupTicket,
        billing_id: BillingId,
    },
}

/// What happened to a lookup result handed to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Applied,
    /// The result belonged to a superseded lookup and was ignored.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct FieldValidatorConfig {
    /// How long the input must stay unchanged before it is checked.
    pub quiet_interval: Duration,
}

impl Default for FieldValidatorConfig {
    fn default() -> Self {
        Self {
            quiet_interval: DEFAULT_QUIET_INTERVAL,
        }
    }
}
