use log::debug;

use super::{
    FieldEffect, FieldStatus, FieldValidatorConfig, FieldView, LookupTicket, ResponseOutcome,
    TimerToken,
};
use crate::billing_id::BillingId;
use crate::errors::LookupError;

/// Debounced validator for a single billing ID input.
///
/// Lifecycle of one check:
///
/// 1. [`on_key_change`](Self::on_key_change) resets the view and (re)schedules the timer.
/// 2. [`on_timer_fire`](Self::on_timer_fire) runs the structural check and, if it
///    passes, issues a lookup tagged with a fresh [`LookupTicket`].
/// 3. [`on_validation_response`](Self::on_validation_response) or
///    [`on_validation_failure`](Self::on_validation_failure) applies the result,
///    but only for the ticket still being awaited.
///
/// Any keystroke supersedes the awaited lookup, so a result for an older
/// value can never overwrite the view of a newer one.
#[derive(Debug)]
pub struct DebouncedFieldValidator {
    config: FieldValidatorConfig,
    value: String,
    view: FieldView,
    timer: Option<TimerToken>,
    timers_scheduled: u64,
    lookups_issued: u64,
    awaiting: Option<LookupTicket>,
}

impl DebouncedFieldValidator {
    pub fn new(config: FieldValidatorConfig) -> Self {
        Self {
            config,
            value: String::new(),
            view: FieldView::default(),
            timer: None,
            timers_scheduled: 0,
            lookups_issued: 0,
            awaiting: None,
        }
    }

    pub fn view(&self) -> &FieldView {
        &self.view
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The lookup whose result would currently be applied, if any.
    pub fn awaiting(&self) -> Option<LookupTicket> {
        self.awaiting
    }

    /// The live debounce timer, if any.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer
    }

    /// Records the new input value and restarts the quiet interval.
    ///
    /// The view is reset right away so a verdict for an older value is
    /// never left on screen.
    pub fn on_key_change(&mut self, value: impl Into<String>) -> Vec<FieldEffect> {
        self.value = value.into();
        self.view = FieldView::default();

        if let Some(ticket) = self.awaiting.take() {
            debug!("Keystroke superseded lookup #{}", ticket.0);
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.timer.take() {
            effects.push(FieldEffect::CancelTimer(previous));
        }

        self.timers_scheduled += 1;
        let token = TimerToken(self.timers_scheduled);
        self.timer = Some(token);
        effects.push(FieldEffect::ScheduleTimer {
            token,
            delay: self.config.quiet_interval,
        });
        effects
    }

    /// Runs the check once the quiet interval elapsed without keystrokes.
    ///
    /// Fires for tokens that were cancelled or replaced are ignored.
    pub fn on_timer_fire(&mut self, token: TimerToken) -> Vec<FieldEffect> {
        if self.timer != Some(token) {
            debug!("Ignoring stale debounce timer #{}", token.0);
            return Vec::new();
        }
        self.timer = None;
        self.check_value()
    }

    /// Checks immediately if a timer is pending (blur or submit).
    pub fn flush(&mut self) -> Vec<FieldEffect> {
        match self.timer.take() {
            Some(token) => {
                let mut effects = vec![FieldEffect::CancelTimer(token)];
                effects.extend(self.check_value());
                effects
            }
            None => Vec::new(),
        }
    }

    pub fn on_validation_response(
        &mut self,
        ticket: LookupTicket,
        is_valid: bool,
    ) -> ResponseOutcome {
        if !self.take_if_awaited(ticket) {
            return ResponseOutcome::Discarded;
        }

        self.view.in_progress = false;
        self.view.status = if is_valid {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        };
        ResponseOutcome::Applied
    }

    /// A failed lookup leaves the verdict unknown: neutral status, spinner
    /// hidden, and the error kept for display until the next keystroke.
    pub fn on_validation_failure(
        &mut self,
        ticket: LookupTicket,
        error: &LookupError,
    ) -> ResponseOutcome {
        if !self.take_if_awaited(ticket) {
            return ResponseOutcome::Discarded;
        }

        self.view.in_progress = false;
        self.view.status = FieldStatus::Neutral;
        self.view.lookup_error = Some(error.to_string());
        ResponseOutcome::Applied
    }

    fn take_if_awaited(&mut self, ticket: LookupTicket) -> bool {
        if self.awaiting == Some(ticket) {
            self.awaiting = None;
            true
        } else {
            debug!(
                "Discarding stale response for lookup #{} (awaiting {:?})",
                ticket.0,
                self.awaiting.map(|t| t.0)
            );
            false
        }
    }

    fn check_value(&mut self) -> Vec<FieldEffect> {
        let candidate = self.value.trim();
        if candidate.is_empty() {
            self.view.status = FieldStatus::Neutral;
            return Vec::new();
        }

        let billing_id = match BillingId::parse(candidate) {
            Ok(id) => id,
            Err(_) => {
                self.view.status = FieldStatus::Invalid;
                return Vec::new();
            }
        };

        self.lookups_issued += 1;
        let ticket = LookupTicket(self.lookups_issued);
        self.awaiting = Some(ticket);
        self.view.in_progress = true;
        debug!("Issuing lookup #{} for {}", ticket.0, billing_id);

        vec![FieldEffect::IssueLookup { ticket, billing_id }]
    }
}

impl Default for DebouncedFieldValidator {
    fn default() -> Self {
        Self::new(FieldValidatorConfig::default())
    }
}
