use std::time::Duration;

use crate::billing_id::BillingId;
use crate::errors::LookupError;
use crate::field::{
    DebouncedFieldValidator, FieldEffect, FieldStatus, FieldValidatorConfig, FieldView,
    LookupTicket, ResponseOutcome, TimerToken,
};

fn scheduled_token(effects: &[FieldEffect]) -> TimerToken {
    effects
        .iter()
        .find_map(|e| match e {
            FieldEffect::ScheduleTimer { token, .. } => Some(*token),
            _ => None,
        })
        .expect("expected a scheduled timer")
}

fn issued_ticket(effects: &[FieldEffect]) -> LookupTicket {
    effects
        .iter()
        .find_map(|e| match e {
            FieldEffect::IssueLookup { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("expected a lookup")
}

/// Types `value` and lets the quiet interval elapse.
fn type_and_settle(validator: &mut DebouncedFieldValidator, value: &str) -> Vec<FieldEffect> {
    let token = scheduled_token(&validator.on_key_change(value));
    validator.on_timer_fire(token)
}

#[test]
fn test_key_change_schedules_quiet_interval() {
    let mut validator = DebouncedFieldValidator::new(FieldValidatorConfig {
        quiet_interval: Duration::from_millis(350),
    });

    let effects = validator.on_key_change("1");
    assert_eq!(
        effects,
        vec![FieldEffect::ScheduleTimer {
            token: TimerToken(1),
            delay: Duration::from_millis(350),
        }]
    );
}

#[test]
fn test_default_quiet_interval_is_200ms() {
    assert_eq!(
        FieldValidatorConfig::default().quiet_interval,
        Duration::from_millis(200)
    );
}

#[test]
fn test_key_change_replaces_pending_timer() {
    let mut validator = DebouncedFieldValidator::default();
    let first = scheduled_token(&validator.on_key_change("1"));

    let effects = validator.on_key_change("12");
    assert_eq!(effects[0], FieldEffect::CancelTimer(first));
    let second = scheduled_token(&effects);
    assert_ne!(first, second);

    // The replaced timer firing late does nothing.
    assert!(validator.on_timer_fire(first).is_empty());
    assert_eq!(validator.pending_timer(), Some(second));
}

#[test]
fn test_empty_value_stays_neutral_without_lookup() {
    let mut validator = DebouncedFieldValidator::default();
    assert!(type_and_settle(&mut validator, "").is_empty());
    assert_eq!(validator.view(), &FieldView::default());

    assert!(type_and_settle(&mut validator, "   ").is_empty());
    assert_eq!(validator.view().status, FieldStatus::Neutral);
}

#[test]
fn test_malformed_value_is_invalid_without_lookup() {
    let mut validator = DebouncedFieldValidator::default();

    for raw in ["12345-001", "abcde-123", "123456-0001"] {
        let effects = type_and_settle(&mut validator, raw);
        assert!(effects.is_empty(), "{raw} should not be looked up");
        assert_eq!(validator.view().status, FieldStatus::Invalid);
        assert!(!validator.view().in_progress);
        assert_eq!(validator.awaiting(), None);
    }
}

#[test]
fn test_well_formed_value_issues_lookup() {
    let mut validator = DebouncedFieldValidator::default();
    let effects = type_and_settle(&mut validator, "123456-001");

    assert_eq!(
        effects,
        vec![FieldEffect::IssueLookup {
            ticket: LookupTicket(1),
            billing_id: BillingId::parse("123456-001").unwrap(),
        }]
    );
    assert!(validator.view().in_progress);
    assert_eq!(validator.view().status, FieldStatus::Neutral);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let mut validator = DebouncedFieldValidator::default();
    let effects = type_and_settle(&mut validator, " 123456-001 ");
    assert_eq!(issued_ticket(&effects), LookupTicket(1));
}

#[test]
fn test_response_sets_status_and_hides_spinner() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-001"));

    assert_eq!(
        validator.on_validation_response(ticket, true),
        ResponseOutcome::Applied
    );
    assert_eq!(validator.view().status, FieldStatus::Valid);
    assert!(!validator.view().in_progress);

    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-002"));
    validator.on_validation_response(ticket, false);
    assert_eq!(validator.view().status, FieldStatus::Invalid);
}

#[test]
fn test_key_change_clears_verdict_immediately() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-001"));
    validator.on_validation_response(ticket, true);

    validator.on_key_change("123456-00");
    assert_eq!(validator.view(), &FieldView::default());
}

#[test]
fn test_late_response_for_older_lookup_never_overwrites_newer() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket_a = issued_ticket(&type_and_settle(&mut validator, "111111-111"));
    let ticket_b = issued_ticket(&type_and_settle(&mut validator, "222222-222"));
    assert!(ticket_a < ticket_b);

    // B answers first.
    assert_eq!(
        validator.on_validation_response(ticket_b, false),
        ResponseOutcome::Applied
    );
    // A straggles in afterwards.
    assert_eq!(
        validator.on_validation_response(ticket_a, true),
        ResponseOutcome::Discarded
    );
    assert_eq!(validator.view().status, FieldStatus::Invalid);
    assert!(!validator.view().in_progress);
}

#[test]
fn test_response_after_keystroke_is_discarded() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-001"));

    validator.on_key_change("123456-0012");
    assert_eq!(
        validator.on_validation_response(ticket, true),
        ResponseOutcome::Discarded
    );
    assert_eq!(validator.view().status, FieldStatus::Neutral);
}

#[test]
fn test_duplicate_response_is_discarded() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-001"));

    validator.on_validation_response(ticket, true);
    assert_eq!(
        validator.on_validation_response(ticket, false),
        ResponseOutcome::Discarded
    );
    assert_eq!(validator.view().status, FieldStatus::Valid);
}

#[test]
fn test_failure_degrades_to_neutral_with_error() {
    let mut validator = DebouncedFieldValidator::default();
    let ticket = issued_ticket(&type_and_settle(&mut validator, "123456-001"));

    let outcome = validator.on_validation_failure(
        ticket,
        &LookupError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        },
    );
    assert_eq!(outcome, ResponseOutcome::Applied);
    assert_eq!(validator.view().status, FieldStatus::Neutral);
    assert!(!validator.view().in_progress);
    assert_eq!(
        validator.view().lookup_error.as_deref(),
        Some("Unexpected status 502: Bad Gateway")
    );

    // The next keystroke clears the affordance.
    validator.on_key_change("123456-00");
    assert_eq!(validator.view().lookup_error, None);
}

#[test]
fn test_stale_failure_is_discarded() {
    let mut validator = DebouncedFieldValidator::default();
    let stale = issued_ticket(&type_and_settle(&mut validator, "111111-111"));
    let current = issued_ticket(&type_and_settle(&mut validator, "222222-222"));

    assert_eq!(
        validator.on_validation_failure(stale, &LookupError::Timeout),
        ResponseOutcome::Discarded
    );
    assert!(validator.view().in_progress);
    assert_eq!(validator.awaiting(), Some(current));
}

#[test]
fn test_flush_checks_pending_value_now() {
    let mut validator = DebouncedFieldValidator::default();
    let token = scheduled_token(&validator.on_key_change("123456-001"));

    let effects = validator.flush();
    assert_eq!(effects[0], FieldEffect::CancelTimer(token));
    assert_eq!(issued_ticket(&effects), LookupTicket(1));
    assert_eq!(validator.pending_timer(), None);

    // The cancelled timer can no longer fire, and a second flush is a no-op.
    assert!(validator.on_timer_fire(token).is_empty());
    assert!(validator.flush().is_empty());
}

#[test]
fn test_tickets_strictly_increase() {
    let mut validator = DebouncedFieldValidator::default();
    let mut last = None;
    for raw in ["100000-000", "bad", "200000-000", "", "300000-000"] {
        let effects = type_and_settle(&mut validator, raw);
        if let Some(FieldEffect::IssueLookup { ticket, .. }) = effects.first() {
            if let Some(previous) = last {
                assert!(*ticket > previous);
            }
            last = Some(*ticket);
        }
    }
    assert_eq!(last.map(|t| t.sequence()), Some(3));
}
