//! Field module - debounced validate-as-you-type for a billing ID input.
//!
//! [`DebouncedFieldValidator`] is a synchronous state machine: each handler
//! takes an event, updates the field state and returns the [`FieldEffect`]s
//! the host must perform (schedule a timer, issue a lookup). The
//! [`spawn_field_validator`] driver is such a host on top of tokio.

mod field_model;
mod field_runtime;
mod field_validator;

#[cfg(test)]
mod field_validator_tests;

pub use field_model::{
    FieldEffect, FieldStatus, FieldValidatorConfig, FieldView, LookupTicket, ResponseOutcome,
    TimerToken,
};
pub use field_runtime::{spawn_field_validator, FieldValidatorHandle};
pub use field_validator::DebouncedFieldValidator;
