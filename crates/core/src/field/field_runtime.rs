//! Tokio host for [`DebouncedFieldValidator`].
//!
//! A single task owns the validator. It waits on three sources at once:
//! input events from the handle, the debounce deadline, and completed
//! lookups. Lookups run in their own tasks and are never aborted; results
//! for superseded tickets are simply discarded by the validator.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{
    DebouncedFieldValidator, FieldEffect, FieldValidatorConfig, FieldView, LookupTicket,
    ResponseOutcome, TimerToken,
};
use crate::billing_id::BillingIdLookup;
use crate::errors::{Error, LookupError, Result};

#[derive(Debug)]
enum FieldInput {
    KeyChange(String),
    Blur,
    Settle(oneshot::Sender<FieldView>),
}

type LookupResult = (LookupTicket, std::result::Result<bool, LookupError>);

/// Handle to a running field validator task.
///
/// Dropping the handle stops the task once it next polls its input.
pub struct FieldValidatorHandle {
    input: mpsc::UnboundedSender<FieldInput>,
    view: watch::Receiver<FieldView>,
    task: JoinHandle<()>,
}

impl FieldValidatorHandle {
    /// Reports the field's new value after a keystroke.
    pub fn key_change(&self, value: impl Into<String>) -> Result<()> {
        self.send(FieldInput::KeyChange(value.into()))
    }

    /// Reports that the field lost focus (or the form is being submitted).
    pub fn blur(&self) -> Result<()> {
        self.send(FieldInput::Blur)
    }

    /// Waits until no debounce timer is pending and no lookup is awaited,
    /// then returns the view at that point.
    pub async fn settled(&self) -> Result<FieldView> {
        let (tx, rx) = oneshot::channel();
        self.send(FieldInput::Settle(tx))?;
        rx.await.map_err(|_| stopped())
    }

    /// Current rendering of the field.
    pub fn view(&self) -> FieldView {
        self.view.borrow().clone()
    }

    /// Receiver that is notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<FieldView> {
        self.view.clone()
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        let Self { input, task, .. } = self;
        drop(input);
        if let Err(e) = task.await {
            warn!("Field validator task ended abnormally: {}", e);
        }
    }

    fn send(&self, input: FieldInput) -> Result<()> {
        self.input
            .send(input)
            .map_err(|_| stopped())
    }
}

fn stopped() -> Error {
    Error::Unexpected("Field validator task has stopped".to_string())
}

/// Spawns a validator task for one field.
///
/// Must be called from within a tokio runtime.
pub fn spawn_field_validator(
    lookup: Arc<dyn BillingIdLookup>,
    config: FieldValidatorConfig,
) -> FieldValidatorHandle {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(FieldView::default());
    let validator = DebouncedFieldValidator::new(config);

    let task = tokio::spawn(run_field_validator(validator, lookup, input_rx, view_tx));

    FieldValidatorHandle {
        input: input_tx,
        view: view_rx,
        task,
    }
}

async fn run_field_validator(
    mut validator: DebouncedFieldValidator,
    lookup: Arc<dyn BillingIdLookup>,
    mut inputs: mpsc::UnboundedReceiver<FieldInput>,
    view_tx: watch::Sender<FieldView>,
) {
    debug!("Field validator task started");

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<LookupResult>();
    let mut deadline: Option<(TimerToken, Instant)> = None;
    let mut settle_waiters: Vec<oneshot::Sender<FieldView>> = Vec::new();

    loop {
        let armed = deadline;

        let effects = tokio::select! {
            input = inputs.recv() => match input {
                Some(FieldInput::KeyChange(value)) => validator.on_key_change(value),
                Some(FieldInput::Blur) => validator.flush(),
                Some(FieldInput::Settle(waiter)) => {
                    settle_waiters.push(waiter);
                    Vec::new()
                }
                None => {
                    debug!("Field validator input closed, shutting down");
                    return;
                }
            },
            _ = sleep_until_armed(armed) => {
                deadline = None;
                match armed {
                    Some((token, _)) => validator.on_timer_fire(token),
                    None => Vec::new(),
                }
            },
            Some((ticket, result)) = done_rx.recv() => {
                let outcome = match result {
                    Ok(is_valid) => validator.on_validation_response(ticket, is_valid),
                    Err(e) => {
                        warn!("Billing ID lookup #{} failed: {}", ticket.sequence(), e);
                        validator.on_validation_failure(ticket, &e)
                    }
                };
                if outcome == ResponseOutcome::Discarded {
                    debug!("Lookup #{} arrived after being superseded", ticket.sequence());
                }
                Vec::new()
            },
        };

        for effect in effects {
            match effect {
                FieldEffect::ScheduleTimer { token, delay } => {
                    deadline = Some((token, Instant::now() + delay));
                }
                FieldEffect::CancelTimer(token) => {
                    if matches!(deadline, Some((armed_token, _)) if armed_token == token) {
                        deadline = None;
                    }
                }
                FieldEffect::IssueLookup { ticket, billing_id } => {
                    let lookup = Arc::clone(&lookup);
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let result = lookup.is_valid(&billing_id).await;
                        // The driver may already be gone.
                        let _ = done_tx.send((ticket, result));
                    });
                }
            }
        }

        view_tx.send_if_modified(|view| {
            if *view != *validator.view() {
                *view = validator.view().clone();
                true
            } else {
                false
            }
        });

        let idle = validator.pending_timer().is_none() && validator.awaiting().is_none();
        if idle && !settle_waiters.is_empty() {
            for waiter in settle_waiters.drain(..) {
                let _ = waiter.send(validator.view().clone());
            }
        }
    }
}

async fn sleep_until_armed(armed: Option<(TimerToken, Instant)>) {
    match armed {
        Some((_, at)) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
