//! The form session: single owner of the input state, the last result, and
//! the submission scheduler.
//!
//! The session runs as one event loop. Mutations arrive as [`FormEvent`]s
//! through a [`FormHandle`]; the loop applies them, drives the quiet-period
//! timer, spawns one task per submission, and broadcasts a [`FormSnapshot`]
//! after every step. Responses come back into the same loop as `Settled`
//! events carrying their flight's sequence number, so late or superseded
//! responses are dropped before they can touch the state.

use std::future;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use payrun_core::derivation::{InputField, InputState};
use payrun_core::{EmployeeDetails, PayrunService, ServiceError, TaxResult};

use crate::scheduler::{MIN_LOADING_FLOOR, Settlement, SubmissionScheduler};

/// Shown when a computation fails without a server-authored message.
pub const GENERIC_COMPUTE_FAILURE: &str = "Failed to calculate tax";

/// Shown once when the employee record could not be fetched and the form
/// starts from zero defaults.
pub const EMPLOYEE_FETCH_FAILURE: &str =
    "Failed to fetch employee details. Using default values.";

/// Everything that can happen to a running form.
#[derive(Debug)]
pub enum FormEvent {
    Edit { field: InputField, value: Decimal },
    FbpAmount { index: usize, value: Decimal },
    FbpMax { index: usize },
    AutoCalculate(bool),
    /// Manual submission, bypassing the quiet period.
    Calculate,
    Clear,
    DismissError,
    /// A submission task finished; `seq` identifies its flight.
    Settled {
        seq: u64,
        outcome: Result<TaxResult, ServiceError>,
    },
    Shutdown,
}

/// Read-only view broadcast after every event the session processes.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    pub inputs: InputState,
    pub result: Option<TaxResult>,
    pub error: Option<String>,
    pub loading: bool,
    pub auto_calculate: bool,
}

/// Cheap clonable front door to a running [`FormSession`].
#[derive(Debug, Clone)]
pub struct FormHandle {
    tx: mpsc::UnboundedSender<FormEvent>,
}

impl FormHandle {
    pub fn edit(&self, field: InputField, value: Decimal) {
        self.send(FormEvent::Edit { field, value });
    }

    pub fn set_fbp_amount(&self, index: usize, value: Decimal) {
        self.send(FormEvent::FbpAmount { index, value });
    }

    pub fn set_fbp_to_max(&self, index: usize) {
        self.send(FormEvent::FbpMax { index });
    }

    pub fn set_auto_calculate(&self, enabled: bool) {
        self.send(FormEvent::AutoCalculate(enabled));
    }

    pub fn calculate(&self) {
        self.send(FormEvent::Calculate);
    }

    pub fn clear(&self) {
        self.send(FormEvent::Clear);
    }

    pub fn dismiss_error(&self) {
        self.send(FormEvent::DismissError);
    }

    pub fn shutdown(&self) {
        self.send(FormEvent::Shutdown);
    }

    fn send(&self, event: FormEvent) {
        // A dropped session means the form is gone; nothing to report.
        let _ = self.tx.send(event);
    }
}

/// One interactive estimation form.
pub struct FormSession {
    service: Arc<dyn PayrunService>,
    user_ref: String,
    financial_year: String,
    employee: EmployeeDetails,

    inputs: InputState,
    result: Option<TaxResult>,
    error: Option<String>,
    scheduler: SubmissionScheduler,

    events_tx: mpsc::UnboundedSender<FormEvent>,
    events_rx: mpsc::UnboundedReceiver<FormEvent>,
    snapshot_tx: watch::Sender<FormSnapshot>,
}

impl FormSession {
    /// Build a session. `employee` is the prefill record; pass `None` when
    /// the fetch failed and the form should start from zero defaults with
    /// the standard notice.
    pub fn new(
        service: Arc<dyn PayrunService>,
        user_ref: impl Into<String>,
        financial_year: impl Into<String>,
        employee: Option<EmployeeDetails>,
    ) -> (Self, FormHandle, watch::Receiver<FormSnapshot>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut inputs = InputState::new();
        let mut error = None;
        let employee = match employee {
            Some(record) => {
                inputs.prefill(&record);
                record
            }
            None => {
                error = Some(EMPLOYEE_FETCH_FAILURE.to_string());
                EmployeeDetails::default()
            }
        };

        let scheduler = SubmissionScheduler::new();
        let initial = FormSnapshot {
            inputs: inputs.clone(),
            result: None,
            error: error.clone(),
            loading: false,
            auto_calculate: scheduler.auto_calculate(),
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let session = Self {
            service,
            user_ref: user_ref.into(),
            financial_year: financial_year.into(),
            employee,
            inputs,
            result: None,
            error,
            scheduler,
            events_tx: events_tx.clone(),
            events_rx,
            snapshot_tx,
        };

        (session, FormHandle { tx: events_tx }, snapshot_rx)
    }

    /// Run until [`FormEvent::Shutdown`].
    pub async fn run(mut self) {
        loop {
            let deadline = self.scheduler.deadline();
            let quiet_period_elapsed = async {
                match deadline {
                    Some(at) => time::sleep_until(at).await,
                    None => future::pending().await,
                }
            };

            tokio::select! {
                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        Some(FormEvent::Shutdown) | None => break,
                        Some(event) => self.apply(event),
                    }
                }
                () = quiet_period_elapsed => self.fire(),
            }

            self.publish();
        }
    }

    fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Edit { field, value } => {
                self.inputs.set(field, value);
                self.note_edit();
            }
            FormEvent::FbpAmount { index, value } => {
                self.inputs.set_fbp_amount(index, value);
                self.note_edit();
            }
            FormEvent::FbpMax { index } => {
                self.inputs.set_fbp_to_max(index);
                self.note_edit();
            }
            FormEvent::AutoCalculate(enabled) => self.scheduler.set_auto_calculate(enabled),
            FormEvent::Calculate => {
                let seq = self.scheduler.fire_now();
                self.submit(seq);
            }
            FormEvent::Clear => {
                self.scheduler.clear();
                self.inputs.clear();
                self.result = None;
                self.error = None;
            }
            FormEvent::DismissError => self.error = None,
            FormEvent::Settled { seq, outcome } => self.settle(seq, outcome),
            FormEvent::Shutdown => unreachable!("handled by the run loop"),
        }
    }

    fn note_edit(&mut self) {
        self.scheduler
            .note_edit(Instant::now(), self.inputs.has_earnings());
    }

    fn fire(&mut self) {
        if let Some(seq) = self.scheduler.fire(Instant::now()) {
            self.submit(seq);
        }
    }

    /// Spawn the submission for flight `seq`. The task owns its payload
    /// snapshot; later edits cannot leak into it.
    fn submit(&mut self, seq: u64) {
        self.error = None;
        let request =
            self.inputs
                .build_request(&self.financial_year, &self.user_ref, &self.employee);
        let service = self.service.clone();
        let events = self.events_tx.clone();
        let started = Instant::now();

        debug!(seq, "submitting tax computation");
        tokio::spawn(async move {
            let outcome = service.compute_tax(&request).await;

            // Hold the settled transition until the loading indicator has
            // been visible for the minimum floor.
            let elapsed = started.elapsed();
            if elapsed < MIN_LOADING_FLOOR {
                time::sleep(MIN_LOADING_FLOOR - elapsed).await;
            }

            let _ = events.send(FormEvent::Settled { seq, outcome });
        });
    }

    fn settle(&mut self, seq: u64, outcome: Result<TaxResult, ServiceError>) {
        let settlement = self
            .scheduler
            .settle(seq, Instant::now(), self.inputs.has_earnings());
        if settlement == Settlement::Stale {
            debug!(seq, "discarding stale computation response");
            return;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                warn!(seq, error = %e, "tax computation failed");
                self.error = Some(
                    e.server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| GENERIC_COMPUTE_FAILURE.to_string()),
                );
                // The previous result, if any, stays on screen.
            }
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(FormSnapshot {
            inputs: self.inputs.clone(),
            result: self.result.clone(),
            error: self.error.clone(),
            loading: self.scheduler.is_in_flight(),
            auto_calculate: self.scheduler.auto_calculate(),
        });
    }
}
