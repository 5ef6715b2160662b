//! The submission scheduler's state machine.
//!
//! Pure transitions only — the async driver in [`crate::session`] owns the
//! actual timers and the network call. Keeping the machine synchronous makes
//! every ordering rule testable without a runtime:
//!
//! - a qualifying edit starts (or restarts) the quiet-period timer;
//! - the timer firing opens exactly one flight and hands out a fresh
//!   sequence number;
//! - only the current flight's sequence number may settle — anything else
//!   is a stale response and must be discarded;
//! - edits made while a flight is open do not cancel it, but force a
//!   re-schedule once the flight settles;
//! - clear cancels everything and disarms auto-calculation.

use std::time::Duration;

use tokio::time::Instant;

/// Quiet period between the last qualifying edit and the submission.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Minimum time the loading indicator stays visible once a flight opens.
pub const MIN_LOADING_FLOOR: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Scheduled { deadline: Instant },
    InFlight { seq: u64, dirty: bool },
}

/// What to do with a settling response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The response belongs to the current flight; apply it. `reschedule`
    /// is set when edits arrived while the flight was open.
    Current { reschedule: bool },
    /// A response from an abandoned flight. Drop it unseen.
    Stale,
}

#[derive(Debug)]
pub struct SubmissionScheduler {
    phase: Phase,
    auto_calculate: bool,
    last_seq: u64,
}

impl SubmissionScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            auto_calculate: true,
            last_seq: 0,
        }
    }

    pub fn auto_calculate(&self) -> bool {
        self.auto_calculate
    }

    /// Manual toggle. Disarming also cancels a pending timer.
    pub fn set_auto_calculate(&mut self, enabled: bool) {
        self.auto_calculate = enabled;
        if !enabled && matches!(self.phase, Phase::Scheduled { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// When the pending quiet-period timer elapses, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Scheduled { deadline } => Some(deadline),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, Phase::InFlight { .. })
    }

    /// Record a mutating edit. `eligible` is the form's own gate (total
    /// earnings entered). Restarts the timer when one is already armed;
    /// marks an open flight dirty instead of cancelling it.
    pub fn note_edit(&mut self, now: Instant, eligible: bool) {
        match self.phase {
            Phase::InFlight { seq, .. } => {
                self.phase = Phase::InFlight { seq, dirty: true };
            }
            _ if self.auto_calculate && eligible => {
                self.phase = Phase::Scheduled {
                    deadline: now + DEBOUNCE_QUIET_PERIOD,
                };
            }
            _ => {}
        }
    }

    /// The quiet-period timer fired. Opens a flight and returns its
    /// sequence number, or `None` when the timer was already cancelled or
    /// has not actually elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<u64> {
        match self.phase {
            Phase::Scheduled { deadline } if now >= deadline => Some(self.open_flight()),
            _ => None,
        }
    }

    /// Manual submission: opens a flight immediately, bypassing the quiet
    /// period. Any previous flight's response becomes stale.
    pub fn fire_now(&mut self) -> u64 {
        self.open_flight()
    }

    /// A response for flight `seq` arrived.
    pub fn settle(&mut self, seq: u64, now: Instant, eligible: bool) -> Settlement {
        match self.phase {
            Phase::InFlight { seq: current, dirty } if current == seq => {
                // finally-semantics: re-arm regardless of the outcome.
                self.auto_calculate = true;
                if dirty && eligible {
                    self.phase = Phase::Scheduled {
                        deadline: now + DEBOUNCE_QUIET_PERIOD,
                    };
                    Settlement::Current { reschedule: true }
                } else {
                    self.phase = Phase::Idle;
                    Settlement::Current { reschedule: false }
                }
            }
            _ => Settlement::Stale,
        }
    }

    /// The clear action: cancel any pending timer, forget the open flight,
    /// and disarm auto-calculation so clearing does not immediately
    /// re-trigger a computation.
    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.auto_calculate = false;
    }

    fn open_flight(&mut self) -> u64 {
        self.last_seq += 1;
        self.auto_calculate = false;
        self.phase = Phase::InFlight {
            seq: self.last_seq,
            dirty: false,
        };
        self.last_seq
    }
}

impl Default for SubmissionScheduler {
    fn default() -> Self {
        Self::new()
    }
}
