//! One-way notifications emitted by a running session.

use std::fmt;
use std::time::Duration;

use crate::corpus::Sentiment;
use crate::ml::{ClassifierError, TrainStage, TrainSummary};

/// Phase of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Collecting,
    Training,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Collecting => "collecting",
            Phase::Training => "training",
        };
        f.write_str(name)
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The classifier was retrained on seed plus additional examples.
    Trained(TrainSummary),
    /// Nothing was collected, so no retraining happened.
    Skipped,
    /// The caller abandoned the session.
    Aborted,
    /// Retraining was attempted and failed; the previous model is kept.
    Failed(ClassifierError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseStarted { phase: Phase, duration: Duration },
    /// Remaining time in the current phase, sent by the countdown notifier.
    Countdown { phase: Phase, remaining: Duration },
    Accepted { label: Sentiment, collected: usize },
    Rejected { label: String },
    StageStarted {
        stage: TrainStage,
        index: usize,
        total: usize,
    },
    Finished(SessionOutcome),
}

/// Receiver of [`SessionEvent`]s. Called from the session's own thread and
/// from the countdown thread, so implementations must be thread-safe and
/// should return quickly.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn on_event(&self, event: &SessionEvent) {
        self(event)
    }
}
