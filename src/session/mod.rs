//! Timed collect-then-retrain session.
//!
//! A session collects labeled examples for a fixed window, then announces the
//! training stages over a second window and retrains the shared classifier at
//! its end. The caller drives it with [`Session::submit`] and
//! [`Session::tick`] (or the `*_at` variants for an explicit clock); a
//! background countdown only reports remaining time.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::corpus::{CorpusStore, LabelError, Sentiment};
use crate::ml::{ClassifierError, SentimentClassifier, TrainStage};

mod countdown;
mod events;

use countdown::Countdown;
pub use events::{Phase, SessionEvent, SessionObserver, SessionOutcome};

#[cfg(test)]
mod tests;

/// Durations of the two session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub collect: Duration,
    pub train: Duration,
    /// Countdown event period; `None` runs without a countdown thread.
    pub countdown_interval: Option<Duration>,
}

impl SessionConfig {
    /// Whole-second phase lengths; zero is raised to one second.
    pub fn from_seconds(collect_seconds: u64, train_seconds: u64) -> Self {
        Self {
            collect: Duration::from_secs(collect_seconds.max(1)),
            train: Duration::from_secs(train_seconds.max(1)),
            countdown_interval: Some(Duration::from_secs(1)),
        }
    }

    pub fn with_countdown_interval(mut self, interval: Option<Duration>) -> Self {
        self.countdown_interval = interval;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_seconds(30, 30)
    }
}

/// Snapshot of where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub deadline: Option<Instant>,
    pub collected_count: usize,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),
    #[error("Session is not collecting (current phase: {phase})")]
    NotCollecting { phase: Phase },
    #[error("Collection window has closed")]
    DeadlinePassed,
    #[error("Retraining failed: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("Failed to start countdown thread: {0}")]
    CountdownSpawn(std::io::Error),
}

struct TrainingWindow {
    started: Instant,
    announced: usize,
}

/// A running session borrowing the corpus it feeds and the classifier it
/// retrains. The exclusive corpus borrow keeps anything else from clearing
/// or restoring the corpus mid-session.
pub struct Session<'a> {
    config: SessionConfig,
    corpus: &'a mut CorpusStore,
    classifier: &'a SentimentClassifier,
    observer: Arc<dyn SessionObserver>,
    state: SessionState,
    training: Option<TrainingWindow>,
    countdown: Option<Countdown>,
    outcome: Option<SessionOutcome>,
}

impl<'a> Session<'a> {
    /// Start collecting now.
    pub fn start(
        config: SessionConfig,
        corpus: &'a mut CorpusStore,
        classifier: &'a SentimentClassifier,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        Self::start_at(Instant::now(), config, corpus, classifier, observer)
    }

    pub fn start_at(
        now: Instant,
        config: SessionConfig,
        corpus: &'a mut CorpusStore,
        classifier: &'a SentimentClassifier,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            config,
            corpus,
            classifier,
            observer,
            state: SessionState {
                phase: Phase::Idle,
                deadline: None,
                collected_count: 0,
            },
            training: None,
            countdown: None,
            outcome: None,
        };
        session.enter_phase(Phase::Collecting, now, config.collect)?;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// How the session ended, once it is back to [`Phase::Idle`].
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    /// Time left in the current phase; zero when idle or overdue.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.state
            .deadline
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn submit(&mut self, text: &str, label: &str) -> Result<Sentiment, SessionError> {
        self.submit_at(Instant::now(), text, label)
    }

    /// Add one example to the corpus.
    ///
    /// An invalid label is reported and the phase continues. A submission at
    /// or after the deadline is rejected and closes the phase.
    pub fn submit_at(
        &mut self,
        now: Instant,
        text: &str,
        label: &str,
    ) -> Result<Sentiment, SessionError> {
        if self.state.phase != Phase::Collecting {
            return Err(SessionError::NotCollecting {
                phase: self.state.phase,
            });
        }
        if self.deadline_reached(now) {
            self.close_collection(now)?;
            return Err(SessionError::DeadlinePassed);
        }
        let sentiment = match self.corpus.add(text, label) {
            Ok(sentiment) => sentiment,
            Err(err) => {
                tracing::debug!(label, "Rejected submission");
                self.observer.on_event(&SessionEvent::Rejected {
                    label: label.to_string(),
                });
                return Err(err.into());
            }
        };
        self.state.collected_count += 1;
        self.observer.on_event(&SessionEvent::Accepted {
            label: sentiment,
            collected: self.state.collected_count,
        });
        Ok(sentiment)
    }

    pub fn tick(&mut self) -> Result<Phase, SessionError> {
        self.tick_at(Instant::now())
    }

    /// Advance time-driven transitions and return the resulting phase.
    pub fn tick_at(&mut self, now: Instant) -> Result<Phase, SessionError> {
        match self.state.phase {
            Phase::Collecting if self.deadline_reached(now) => self.close_collection(now)?,
            Phase::Training => self.advance_training(now)?,
            Phase::Collecting | Phase::Idle => {}
        }
        Ok(self.state.phase)
    }

    pub fn cancel(&mut self) -> Result<Phase, SessionError> {
        self.cancel_at(Instant::now())
    }

    /// Close collection early. Training still follows if anything was
    /// collected. Has no effect outside the collecting phase.
    pub fn cancel_at(&mut self, now: Instant) -> Result<Phase, SessionError> {
        if self.state.phase == Phase::Collecting {
            tracing::info!("Collection cancelled");
            self.close_collection(now)?;
        }
        Ok(self.state.phase)
    }

    /// End the session without training. Accepted examples stay in the corpus.
    pub fn abort(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        tracing::info!(phase = %self.state.phase, "Session aborted");
        self.finish(SessionOutcome::Aborted);
    }

    /// Block through the rest of the training window, announcing stages as
    /// they come due, then retrain. Returns the outcome once idle, or `None`
    /// while still collecting.
    pub fn run_training(&mut self) -> Result<Option<SessionOutcome>, SessionError> {
        while self.state.phase == Phase::Training {
            let now = Instant::now();
            self.advance_training(now)?;
            if let Some(wake) = self.next_training_wake() {
                thread::sleep(wake.saturating_duration_since(Instant::now()));
            }
        }
        Ok(self.outcome.clone())
    }

    fn deadline_reached(&self, now: Instant) -> bool {
        self.state.deadline.is_some_and(|deadline| now >= deadline)
    }

    fn enter_phase(
        &mut self,
        phase: Phase,
        now: Instant,
        duration: Duration,
    ) -> Result<(), SessionError> {
        let deadline = now + duration;
        self.state.phase = phase;
        self.state.deadline = Some(deadline);
        tracing::info!(%phase, seconds = duration.as_secs_f64(), "Session phase started");
        self.observer
            .on_event(&SessionEvent::PhaseStarted { phase, duration });
        if let Some(interval) = self.config.countdown_interval {
            let countdown =
                Countdown::spawn(phase, deadline, interval, Arc::clone(&self.observer))
                    .map_err(SessionError::CountdownSpawn)?;
            self.countdown = Some(countdown);
        }
        Ok(())
    }

    fn stop_countdown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.stop();
        }
    }

    fn close_collection(&mut self, now: Instant) -> Result<(), SessionError> {
        self.stop_countdown();
        if self.state.collected_count == 0 {
            tracing::info!("Nothing collected; skipping retraining");
            self.finish(SessionOutcome::Skipped);
            return Ok(());
        }
        self.training = Some(TrainingWindow {
            started: now,
            announced: 0,
        });
        self.enter_phase(Phase::Training, now, self.config.train)?;
        self.advance_training(now)
    }

    /// Length of one stage's share of the training window.
    fn stage_slice(&self) -> Duration {
        self.config.train / TrainStage::ALL.len() as u32
    }

    fn stages_due(&self, started: Instant, now: Instant) -> usize {
        let total = TrainStage::ALL.len();
        let slice = self.stage_slice();
        if slice.is_zero() {
            return total;
        }
        let elapsed = now.saturating_duration_since(started);
        let due = (elapsed.as_nanos() / slice.as_nanos()) as usize + 1;
        due.min(total)
    }

    fn advance_training(&mut self, now: Instant) -> Result<(), SessionError> {
        let Some(window) = self.training.as_ref() else {
            return Ok(());
        };
        let due = self.stages_due(window.started, now);
        let mut announced = window.announced;
        let total = TrainStage::ALL.len();
        while announced < due {
            let stage = TrainStage::ALL[announced];
            tracing::debug!(%stage, "Training stage");
            self.observer.on_event(&SessionEvent::StageStarted {
                stage,
                index: announced,
                total,
            });
            announced += 1;
        }
        if let Some(window) = self.training.as_mut() {
            window.announced = announced;
        }
        if self.deadline_reached(now) {
            self.complete_training()?;
        }
        Ok(())
    }

    fn next_training_wake(&self) -> Option<Instant> {
        let window = self.training.as_ref()?;
        let deadline = self.state.deadline?;
        if window.announced >= TrainStage::ALL.len() {
            return Some(deadline);
        }
        let next_stage = window.started + self.stage_slice() * window.announced as u32;
        Some(next_stage.min(deadline))
    }

    fn complete_training(&mut self) -> Result<(), SessionError> {
        self.stop_countdown();
        let examples = self.corpus.all(true);
        match self.classifier.train(&examples) {
            Ok(summary) => {
                self.finish(SessionOutcome::Trained(summary));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Session retraining failed: {err}");
                self.finish(SessionOutcome::Failed(err.clone()));
                Err(err.into())
            }
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.stop_countdown();
        self.state.phase = Phase::Idle;
        self.state.deadline = None;
        self.training = None;
        tracing::info!(
            collected = self.state.collected_count,
            outcome = ?outcome,
            "Session finished"
        );
        self.observer.on_event(&SessionEvent::Finished(outcome.clone()));
        self.outcome = Some(outcome);
    }
}
