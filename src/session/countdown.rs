//! Background remaining-time notifier for a session phase.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::events::{Phase, SessionEvent, SessionObserver};

/// Emits [`SessionEvent::Countdown`] every `interval` until the deadline or
/// until stopped. It only talks to the observer and never touches session
/// state. Stopping (or dropping) joins the thread.
pub(crate) struct Countdown {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    pub(crate) fn spawn(
        phase: Phase,
        deadline: Instant,
        interval: Duration,
        observer: Arc<dyn SessionObserver>,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name(format!("countdown-{phase}"))
            .spawn(move || {
                loop {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    observer.on_event(&SessionEvent::Countdown { phase, remaining });
                    if remaining.is_zero() {
                        break;
                    }
                    match stop_rx.recv_timeout(interval.min(remaining)) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit.
    pub(crate) fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("Countdown thread panicked");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}
