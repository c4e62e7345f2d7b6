//! Drives a timed session from stdin lines of the form `text | label`.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use sentimento::session::{
    Phase, Session, SessionError, SessionEvent, SessionObserver, SessionOutcome,
};

use super::Shell;

pub(super) fn run(shell: &mut Shell, collect: Option<u64>, train: Option<u64>) -> Result<(), String> {
    let mut config = shell.config.session_config();
    if let Some(seconds) = collect {
        config.collect = Duration::from_secs(seconds.max(1));
    }
    if let Some(seconds) = train {
        config.train = Duration::from_secs(seconds.max(1));
    }
    println!(
        "Collecting for {}s. Enter `text | label` lines; `:done` stops early, `:abort` cancels.",
        config.collect.as_secs()
    );

    let lines = spawn_stdin_reader()?;
    let observer: Arc<dyn SessionObserver> = Arc::new(print_event);
    let outcome = {
        let mut session = Session::start(config, &mut shell.corpus, &shell.classifier, observer)
            .map_err(|err| err.to_string())?;
        while session.phase() == Phase::Collecting {
            match lines.recv_timeout(session.remaining()) {
                Ok(line) => handle_line(&mut session, &line)?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    session.cancel().map_err(|err| err.to_string())?;
                }
            }
            session.tick().map_err(|err| err.to_string())?;
        }
        session.run_training().map_err(|err| err.to_string())?
    };

    if shell.corpus.counts().additional_count > 0 {
        shell.save_snapshot()?;
    }
    if matches!(outcome, Some(SessionOutcome::Skipped)) {
        println!("Nothing collected; model unchanged.");
    }
    Ok(())
}

fn handle_line(session: &mut Session<'_>, line: &str) -> Result<(), String> {
    let line = line.trim();
    match line {
        "" => Ok(()),
        ":done" => session.cancel().map(|_| ()).map_err(|err| err.to_string()),
        ":abort" => {
            session.abort();
            Ok(())
        }
        _ => {
            let Some((text, label)) = line.rsplit_once('|') else {
                eprintln!("Expected `text | label`, got: {line}");
                return Ok(());
            };
            match session.submit(text.trim(), label) {
                Ok(_) => Ok(()),
                Err(SessionError::InvalidLabel(err)) => {
                    eprintln!("{err}");
                    Ok(())
                }
                Err(SessionError::DeadlinePassed) => {
                    eprintln!("Too late: the collection window has closed");
                    Ok(())
                }
                Err(err) => Err(err.to_string()),
            }
        }
    }
}

/// Lines from stdin on a channel so reads can be bounded by the deadline.
/// The thread is detached: it stays blocked on stdin until the process exits.
fn spawn_stdin_reader() -> Result<Receiver<String>, String> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|err| format!("Failed to start stdin reader: {err}"))?;
    Ok(rx)
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::PhaseStarted { phase, duration } => {
            println!("-- {phase} ({}s)", duration.as_secs());
        }
        SessionEvent::Countdown { phase, remaining } => {
            let seconds = remaining.as_secs();
            if seconds > 0 && (seconds <= 5 || seconds % 10 == 0) {
                eprintln!("   {seconds}s left ({phase})");
            }
        }
        SessionEvent::Accepted { label, collected } => {
            println!("   + {label} (#{collected})");
        }
        SessionEvent::Rejected { .. } => {}
        SessionEvent::StageStarted {
            stage,
            index,
            total,
        } => println!("   [{}/{total}] {stage}", index + 1),
        SessionEvent::Finished(outcome) => match outcome {
            SessionOutcome::Trained(summary) => println!(
                "-- Retrained on {} examples ({} positive, {} negative)",
                summary.examples, summary.positive, summary.negative
            ),
            SessionOutcome::Skipped => println!("-- Session ended without new examples"),
            SessionOutcome::Aborted => println!("-- Session aborted"),
            SessionOutcome::Failed(err) => eprintln!("-- Retraining failed: {err}"),
        },
    }
}
