use std::sync::Mutex;

use super::*;
use crate::ml::TrainOptions;

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<SessionEvent>>,
}

impl Recorder {
    fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    fn stages(&self) -> Vec<TrainStage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SessionEvent::StageStarted { stage, .. } => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl SessionObserver for Recorder {
    fn on_event(&self, event: &SessionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn quiet_config() -> SessionConfig {
    SessionConfig::from_seconds(30, 8).with_countdown_interval(None)
}

fn classifier() -> SentimentClassifier {
    SentimentClassifier::new(TrainOptions {
        shuffle_seed: Some(11),
    })
}

const SECOND: Duration = Duration::from_secs(1);

#[test]
fn empty_collection_skips_training() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let recorder = Arc::new(Recorder::default());
    let t0 = Instant::now();
    let mut session =
        Session::start_at(t0, quiet_config(), &mut corpus, &classifier, recorder.clone()).unwrap();
    assert_eq!(session.phase(), Phase::Collecting);
    assert_eq!(session.tick_at(t0 + 10 * SECOND).unwrap(), Phase::Collecting);
    assert_eq!(session.tick_at(t0 + 30 * SECOND).unwrap(), Phase::Idle);
    assert_eq!(session.outcome(), Some(&SessionOutcome::Skipped));
    assert!(!classifier.is_trained());
    assert!(recorder.stages().is_empty());
}

#[test]
fn collected_examples_are_trained_on() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let recorder = Arc::new(Recorder::default());
    let t0 = Instant::now();
    let mut session =
        Session::start_at(t0, quiet_config(), &mut corpus, &classifier, recorder.clone()).unwrap();
    assert_eq!(
        session.submit_at(t0 + SECOND, "A gorgeous sunrise", "pos").unwrap(),
        Sentiment::Positive
    );
    session
        .submit_at(t0 + 2 * SECOND, "Broken on arrival", "negativo")
        .unwrap();
    assert_eq!(session.state().collected_count, 2);

    let t1 = t0 + 30 * SECOND;
    assert_eq!(session.tick_at(t1).unwrap(), Phase::Training);
    assert_eq!(recorder.stages(), vec![TrainStage::Preparing]);
    assert_eq!(session.remaining_at(t1 + 3 * SECOND), 5 * SECOND);

    session.tick_at(t1 + 5 * SECOND).unwrap();
    assert_eq!(recorder.stages(), TrainStage::ALL[..3].to_vec());
    assert_eq!(session.tick_at(t1 + 8 * SECOND).unwrap(), Phase::Idle);
    assert_eq!(recorder.stages(), TrainStage::ALL.to_vec());

    let Some(SessionOutcome::Trained(summary)) = session.outcome().cloned() else {
        panic!("expected a trained outcome");
    };
    assert_eq!(summary.examples, 26);
    assert_eq!(classifier.model().unwrap().example_count(), 26);
    assert!(matches!(
        recorder.events().last(),
        Some(SessionEvent::Finished(SessionOutcome::Trained(_)))
    ));
    drop(session);
    assert_eq!(corpus.additional().len(), 2);
}

#[test]
fn invalid_label_keeps_collecting() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let t0 = Instant::now();
    let mut session = Session::start_at(
        t0,
        quiet_config(),
        &mut corpus,
        &classifier,
        Arc::new(Recorder::default()),
    )
    .unwrap();
    let err = session.submit_at(t0 + SECOND, "Meh", "neutral").unwrap_err();
    assert!(matches!(err, SessionError::InvalidLabel(_)));
    assert_eq!(session.phase(), Phase::Collecting);
    assert_eq!(session.state().collected_count, 0);
    session.submit_at(t0 + 2 * SECOND, "Meh", "n").unwrap();
    assert_eq!(session.state().collected_count, 1);
}

#[test]
fn submission_at_deadline_is_rejected_and_closes_collection() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let t0 = Instant::now();
    let mut session = Session::start_at(
        t0,
        quiet_config(),
        &mut corpus,
        &classifier,
        Arc::new(Recorder::default()),
    )
    .unwrap();
    let err = session
        .submit_at(t0 + 30 * SECOND, "Too late", "pos")
        .unwrap_err();
    assert!(matches!(err, SessionError::DeadlinePassed));
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.outcome(), Some(&SessionOutcome::Skipped));
    assert!(matches!(
        session.submit_at(t0 + 31 * SECOND, "Later", "pos"),
        Err(SessionError::NotCollecting { phase: Phase::Idle })
    ));
    drop(session);
    assert!(corpus.additional().is_empty());
}

#[test]
fn cancel_moves_straight_to_training() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let t0 = Instant::now();
    let mut session = Session::start_at(
        t0,
        quiet_config(),
        &mut corpus,
        &classifier,
        Arc::new(Recorder::default()),
    )
    .unwrap();
    session.submit_at(t0, "Quietly brilliant", "p").unwrap();
    assert_eq!(session.cancel_at(t0 + SECOND).unwrap(), Phase::Training);
    assert_eq!(session.remaining_at(t0 + SECOND), 8 * SECOND);
    assert_eq!(session.tick_at(t0 + 9 * SECOND).unwrap(), Phase::Idle);
    assert!(classifier.is_trained());
}

#[test]
fn abort_skips_training_but_keeps_examples() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let t0 = Instant::now();
    let mut session = Session::start_at(
        t0,
        quiet_config(),
        &mut corpus,
        &classifier,
        Arc::new(Recorder::default()),
    )
    .unwrap();
    session.submit_at(t0, "Superb", "pos").unwrap();
    session.cancel_at(t0 + SECOND).unwrap();
    session.abort();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.outcome(), Some(&SessionOutcome::Aborted));
    assert_eq!(session.tick_at(t0 + 60 * SECOND).unwrap(), Phase::Idle);
    drop(session);
    assert!(!classifier.is_trained());
    assert_eq!(corpus.additional().len(), 1);
}

#[test]
fn run_training_blocks_until_retrained() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let recorder = Arc::new(Recorder::default());
    let config = SessionConfig {
        collect: Duration::from_secs(5),
        train: Duration::from_millis(40),
        countdown_interval: None,
    };
    let mut session =
        Session::start(config, &mut corpus, &classifier, recorder.clone()).unwrap();
    assert_eq!(session.run_training().unwrap(), None);
    session.submit("Lovely", "pos").unwrap();
    session.cancel().unwrap();
    let outcome = session.run_training().unwrap();
    assert!(matches!(outcome, Some(SessionOutcome::Trained(_))));
    assert_eq!(recorder.stages(), TrainStage::ALL.to_vec());
}

#[test]
fn countdown_reports_and_stops_with_the_phase() {
    let mut corpus = CorpusStore::with_default_seed();
    let classifier = classifier();
    let recorder = Arc::new(Recorder::default());
    let config = SessionConfig {
        collect: Duration::from_secs(30),
        train: Duration::from_secs(30),
        countdown_interval: Some(Duration::from_millis(5)),
    };
    let mut session =
        Session::start(config, &mut corpus, &classifier, recorder.clone()).unwrap();
    thread::sleep(Duration::from_millis(30));
    session.abort();
    let seen = recorder.events().len();
    assert!(recorder.events().iter().any(|event| matches!(
        event,
        SessionEvent::Countdown {
            phase: Phase::Collecting,
            ..
        }
    )));
    thread::sleep(Duration::from_millis(30));
    assert_eq!(recorder.events().len(), seen);
}
