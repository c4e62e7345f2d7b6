use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use sentimento::corpus::{LabeledExample, Sentiment, default_seed};
use sentimento::ml::{SentimentClassifier, TrainOptions, TrainStage};

const QUERY_TEXT: &str = "The lighthouse keeper whistled";

fn options() -> TrainOptions {
    TrainOptions {
        shuffle_seed: Some(1),
    }
}

fn extended_corpus() -> Vec<LabeledExample> {
    let mut examples = default_seed();
    for _ in 0..5 {
        examples.push(LabeledExample::new(QUERY_TEXT, Sentiment::Negative));
    }
    examples
}

fn reference_confidence(examples: &[LabeledExample]) -> (Sentiment, f64) {
    let classifier = SentimentClassifier::new(options());
    classifier.train(examples).unwrap();
    let prediction = classifier.classify(QUERY_TEXT).unwrap();
    (prediction.label, prediction.confidence)
}

#[test]
fn readers_see_either_the_old_or_the_new_model() {
    let old = reference_confidence(&default_seed());
    let new = reference_confidence(&extended_corpus());
    assert_ne!(old, new);
    assert_eq!(new.0, Sentiment::Negative);

    let classifier = SentimentClassifier::new(options());
    classifier.train(&default_seed()).unwrap();
    let training_done = AtomicBool::new(false);
    let reads = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !training_done.load(Ordering::Acquire) {
                    let prediction = classifier.classify(QUERY_TEXT).unwrap();
                    let seen = (prediction.label, prediction.confidence);
                    assert!(seen == old || seen == new, "torn read: {seen:?}");
                    reads.fetch_add(1, Ordering::Relaxed);
                }
            });
        }

        let mut slow_stages = |stage: TrainStage| {
            if matches!(stage, TrainStage::Fitting | TrainStage::Publishing) {
                thread::sleep(Duration::from_millis(25));
            }
        };
        classifier
            .train_observed(&extended_corpus(), &mut slow_stages)
            .unwrap();
        training_done.store(true, Ordering::Release);
    });

    assert!(reads.load(Ordering::Relaxed) > 0);
    let after = classifier.classify(QUERY_TEXT).unwrap();
    assert_eq!((after.label, after.confidence), new);
}

#[test]
fn concurrent_training_runs_are_serialized() {
    let classifier = SentimentClassifier::new(options());
    let active = AtomicUsize::new(0);
    let overlap = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..3 {
            scope.spawn(|| {
                let mut watch = |stage: TrainStage| match stage {
                    TrainStage::Preparing => {
                        if active.fetch_add(1, Ordering::SeqCst) > 0 {
                            overlap.store(true, Ordering::SeqCst);
                        }
                        thread::sleep(Duration::from_millis(10));
                    }
                    TrainStage::Publishing => {
                        active.fetch_sub(1, Ordering::SeqCst);
                    }
                    _ => {}
                };
                classifier.train_observed(&default_seed(), &mut watch).unwrap();
            });
        }
    });

    assert!(!overlap.load(Ordering::SeqCst));
    assert_eq!(classifier.model().unwrap().example_count(), 24);
}
