//! Thread-safe sentiment classifier that retrains from scratch and publishes
//! each new model with a single pointer swap.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use super::naive_bayes::{InformativeFeature, NaiveBayesModel, Posterior, Prediction};
use crate::corpus::{LabeledExample, Sentiment};
use crate::features::{self, FeatureSet};

/// Errors reported by [`SentimentClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// A query was made before any successful training run.
    #[error("Classifier has not been trained yet")]
    NotTrained,
    /// Training was requested with no examples.
    #[error("Cannot train on an empty example set")]
    EmptyTrainingSet,
}

/// Options applied to every training run.
#[derive(Debug, Clone, Default)]
pub struct TrainOptions {
    /// Fixed seed for the pre-fit shuffle; `None` draws from the OS.
    pub shuffle_seed: Option<u64>,
}

/// Named steps of a training run, reported to a [`TrainObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainStage {
    Preparing,
    Extracting,
    Fitting,
    Publishing,
}

impl TrainStage {
    pub const ALL: [TrainStage; 4] = [
        TrainStage::Preparing,
        TrainStage::Extracting,
        TrainStage::Fitting,
        TrainStage::Publishing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrainStage::Preparing => "Preparing corpus",
            TrainStage::Extracting => "Extracting features",
            TrainStage::Fitting => "Fitting Naive Bayes",
            TrainStage::Publishing => "Publishing model",
        }
    }
}

impl fmt::Display for TrainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives progress notifications during training. Purely observational.
pub trait TrainObserver {
    fn on_stage(&mut self, stage: TrainStage);
}

impl<F: FnMut(TrainStage)> TrainObserver for F {
    fn on_stage(&mut self, stage: TrainStage) {
        self(stage)
    }
}

struct SilentObserver;

impl TrainObserver for SilentObserver {
    fn on_stage(&mut self, _stage: TrainStage) {}
}

/// Result of a successful training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainSummary {
    pub examples: usize,
    pub positive: usize,
    pub negative: usize,
    pub features: usize,
}

/// Naive Bayes sentiment classifier shared between a trainer and any number
/// of concurrent readers.
///
/// Readers clone the current model `Arc` and score against it without
/// holding a lock, so they always see one complete model. `train` builds the
/// replacement off to the side and swaps it in; training runs are serialized.
pub struct SentimentClassifier {
    options: TrainOptions,
    current: RwLock<Option<Arc<NaiveBayesModel>>>,
    training: Mutex<()>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(TrainOptions::default())
    }
}

impl SentimentClassifier {
    pub fn new(options: TrainOptions) -> Self {
        Self {
            options,
            current: RwLock::new(None),
            training: Mutex::new(()),
        }
    }

    pub fn is_trained(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The currently published model.
    pub fn model(&self) -> Result<Arc<NaiveBayesModel>, ClassifierError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ClassifierError::NotTrained)
    }

    /// Fit a new model on `examples` and publish it.
    pub fn train(&self, examples: &[LabeledExample]) -> Result<TrainSummary, ClassifierError> {
        self.train_observed(examples, &mut SilentObserver)
    }

    /// [`SentimentClassifier::train`] with stage notifications.
    ///
    /// On error the previously published model stays in place.
    pub fn train_observed(
        &self,
        examples: &[LabeledExample],
        observer: &mut dyn TrainObserver,
    ) -> Result<TrainSummary, ClassifierError> {
        if examples.is_empty() {
            tracing::warn!("Training skipped: no examples");
            return Err(ClassifierError::EmptyTrainingSet);
        }
        let _guard = self.training.lock().unwrap_or_else(PoisonError::into_inner);

        observer.on_stage(TrainStage::Preparing);
        let mut rng = match self.options.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        observer.on_stage(TrainStage::Extracting);
        let mut rows: Vec<(FeatureSet, Sentiment)> = examples
            .iter()
            .map(|example| (features::extract_text(example.text()), example.label()))
            .collect();
        rows.shuffle(&mut rng);

        observer.on_stage(TrainStage::Fitting);
        let model = NaiveBayesModel::fit(&rows)?;
        let summary = TrainSummary {
            examples: model.example_count(),
            positive: model.label_count(Sentiment::Positive),
            negative: model.label_count(Sentiment::Negative),
            features: model.feature_count(),
        };

        observer.on_stage(TrainStage::Publishing);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(model));
        tracing::info!(
            examples = summary.examples,
            positive = summary.positive,
            negative = summary.negative,
            features = summary.features,
            "Classifier trained"
        );
        Ok(summary)
    }

    /// Label `text` and report the posterior probability of that label.
    pub fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        Ok(self.model()?.classify(text))
    }

    /// Full posterior distribution for `text`.
    pub fn prob_classify(&self, text: &str) -> Result<Posterior, ClassifierError> {
        Ok(self.model()?.posterior(&features::extract_text(text)))
    }

    pub fn most_informative_features(
        &self,
        k: usize,
    ) -> Result<Vec<InformativeFeature>, ClassifierError> {
        Ok(self.model()?.most_informative_features(k))
    }
}
