//! Sentiment model training and inference.
//!
//! [`naive_bayes`] holds the immutable fitted model; [`SentimentClassifier`]
//! owns the published model and handles retraining.

mod classifier;
pub mod metrics;
pub mod naive_bayes;

pub use classifier::{
    ClassifierError, SentimentClassifier, TrainObserver, TrainOptions, TrainStage, TrainSummary,
};
pub use naive_bayes::{InformativeFeature, NaiveBayesModel, Observation, Posterior, Prediction};
