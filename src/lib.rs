//! Library exports for the `sentimento` shell, benchmarks and tests.
/// Location of the app folder for config, logs and snapshots.
pub mod app_dirs;
mod atomic_file;
/// `config.toml` settings.
pub mod config;
/// Seed and collected labeled examples plus snapshot persistence.
pub mod corpus;
/// Static dataset ingestion and synthetic examples.
pub mod dataset;
/// Held-out accuracy reporting.
pub mod evaluation;
/// Feature extraction from normalized tokens.
pub mod features;
/// Tracing subscriber setup.
pub mod logging;
/// Naive Bayes model, classifier and metrics.
pub mod ml;
/// Timed collect-then-retrain sessions.
pub mod session;
/// Text normalization: tokenizing, stop-words and stemming.
pub mod text;
