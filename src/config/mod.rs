//! `config.toml` settings for sessions, training and the corpus snapshot.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_dirs;
use crate::corpus::snapshot::SNAPSHOT_FILE_NAME;
use crate::ml::TrainOptions;
use crate::session::SessionConfig;

mod defaults;
mod errors;
mod io;

#[cfg(test)]
mod tests;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save, save_to_path};

use defaults::{
    MIN_COUNTDOWN_INTERVAL_MS, clamp_threshold, default_countdown_interval_ms,
    default_informative_features, default_low_confidence_threshold, default_phase_seconds,
};

/// Aggregate application settings.
///
/// Config tables (TOML): `session`, `classifier`, `corpus`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub corpus: CorpusSettings,
}

impl AppConfig {
    /// Clamp out-of-range values into their supported ranges.
    pub fn normalized(self) -> Self {
        Self {
            session: self.session.normalized(),
            classifier: self.classifier.normalized(),
            corpus: self.corpus,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::from_seconds(self.session.collect_seconds, self.session.train_seconds)
            .with_countdown_interval(Some(Duration::from_millis(
                self.session.countdown_interval_ms,
            )))
    }

    pub fn train_options(&self) -> TrainOptions {
        TrainOptions {
            shuffle_seed: self.classifier.shuffle_seed,
        }
    }

    /// Configured snapshot location, or `corpus.json` in the app root.
    pub fn snapshot_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.corpus.snapshot_file {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dirs::app_root_dir()
                .map_err(io::map_app_dir_error)?
                .join(SNAPSHOT_FILE_NAME)),
        }
    }
}

/// Phase lengths of a collect-then-retrain session.
///
/// Config keys: `collect_seconds`, `train_seconds`, `countdown_interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_phase_seconds")]
    pub collect_seconds: u64,
    #[serde(default = "default_phase_seconds")]
    pub train_seconds: u64,
    /// How often the countdown reports remaining time.
    #[serde(default = "default_countdown_interval_ms")]
    pub countdown_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            collect_seconds: default_phase_seconds(),
            train_seconds: default_phase_seconds(),
            countdown_interval_ms: default_countdown_interval_ms(),
        }
    }
}

impl SessionSettings {
    fn normalized(self) -> Self {
        Self {
            collect_seconds: self.collect_seconds.max(1),
            train_seconds: self.train_seconds.max(1),
            countdown_interval_ms: self.countdown_interval_ms.max(MIN_COUNTDOWN_INTERVAL_MS),
        }
    }
}

/// Config keys: `shuffle_seed`, `low_confidence_threshold`,
/// `informative_features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Fixed shuffle seed for reproducible training runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,
    /// Confidence below which the interactive shell prints a warning.
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
    /// Default row count for the informative-features listing.
    #[serde(default = "default_informative_features")]
    pub informative_features: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            shuffle_seed: None,
            low_confidence_threshold: default_low_confidence_threshold(),
            informative_features: default_informative_features(),
        }
    }
}

impl ClassifierSettings {
    fn normalized(self) -> Self {
        Self {
            low_confidence_threshold: clamp_threshold(self.low_confidence_threshold),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_file: Option<PathBuf>,
}
