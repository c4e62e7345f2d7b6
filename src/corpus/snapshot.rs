//! JSON snapshot of the corpus so collected examples survive restarts.
//!
//! Only the `additional` set is ever restored; the seed set is written for
//! reference but always comes from the binary on load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::{CorpusStore, LabeledExample};
use crate::atomic_file::atomic_write;

/// Default snapshot file name inside the app root.
pub const SNAPSHOT_FILE_NAME: &str = "corpus.json";

/// On-disk record of a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    #[serde(default)]
    pub seed: Vec<LabeledExample>,
    #[serde(default)]
    pub additional: Vec<LabeledExample>,
    /// RFC 3339 time the snapshot was taken.
    #[serde(default)]
    pub timestamp: String,
}

impl CorpusSnapshot {
    /// Capture the current contents of `store`.
    pub fn capture(store: &CorpusStore) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            seed: store.seed().to_vec(),
            additional: store.additional().to_vec(),
            timestamp: now.format(&Rfc3339).unwrap_or_default(),
        }
    }
}

/// Errors raised while reading or writing a corpus snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// No snapshot exists at the given path.
    #[error("No corpus snapshot at {path}")]
    Missing { path: PathBuf },
    /// Failed to read the snapshot file.
    #[error("Failed to read corpus snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The snapshot is not valid JSON for this format.
    #[error("Invalid corpus snapshot at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Failed to serialize the snapshot.
    #[error("Failed to serialize corpus snapshot: {0}")]
    Serialize(serde_json::Error),
    /// Failed to create the snapshot directory or write the file.
    #[error("Failed to write corpus snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Persist `store` to `path`, replacing any previous snapshot atomically.
pub fn save(store: &CorpusStore, path: &Path) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SnapshotError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let snapshot = CorpusSnapshot::capture(store);
    let bytes = serde_json::to_vec_pretty(&snapshot).map_err(SnapshotError::Serialize)?;
    atomic_write(path, &bytes).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        additional = snapshot.additional.len(),
        "Corpus snapshot saved"
    );
    Ok(())
}

/// Read the snapshot stored at `path`.
pub fn load(path: &Path) -> Result<CorpusSnapshot, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::Missing {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Restore the additional set of `store` from `path`.
///
/// Returns the number of restored examples. A missing or unreadable snapshot
/// is logged and leaves `store` as it was, returning zero.
pub fn restore_into(store: &mut CorpusStore, path: &Path) -> usize {
    match load(path) {
        Ok(snapshot) => {
            let restored = snapshot.additional.len();
            store.restore_additional(snapshot.additional);
            tracing::info!(path = %path.display(), restored, "Corpus snapshot restored");
            restored
        }
        Err(SnapshotError::Missing { .. }) => {
            tracing::debug!(path = %path.display(), "No corpus snapshot; starting empty");
            0
        }
        Err(err) => {
            tracing::warn!("Ignoring corpus snapshot: {err}");
            0
        }
    }
}
