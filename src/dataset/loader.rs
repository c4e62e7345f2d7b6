//! Loader for static `{text, label}` datasets in JSON array or JSON Lines form.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::corpus::{CorpusStore, LabeledExample, Sentiment};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a JSON array at all. Individual bad records are
    /// reported through [`IngestReport::rejected`] instead.
    #[error("Invalid JSON in dataset {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A record as written on disk, before its label is validated.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    text: String,
    label: String,
}

/// A record that could not be turned into an example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based record number (line number for JSON Lines).
    pub record: usize,
    pub reason: String,
}

/// Outcome of reading a static dataset.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub accepted: Vec<LabeledExample>,
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    fn push(&mut self, record: usize, raw: Result<RawRecord, serde_json::Error>) {
        let raw = match raw {
            Ok(raw) => raw,
            Err(err) => {
                self.reject(record, format!("malformed record: {err}"));
                return;
            }
        };
        match Sentiment::from_label(&raw.label) {
            Ok(label) => self.accepted.push(LabeledExample::new(raw.text, label)),
            Err(err) => self.reject(record, err.to_string()),
        }
    }

    fn reject(&mut self, record: usize, reason: String) {
        tracing::debug!(record, %reason, "Dataset record rejected");
        self.rejected.push(Rejection { record, reason });
    }
}

/// Read a dataset file. `.jsonl` files (and anything not starting with `[`)
/// are read line by line; otherwise the file is one JSON array.
pub fn load_static(path: &Path) -> Result<IngestReport, DatasetError> {
    let read_err = |source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    };
    let is_jsonl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
    let report = if is_jsonl {
        load_lines(File::open(path).map_err(read_err)?).map_err(read_err)?
    } else {
        let content = std::fs::read_to_string(path).map_err(read_err)?;
        if content.trim_start().starts_with('[') {
            load_array(&content).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            load_lines(content.as_bytes()).map_err(read_err)?
        }
    };
    tracing::info!(
        path = %path.display(),
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        "Dataset loaded"
    );
    Ok(report)
}

fn load_array(content: &str) -> Result<IngestReport, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let mut report = IngestReport::default();
    for (idx, value) in values.into_iter().enumerate() {
        report.push(idx + 1, serde_json::from_value(value));
    }
    Ok(report)
}

fn load_lines(reader: impl std::io::Read) -> std::io::Result<IngestReport> {
    let mut report = IngestReport::default();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        report.push(idx + 1, serde_json::from_str(&line));
    }
    Ok(report)
}

/// Append every accepted example to the corpus. Returns how many were added.
pub fn ingest(corpus: &mut CorpusStore, report: &IngestReport) -> usize {
    for example in &report.accepted {
        corpus.add_example(example.clone());
    }
    tracing::info!(added = report.accepted.len(), "Examples ingested");
    report.accepted.len()
}
