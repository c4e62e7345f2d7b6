//! Sentiment labels and labeled examples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[serde(alias = "positivo")]
    Positive,
    #[serde(alias = "negativo")]
    Negative,
}

impl Sentiment {
    /// Both labels, in tie-break order.
    pub const ALL: [Sentiment; 2] = [Sentiment::Positive, Sentiment::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Sentiment::Positive => Sentiment::Negative,
            Sentiment::Negative => Sentiment::Positive,
        }
    }

    /// Dense index used by count tables.
    pub fn index(self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
        }
    }

    /// Parse a raw label through the synonym table, ignoring case and
    /// surrounding whitespace.
    pub fn from_label(raw: &str) -> Result<Self, LabelError> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "positivo" | "pos" | "p" | "1" => Ok(Sentiment::Positive),
            "negativo" | "neg" | "n" | "0" => Ok(Sentiment::Negative),
            _ => Err(LabelError::InvalidLabel(raw.to_string())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::from_label(s)
    }
}

/// Errors raised while interpreting a raw sentiment tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// The tag is not in the accepted synonym table.
    #[error("Invalid label {0:?} (expected positivo/pos/p/1 or negativo/neg/n/0)")]
    InvalidLabel(String),
}

/// A text paired with its sentiment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    text: String,
    label: Sentiment,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> Sentiment {
        self.label
    }
}
