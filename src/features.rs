//! Bag-of-words feature extraction.

use std::collections::BTreeMap;
use std::fmt;

use crate::text::{self, TokenSequence};

/// Feature key holding the post-normalization token count.
pub const NUM_WORDS_KEY: &str = "num_words";
/// Feature key flagging texts with more than [`LONG_TEXT_WORDS`] tokens.
pub const IS_LONG_KEY: &str = "is_long";
/// Token count above which a text is considered long.
pub const LONG_TEXT_WORDS: usize = 10;

/// Value stored under a feature key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureValue {
    Bool(bool),
    Count(usize),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(true) => f.write_str("True"),
            FeatureValue::Bool(false) => f.write_str("False"),
            FeatureValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Named features of one text. Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    values: BTreeMap<String, FeatureValue>,
}

impl FeatureSet {
    pub fn get(&self, key: &str) -> Option<FeatureValue> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FeatureValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// True when `stem` produced a `contains(..)` indicator.
    pub fn contains_stem(&self, stem: &str) -> bool {
        self.values.contains_key(&contains_key(stem))
    }

    pub fn num_words(&self) -> usize {
        match self.get(NUM_WORDS_KEY) {
            Some(FeatureValue::Count(count)) => count,
            _ => 0,
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self.get(IS_LONG_KEY), Some(FeatureValue::Bool(true)))
    }
}

/// Key of the presence indicator for `stem`.
pub fn contains_key(stem: &str) -> String {
    format!("contains({stem})")
}

/// Build the feature set of an already-normalized token sequence.
pub fn extract(tokens: &[String]) -> FeatureSet {
    let mut values = BTreeMap::new();
    for token in tokens {
        values.insert(contains_key(token), FeatureValue::Bool(true));
    }
    let num_words = tokens.len();
    values.insert(NUM_WORDS_KEY.to_string(), FeatureValue::Count(num_words));
    values.insert(
        IS_LONG_KEY.to_string(),
        FeatureValue::Bool(num_words > LONG_TEXT_WORDS),
    );
    FeatureSet { values }
}

/// Normalize `text` and extract its features.
pub fn extract_text(text: &str) -> FeatureSet {
    let tokens: TokenSequence = text::normalize(text);
    extract(&tokens)
}
