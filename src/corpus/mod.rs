//! In-memory labeled corpus split into a fixed seed set and an append-only
//! "additional" set grown by sessions and ingestion.

mod label;
mod seed;
pub mod snapshot;

pub use label::{LabelError, LabeledExample, Sentiment};
pub use seed::default_seed;

/// Size summary of a [`CorpusStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorpusCounts {
    pub seed_count: usize,
    pub additional_count: usize,
    pub positive_in_additional: usize,
    pub negative_in_additional: usize,
}

/// Ordered collection of labeled examples.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    seed: Vec<LabeledExample>,
    additional: Vec<LabeledExample>,
}

impl CorpusStore {
    /// Create a store whose seed set is fixed to `seed`.
    pub fn new(seed: Vec<LabeledExample>) -> Self {
        Self {
            seed,
            additional: Vec::new(),
        }
    }

    /// Create a store seeded with the built-in balanced examples.
    pub fn with_default_seed() -> Self {
        Self::new(default_seed())
    }

    /// Validate `label_raw` and append the example to the additional set.
    pub fn add(&mut self, text: &str, label_raw: &str) -> Result<Sentiment, LabelError> {
        let label = Sentiment::from_label(label_raw)?;
        self.additional.push(LabeledExample::new(text, label));
        tracing::debug!(label = %label, additional = self.additional.len(), "Example added");
        Ok(label)
    }

    /// Append an already-labeled example to the additional set.
    pub fn add_example(&mut self, example: LabeledExample) {
        self.additional.push(example);
    }

    /// Seed examples, followed by additional ones when requested.
    pub fn all(&self, include_additional: bool) -> Vec<LabeledExample> {
        let mut out = self.seed.clone();
        if include_additional {
            out.extend(self.additional.iter().cloned());
        }
        out
    }

    pub fn seed(&self) -> &[LabeledExample] {
        &self.seed
    }

    pub fn additional(&self) -> &[LabeledExample] {
        &self.additional
    }

    pub fn clear_additional(&mut self) {
        if self.additional.is_empty() {
            return;
        }
        tracing::info!(removed = self.additional.len(), "Cleared additional examples");
        self.additional.clear();
    }

    /// Replace the additional set wholesale, e.g. from a saved snapshot.
    pub fn restore_additional(&mut self, examples: Vec<LabeledExample>) {
        self.additional = examples;
    }

    pub fn counts(&self) -> CorpusCounts {
        let positive_in_additional = self
            .additional
            .iter()
            .filter(|example| example.label() == Sentiment::Positive)
            .count();
        CorpusCounts {
            seed_count: self.seed.len(),
            additional_count: self.additional.len(),
            positive_in_additional,
            negative_in_additional: self.additional.len() - positive_in_additional,
        }
    }
}
