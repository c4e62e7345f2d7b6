//! Held-out evaluation of a trained classifier.

use crate::corpus::{LabeledExample, Sentiment};
use crate::ml::metrics::{self, ConfusionMatrix, PerClassStats};
use crate::ml::{ClassifierError, Prediction, SentimentClassifier};

/// Phrases kept out of the seed set for a quick accuracy check.
pub fn held_out_examples() -> Vec<LabeledExample> {
    [
        ("This is absolutely wonderful!", Sentiment::Positive),
        ("I'm really disappointed with this", Sentiment::Negative),
        ("Great job, keep it up!", Sentiment::Positive),
        ("This is the worst thing ever", Sentiment::Negative),
        ("Pretty good, I like it", Sentiment::Positive),
        ("Not impressed, could be better", Sentiment::Negative),
    ]
    .into_iter()
    .map(|(text, label)| LabeledExample::new(text, label))
    .collect()
}

/// Unlabeled sentences shown before the interactive prompt.
pub fn demo_phrases() -> &'static [&'static str] {
    &[
        "I absolutely love this new phone!",
        "This movie was terrible and boring",
        "The food at this restaurant is amazing",
        "I hate waiting in long lines",
        "What a beautiful day today!",
        "This software is full of bugs",
    ]
}

/// One evaluated example.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    pub text: String,
    pub expected: Sentiment,
    pub prediction: Prediction,
}

impl EvaluationRow {
    pub fn is_correct(&self) -> bool {
        self.expected == self.prediction.label
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub rows: Vec<EvaluationRow>,
    /// Rows are truth, columns are prediction, both by [`Sentiment::index`].
    pub confusion: ConfusionMatrix,
    pub accuracy: f32,
    /// Indexed by [`Sentiment::index`].
    pub per_class: Vec<PerClassStats>,
}

impl EvaluationReport {
    pub fn correct(&self) -> usize {
        self.rows.iter().filter(|row| row.is_correct()).count()
    }

    pub fn class_stats(&self, label: Sentiment) -> &PerClassStats {
        &self.per_class[label.index()]
    }
}

/// Classify every example and tally the results.
pub fn evaluate(
    classifier: &SentimentClassifier,
    examples: &[LabeledExample],
) -> Result<EvaluationReport, ClassifierError> {
    let model = classifier.model()?;
    let mut confusion = ConfusionMatrix::for_sentiment();
    let rows: Vec<EvaluationRow> = examples
        .iter()
        .map(|example| {
            let prediction = model.classify(example.text());
            confusion.add(example.label().index(), prediction.label.index());
            EvaluationRow {
                text: example.text().to_string(),
                expected: example.label(),
                prediction,
            }
        })
        .collect();
    let accuracy = metrics::accuracy(&confusion);
    let per_class = metrics::precision_recall_by_class(&confusion);
    tracing::info!(examples = rows.len(), accuracy, "Evaluation finished");
    Ok(EvaluationReport {
        rows,
        confusion,
        accuracy,
        per_class,
    })
}
