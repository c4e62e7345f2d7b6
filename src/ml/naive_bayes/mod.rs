//! Naive Bayes model over named, discrete features.
//!
//! Probabilities use the expected-likelihood estimate (add one half to every
//! count), so a known feature taking a value never seen for a label still
//! keeps a small non-zero likelihood. Feature names that never occurred in
//! training are skipped at scoring time.

use std::collections::BTreeMap;
use std::fmt;

use crate::corpus::Sentiment;
use crate::features::{self, FeatureSet, FeatureValue};

mod train;

/// Pseudo-count added to every cell of a frequency table.
pub const ELE_GAMMA: f64 = 0.5;

/// A feature value as seen by the model, including the implicit value of a
/// feature that an example did not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Observation {
    Missing,
    Value(FeatureValue),
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Missing => f.write_str("None"),
            Observation::Value(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ValueCounts {
    counts: BTreeMap<Observation, usize>,
    total: usize,
}

impl ValueCounts {
    fn add(&mut self, observation: Observation, count: usize) {
        *self.counts.entry(observation).or_insert(0) += count;
        self.total += count;
    }

    fn get(&self, observation: Observation) -> usize {
        self.counts.get(&observation).copied().unwrap_or(0)
    }
}

/// Per-label value frequencies of one feature name.
#[derive(Debug, Clone, Default)]
struct FeatureDistribution {
    per_label: [ValueCounts; 2],
    bins: usize,
}

impl FeatureDistribution {
    fn prob(&self, label: Sentiment, observation: Observation) -> f64 {
        let counts = &self.per_label[label.index()];
        let count = counts.get(observation) as f64;
        (count + ELE_GAMMA) / (counts.total as f64 + ELE_GAMMA * self.bins as f64)
    }

    fn observations(&self) -> Vec<Observation> {
        let mut seen: Vec<Observation> = self
            .per_label
            .iter()
            .flat_map(|counts| counts.counts.keys().copied())
            .collect();
        seen.sort();
        seen.dedup();
        seen
    }
}

/// Normalized posterior over both labels. A label absent from training
/// always has probability zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posterior {
    pub positive: f64,
    pub negative: f64,
}

impl Posterior {
    pub fn prob(&self, label: Sentiment) -> f64 {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
        }
    }

    /// Most probable label; ties go to [`Sentiment::Positive`].
    pub fn best(&self) -> Sentiment {
        if self.negative > self.positive {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        }
    }

    fn from_log_scores(scores: [f64; 2]) -> Self {
        let max = scores[0].max(scores[1]);
        let exp = [(scores[0] - max).exp(), (scores[1] - max).exp()];
        let sum = exp[0] + exp[1];
        Self {
            positive: exp[Sentiment::Positive.index()] / sum,
            negative: exp[Sentiment::Negative.index()] / sum,
        }
    }
}

/// Winning label of a classification and its posterior probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Sentiment,
    pub confidence: f64,
}

/// A feature value ranked by how strongly it separates the two labels.
#[derive(Debug, Clone, PartialEq)]
pub struct InformativeFeature {
    pub name: String,
    pub value: Observation,
    /// Label under which this value is most likely.
    pub favored: Sentiment,
    /// Largest over smallest per-label likelihood; always `>= 1`.
    pub ratio: f64,
}

impl fmt::Display for InformativeFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>28} = {:<6} {:>8} : {:<8} = {:>6.1} : 1.0",
            self.name,
            self.value.to_string(),
            self.favored.as_str(),
            self.favored.opposite().as_str(),
            self.ratio
        )
    }
}

/// Trained Naive Bayes state. Built once by [`NaiveBayesModel::fit`] and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    label_counts: [usize; 2],
    features: BTreeMap<String, FeatureDistribution>,
}

impl NaiveBayesModel {
    /// Number of examples the model was fitted on.
    pub fn example_count(&self) -> usize {
        self.label_counts.iter().sum()
    }

    pub fn label_count(&self, label: Sentiment) -> usize {
        self.label_counts[label.index()]
    }

    /// Number of distinct feature names known to the model.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn knows_feature(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Labels with at least one training example, positive first.
    pub fn seen_labels(&self) -> impl Iterator<Item = Sentiment> + '_ {
        Sentiment::ALL
            .into_iter()
            .filter(|label| self.label_counts[label.index()] > 0)
    }

    /// Smoothed prior probability of `label`, smoothed over the seen labels
    /// only. A label absent from training has prior zero.
    pub fn prior(&self, label: Sentiment) -> f64 {
        let count = self.label_counts[label.index()];
        if count == 0 {
            return 0.0;
        }
        let total = self.example_count() as f64;
        let labels = self.seen_labels().count() as f64;
        (count as f64 + ELE_GAMMA) / (total + ELE_GAMMA * labels)
    }

    /// Smoothed likelihood of `name` taking `observation` under `label`, or
    /// `None` for a feature name never seen in training.
    pub fn likelihood(&self, name: &str, observation: Observation, label: Sentiment) -> Option<f64> {
        self.features
            .get(name)
            .map(|distribution| distribution.prob(label, observation))
    }

    /// Unnormalized log-probability of each label, indexed by
    /// [`Sentiment::index`]. A label never seen in training scores
    /// negative infinity.
    pub fn log_scores(&self, features: &FeatureSet) -> [f64; 2] {
        let mut scores = [f64::NEG_INFINITY; 2];
        for label in self.seen_labels() {
            let mut score = self.prior(label).ln();
            for (name, value) in features.iter() {
                if let Some(distribution) = self.features.get(name) {
                    score += distribution.prob(label, Observation::Value(value)).ln();
                }
            }
            scores[label.index()] = score;
        }
        scores
    }

    pub fn posterior(&self, features: &FeatureSet) -> Posterior {
        Posterior::from_log_scores(self.log_scores(features))
    }

    pub fn predict(&self, features: &FeatureSet) -> Prediction {
        let posterior = self.posterior(features);
        let label = posterior.best();
        Prediction {
            label,
            confidence: posterior.prob(label),
        }
    }

    /// Normalize, extract and predict in one step.
    pub fn classify(&self, text: &str) -> Prediction {
        self.predict(&features::extract_text(text))
    }

    /// The `k` feature values with the largest likelihood ratio between labels.
    ///
    /// Equal ratios are ordered by feature name, then observed values before
    /// the implicit missing value.
    pub fn most_informative_features(&self, k: usize) -> Vec<InformativeFeature> {
        let labels: Vec<Sentiment> = self.seen_labels().collect();
        let mut ranked = Vec::new();
        for (name, distribution) in &self.features {
            for observation in distribution.observations() {
                let mut favored = Sentiment::Positive;
                let (mut max, mut min) = (0.0f64, f64::INFINITY);
                for &label in &labels {
                    let prob = distribution.prob(label, observation);
                    if prob > max {
                        max = prob;
                        favored = label;
                    }
                    min = min.min(prob);
                }
                if min <= 0.0 || !min.is_finite() {
                    continue;
                }
                ranked.push(InformativeFeature {
                    name: name.clone(),
                    value: observation,
                    favored,
                    ratio: max / min,
                });
            }
        }
        ranked.sort_by(|a, b| {
            b.ratio
                .total_cmp(&a.ratio)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| b.value.cmp(&a.value))
        });
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{IS_LONG_KEY, NUM_WORDS_KEY, contains_key, extract};

    fn row(words: &[&str], label: Sentiment) -> (FeatureSet, Sentiment) {
        let tokens: Vec<String> = words.iter().map(|word| word.to_string()).collect();
        (extract(&tokens), label)
    }

    fn toy_model() -> NaiveBayesModel {
        NaiveBayesModel::fit(&[
            row(&["good", "great"], Sentiment::Positive),
            row(&["good", "fun"], Sentiment::Positive),
            row(&["bad"], Sentiment::Negative),
            row(&["awful", "bad"], Sentiment::Negative),
        ])
        .unwrap()
    }

    #[test]
    fn priors_use_expected_likelihood() {
        let model = NaiveBayesModel::fit(&[
            row(&["good"], Sentiment::Positive),
            row(&["nice"], Sentiment::Positive),
            row(&["bad"], Sentiment::Negative),
        ])
        .unwrap();
        assert!((model.prior(Sentiment::Positive) - 2.5 / 4.0).abs() < 1e-12);
        assert!((model.prior(Sentiment::Negative) - 1.5 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn absent_features_count_as_missing() {
        let model = toy_model();
        let good = contains_key("good");
        let present = model
            .likelihood(&good, Observation::Value(FeatureValue::Bool(true)), Sentiment::Positive)
            .unwrap();
        let missing = model
            .likelihood(&good, Observation::Missing, Sentiment::Negative)
            .unwrap();
        // Two bins (True, None): (2 + 0.5) / (2 + 1) for both.
        assert!((present - 2.5 / 3.0).abs() < 1e-12);
        assert!((missing - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unseen_values_keep_non_zero_likelihood() {
        let model = toy_model();
        let unseen = model
            .likelihood(
                NUM_WORDS_KEY,
                Observation::Value(FeatureValue::Count(42)),
                Sentiment::Positive,
            )
            .unwrap();
        assert!(unseen > 0.0);
        assert!(model.likelihood("contains(never)", Observation::Missing, Sentiment::Positive).is_none());
    }

    #[test]
    fn unknown_words_do_not_zero_the_posterior() {
        let model = toy_model();
        let posterior = model.posterior(&extract(&["good".into(), "zebra".into(), "quux".into()]));
        assert!(posterior.positive > posterior.negative);
        assert!((posterior.positive + posterior.negative - 1.0).abs() < 1e-12);
    }

    #[test]
    fn predicts_by_argmax_with_matching_confidence() {
        let model = toy_model();
        let prediction = model.predict(&extract(&["awful".into()]));
        assert_eq!(prediction.label, Sentiment::Negative);
        assert!(prediction.confidence > 0.5 && prediction.confidence <= 1.0);
    }

    #[test]
    fn ties_resolve_to_positive() {
        let model = NaiveBayesModel::fit(&[
            row(&["same"], Sentiment::Positive),
            row(&["same"], Sentiment::Negative),
        ])
        .unwrap();
        let prediction = model.predict(&extract(&["same".into()]));
        assert_eq!(prediction.label, Sentiment::Positive);
        assert!((prediction.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn informative_features_rank_by_ratio() {
        let model = toy_model();
        let top = model.most_informative_features(3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|pair| pair[0].ratio >= pair[1].ratio));
        assert_eq!(top[0].name, contains_key("bad"));
        assert_eq!(top[0].favored, Sentiment::Negative);
        assert_eq!(top[0].value, Observation::Value(FeatureValue::Bool(true)));
        assert!((top[0].ratio - 5.0).abs() < 1e-12);
        assert!(top.iter().all(|feature| feature.name != IS_LONG_KEY));
    }
}
