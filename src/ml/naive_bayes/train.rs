use std::collections::BTreeMap;

use super::{FeatureDistribution, NaiveBayesModel, Observation};
use crate::corpus::Sentiment;
use crate::features::FeatureSet;
use crate::ml::ClassifierError;

impl NaiveBayesModel {
    /// Count label and feature-value frequencies over `rows`.
    ///
    /// Every feature name seen anywhere in training gets a distribution for
    /// both labels; examples of a label that did not carry the feature are
    /// counted under [`Observation::Missing`].
    pub fn fit(rows: &[(FeatureSet, Sentiment)]) -> Result<Self, ClassifierError> {
        if rows.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut label_counts = [0usize; 2];
        let mut features: BTreeMap<String, FeatureDistribution> = BTreeMap::new();
        for (feature_set, label) in rows {
            label_counts[label.index()] += 1;
            for (name, value) in feature_set.iter() {
                features
                    .entry(name.to_string())
                    .or_default()
                    .per_label[label.index()]
                    .add(Observation::Value(value), 1);
            }
        }

        for distribution in features.values_mut() {
            for label in Sentiment::ALL {
                let counts = &mut distribution.per_label[label.index()];
                let missing = label_counts[label.index()].saturating_sub(counts.total);
                if missing > 0 {
                    counts.add(Observation::Missing, missing);
                }
            }
            distribution.bins = distribution.observations().len();
        }

        Ok(Self {
            label_counts,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{NUM_WORDS_KEY, extract};
    use crate::features::FeatureValue;

    #[test]
    fn empty_rows_are_rejected() {
        assert!(matches!(
            NaiveBayesModel::fit(&[]),
            Err(ClassifierError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn bins_count_distinct_values_across_labels() {
        let rows = vec![
            (extract(&["a1x".into()]), Sentiment::Positive),
            (extract(&["b1x".into(), "c1x".into()]), Sentiment::Negative),
            (extract(&[]), Sentiment::Negative),
        ];
        let model = NaiveBayesModel::fit(&rows).unwrap();
        let distribution = &model.features[NUM_WORDS_KEY];
        assert_eq!(distribution.bins, 3);
        assert_eq!(
            distribution.per_label[Sentiment::Negative.index()]
                .get(Observation::Value(FeatureValue::Count(0))),
            1
        );
        assert_eq!(model.example_count(), 3);
        assert_eq!(model.label_count(Sentiment::Negative), 2);
    }

    #[test]
    fn single_label_training_scores_only_that_label() {
        let rows = vec![
            (extract(&["joy".into()]), Sentiment::Negative),
            (extract(&["fun".into()]), Sentiment::Negative),
        ];
        let model = NaiveBayesModel::fit(&rows).unwrap();
        assert_eq!(model.seen_labels().collect::<Vec<_>>(), vec![Sentiment::Negative]);
        assert_eq!(model.prior(Sentiment::Positive), 0.0);
        assert!((model.prior(Sentiment::Negative) - 1.0).abs() < 1e-12);

        let scores = model.log_scores(&extract(&["joy".into()]));
        assert_eq!(scores[Sentiment::Positive.index()], f64::NEG_INFINITY);
        let prediction = model.predict(&extract(&["joy".into()]));
        assert_eq!(prediction.label, Sentiment::Negative);
        assert_eq!(prediction.confidence, 1.0);

        let top = model.most_informative_features(1);
        assert_eq!(top[0].favored, Sentiment::Negative);
        assert_eq!(top[0].ratio, 1.0);
    }
}
