//! Template-based synthetic examples for smoke-testing retraining.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus::{LabeledExample, Sentiment};

const SUBJECTS: &[&str] = &[
    "the service",
    "this product",
    "the movie",
    "our hotel room",
    "the new update",
    "the delivery",
    "this restaurant",
    "the concert",
];

const POSITIVE_TEMPLATES: &[&str] = &[
    "{subject} was {adjective}",
    "{subject} is {adjective} and I love it",
    "I really enjoyed it, {subject} felt {adjective}",
    "Honestly {subject} was {adjective}, highly recommend",
];

const NEGATIVE_TEMPLATES: &[&str] = &[
    "{subject} was {adjective}",
    "{subject} is {adjective} and I hate it",
    "I regret it, {subject} felt {adjective}",
    "Honestly {subject} was {adjective}, never again",
];

const POSITIVE_ADJECTIVES: &[&str] = &[
    "wonderful",
    "excellent",
    "amazing",
    "fantastic",
    "delightful",
    "brilliant",
    "outstanding",
];

const NEGATIVE_ADJECTIVES: &[&str] = &[
    "terrible",
    "awful",
    "disappointing",
    "horrible",
    "dreadful",
    "broken",
    "miserable",
];

/// Deterministic generator of balanced positive/negative sentences.
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce `count` examples alternating positive and negative, so the
    /// label counts never differ by more than one.
    pub fn generate(&mut self, count: usize) -> Vec<LabeledExample> {
        (0..count)
            .map(|idx| {
                let label = if idx % 2 == 0 {
                    Sentiment::Positive
                } else {
                    Sentiment::Negative
                };
                self.sentence(label)
            })
            .collect()
    }

    fn sentence(&mut self, label: Sentiment) -> LabeledExample {
        let (templates, adjectives) = match label {
            Sentiment::Positive => (POSITIVE_TEMPLATES, POSITIVE_ADJECTIVES),
            Sentiment::Negative => (NEGATIVE_TEMPLATES, NEGATIVE_ADJECTIVES),
        };
        let template = self.pick(templates);
        let subject = self.pick(SUBJECTS);
        let adjective = self.pick(adjectives);
        let text = template
            .replace("{subject}", subject)
            .replace("{adjective}", adjective);
        LabeledExample::new(capitalize(&text), label)
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        items[self.rng.random_range(0..items.len())]
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_examples() {
        let first = SyntheticGenerator::new(42).generate(12);
        let second = SyntheticGenerator::new(42).generate(12);
        assert_eq!(first, second);
        assert_ne!(first, SyntheticGenerator::new(43).generate(12));
    }

    #[test]
    fn output_is_balanced() {
        let examples = SyntheticGenerator::new(5).generate(9);
        let positive = examples
            .iter()
            .filter(|example| example.label() == Sentiment::Positive)
            .count();
        assert_eq!(positive, 5);
        assert_eq!(examples.len() - positive, 4);
        assert!(SyntheticGenerator::new(5).generate(0).is_empty());
    }

    #[test]
    fn sentences_use_the_matching_lexicon() {
        for example in SyntheticGenerator::new(1).generate(20) {
            let text = example.text().to_lowercase();
            let lexicon = match example.label() {
                Sentiment::Positive => POSITIVE_ADJECTIVES,
                Sentiment::Negative => NEGATIVE_ADJECTIVES,
            };
            assert!(lexicon.iter().any(|word| text.contains(word)), "{text}");
            assert!(!text.contains('{'));
        }
    }
}
