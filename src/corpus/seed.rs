//! Built-in balanced seed corpus.

use super::label::{LabeledExample, Sentiment};

const POSITIVE_SEED: &[&str] = &[
    "I love this movie, it's fantastic!",
    "This is an amazing product, highly recommend it!",
    "Great service and excellent quality!",
    "I'm so happy with this purchase!",
    "Wonderful experience, will definitely come back!",
    "Best restaurant in town, delicious food!",
    "This book is incredible, couldn't put it down!",
    "Outstanding performance, truly impressive!",
    "Love the design and functionality!",
    "Perfect solution for my needs!",
    "Excellent customer support, very helpful!",
    "This made my day, thank you!",
];

const NEGATIVE_SEED: &[&str] = &[
    "I hate this product, it's terrible!",
    "Worst experience ever, completely disappointed!",
    "This is garbage, waste of money!",
    "Horrible service, very rude staff!",
    "I regret buying this, doesn't work at all!",
    "Awful quality, broke after one day!",
    "This movie is boring and pointless!",
    "Terrible food, couldn't even finish it!",
    "Disappointing results, not worth it!",
    "Bad design, very uncomfortable to use!",
    "Poor customer service, no help at all!",
    "This ruined my day, very frustrating!",
];

/// The 24 built-in examples: twelve positive followed by twelve negative.
pub fn default_seed() -> Vec<LabeledExample> {
    POSITIVE_SEED
        .iter()
        .map(|text| LabeledExample::new(*text, Sentiment::Positive))
        .chain(
            NEGATIVE_SEED
                .iter()
                .map(|text| LabeledExample::new(*text, Sentiment::Negative)),
        )
        .collect()
}
