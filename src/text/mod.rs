//! Deterministic text normalization: case folding, punctuation removal,
//! tokenization, stop-word filtering and stemming.

pub mod porter;
pub mod stopwords;
pub mod tokenize;

pub use stopwords::is_stop_word;
pub use tokenize::word_tokenize;

/// Ordered normalized tokens produced from one text.
pub type TokenSequence = Vec<String>;

/// Tokens at or below this length (in characters) are discarded.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Normalize `text` into a sequence of stems.
///
/// Never fails: empty or whitespace-only input yields an empty sequence.
pub fn normalize(text: &str) -> TokenSequence {
    let folded = strip_punctuation(&text.to_lowercase());
    word_tokenize(&folded)
        .into_iter()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS && !is_stop_word(token))
        .map(|token| porter::stem(&token))
        .collect()
}

/// Delete ASCII punctuation without inserting a separator.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}
