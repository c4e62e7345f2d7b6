//! Word tokenization with Treebank quote and contraction boundaries.

use regex::Regex;
use std::sync::OnceLock;

/// Typographic quotes and apostrophes become tokens of their own. They are not
/// ASCII, so punctuation stripping leaves them in place.
const QUOTE_PATTERNS: &[&str] = &[r"([«“‘„]|`+)", r"([»”’])"];

/// Merged contractions that the Treebank tokenizer splits into two tokens.
///
/// Only the forms without an apostrophe are listed: punctuation is stripped
/// before tokenization, so `'tis` or `d'ye` can never reach this stage.
const CONTRACTION_PATTERNS: &[&str] = &[
    r"(?i)\b(can)(not)\b",
    r"(?i)\b(gim)(me)\b",
    r"(?i)\b(gon)(na)\b",
    r"(?i)\b(got)(ta)\b",
    r"(?i)\b(lem)(me)\b",
    r"(?i)\b(wan)(na)\b",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("tokenizer regex must compile"))
        .collect()
}

fn quotes() -> &'static [Regex] {
    static QUOTES: OnceLock<Vec<Regex>> = OnceLock::new();
    QUOTES.get_or_init(|| compile(QUOTE_PATTERNS))
}

fn contractions() -> &'static [Regex] {
    static CONTRACTIONS: OnceLock<Vec<Regex>> = OnceLock::new();
    CONTRACTIONS.get_or_init(|| compile(CONTRACTION_PATTERNS))
}

/// Split punctuation-free text into word tokens.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut split = text.to_string();
    for regex in quotes() {
        if regex.is_match(&split) {
            split = regex.replace_all(&split, " $1 ").into_owned();
        }
    }
    for regex in contractions() {
        if regex.is_match(&split) {
            split = regex.replace_all(&split, " $1 $2 ").into_owned();
        }
    }
    split.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(word_tokenize("  good \t day\nnow "), vec!["good", "day", "now"]);
    }

    #[test]
    fn splits_merged_contractions() {
        assert_eq!(
            word_tokenize("i cannot wait gonna love it"),
            vec!["i", "can", "not", "wait", "gon", "na", "love", "it"]
        );
    }

    #[test]
    fn keeps_words_that_only_contain_a_contraction() {
        assert_eq!(word_tokenize("cannoted wannabe"), vec!["cannoted", "wannabe"]);
    }

    #[test]
    fn separates_typographic_quotes() {
        assert_eq!(word_tokenize("“great”"), vec!["“", "great", "”"]);
        assert_eq!(word_tokenize("«superb» „fine“"), vec!["«", "superb", "»", "„", "fine", "“"]);
    }

    #[test]
    fn splits_on_curly_apostrophes() {
        assert_eq!(word_tokenize("i’m"), vec!["i", "’", "m"]);
        assert_eq!(word_tokenize("couldn’t ‘cannot’"), vec!["couldn", "’", "t", "‘", "can", "not", "’"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(word_tokenize("").is_empty());
        assert!(word_tokenize("   ").is_empty());
    }
}
