//! Porter suffix-stripping stemmer, in the NLTK-extended variant.
//!
//! Words are stemmed as `char` slices, so accented words go through the same
//! rules as plain ASCII ones. Any letter outside `aeiou` is a consonant, and
//! `y` is a consonant when it starts the word or follows a vowel.

/// Inflected forms the suffix rules would mangle, with their fixed stems.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

/// `(suffix, replacement, condition on the remaining stem)`.
///
/// Within one list only the first rule whose suffix matches is considered;
/// if its condition fails the word is left as is.
type Rule = (&'static str, &'static str, fn(&[char]) -> bool);

const STEP2_RULES: &[Rule] = &[
    ("ational", "ate", has_positive_measure),
    ("tional", "tion", has_positive_measure),
    ("enci", "ence", has_positive_measure),
    ("anci", "ance", has_positive_measure),
    ("izer", "ize", has_positive_measure),
    ("bli", "ble", has_positive_measure),
    ("alli", "al", has_positive_measure),
    ("entli", "ent", has_positive_measure),
    ("eli", "e", has_positive_measure),
    ("ousli", "ous", has_positive_measure),
    ("ization", "ize", has_positive_measure),
    ("ation", "ate", has_positive_measure),
    ("ator", "ate", has_positive_measure),
    ("alism", "al", has_positive_measure),
    ("iveness", "ive", has_positive_measure),
    ("fulness", "ful", has_positive_measure),
    ("ousness", "ous", has_positive_measure),
    ("aliti", "al", has_positive_measure),
    ("iviti", "ive", has_positive_measure),
    ("biliti", "ble", has_positive_measure),
    ("fulli", "ful", has_positive_measure),
    ("lessli", "less", has_positive_measure),
    // The `l` stays with the stem so short roots such as `geo` still qualify.
    ("logi", "log", positive_measure_with_l),
];

const STEP3_RULES: &[Rule] = &[
    ("icate", "ic", has_positive_measure),
    ("ative", "", has_positive_measure),
    ("alize", "al", has_positive_measure),
    ("iciti", "ic", has_positive_measure),
    ("ical", "ic", has_positive_measure),
    ("ful", "", has_positive_measure),
    ("ness", "", has_positive_measure),
];

const STEP4_RULES: &[Rule] = &[
    ("al", "", measure_above_one),
    ("ance", "", measure_above_one),
    ("ence", "", measure_above_one),
    ("er", "", measure_above_one),
    ("ic", "", measure_above_one),
    ("able", "", measure_above_one),
    ("ible", "", measure_above_one),
    ("ant", "", measure_above_one),
    ("ement", "", measure_above_one),
    ("ment", "", measure_above_one),
    ("ent", "", measure_above_one),
    ("ion", "", measure_above_one_after_s_or_t),
    ("ou", "", measure_above_one),
    ("ism", "", measure_above_one),
    ("ate", "", measure_above_one),
    ("iti", "", measure_above_one),
    ("ous", "", measure_above_one),
    ("ive", "", measure_above_one),
    ("ize", "", measure_above_one),
];

/// Stem a lower-case word. Words of two characters or fewer are returned
/// unchanged.
pub fn stem(word: &str) -> String {
    if let Some((_, fixed)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
        return (*fixed).to_string();
    }
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return word.to_string();
    }
    let steps: [fn(Vec<char>) -> Vec<char>; 8] =
        [step1a, step1b, step1c, step2, step3, step4, step5a, step5b];
    steps
        .iter()
        .fold(chars, |current, step| step(current))
        .into_iter()
        .collect()
}

fn is_consonant(word: &[char], i: usize) -> bool {
    match word[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-to-consonant transitions in `stem`.
fn measure(stem: &[char]) -> usize {
    (1..stem.len())
        .filter(|&i| !is_consonant(stem, i - 1) && is_consonant(stem, i))
        .count()
}

fn has_positive_measure(stem: &[char]) -> bool {
    measure(stem) > 0
}

fn measure_above_one(stem: &[char]) -> bool {
    measure(stem) > 1
}

fn measure_above_one_after_s_or_t(stem: &[char]) -> bool {
    measure(stem) > 1 && matches!(stem.last(), Some('s' | 't'))
}

fn with_trailing_l(stem: &[char]) -> Vec<char> {
    let mut extended = stem.to_vec();
    extended.push('l');
    extended
}

fn positive_measure_with_l(stem: &[char]) -> bool {
    has_positive_measure(&with_trailing_l(stem))
}

fn contains_vowel(stem: &[char]) -> bool {
    (0..stem.len()).any(|i| !is_consonant(stem, i))
}

fn ends_double_consonant(word: &[char]) -> bool {
    let len = word.len();
    len >= 2 && word[len - 1] == word[len - 2] && is_consonant(word, len - 1)
}

/// Consonant-vowel-consonant ending whose last letter is not `w`, `x` or
/// `y`; a two-letter vowel-consonant word also qualifies.
fn ends_cvc(word: &[char]) -> bool {
    let len = word.len();
    if len == 2 {
        return !is_consonant(word, 0) && is_consonant(word, 1);
    }
    len >= 3
        && is_consonant(word, len - 3)
        && !is_consonant(word, len - 2)
        && is_consonant(word, len - 1)
        && !matches!(word[len - 1], 'w' | 'x' | 'y')
}

/// Length of the stem left after removing `suffix`, if `word` ends with it.
/// Suffixes are ASCII, so their byte length is their char length.
fn stem_len(word: &[char], suffix: &str) -> Option<usize> {
    let start = word.len().checked_sub(suffix.len())?;
    word[start..]
        .iter()
        .copied()
        .eq(suffix.chars())
        .then_some(start)
}

fn replace(word: &[char], stem_len: usize, replacement: &str) -> Vec<char> {
    word[..stem_len].iter().copied().chain(replacement.chars()).collect()
}

fn apply_rules(word: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for &(suffix, replacement, condition) in rules {
        if let Some(n) = stem_len(&word, suffix) {
            if condition(&word[..n]) {
                return replace(&word, n, replacement);
            }
            return word;
        }
    }
    word
}

fn step1a(word: Vec<char>) -> Vec<char> {
    if word.len() == 4 {
        if let Some(n) = stem_len(&word, "ies") {
            return replace(&word, n, "ie");
        }
    }
    for (suffix, replacement) in [("sses", "ss"), ("ies", "i"), ("ss", "ss"), ("s", "")] {
        if let Some(n) = stem_len(&word, suffix) {
            return replace(&word, n, replacement);
        }
    }
    word
}

fn step1b(word: Vec<char>) -> Vec<char> {
    if let Some(n) = stem_len(&word, "ied") {
        let replacement = if word.len() == 4 { "ie" } else { "i" };
        return replace(&word, n, replacement);
    }
    if let Some(n) = stem_len(&word, "eed") {
        if measure(&word[..n]) > 0 {
            return replace(&word, n, "ee");
        }
        return word;
    }
    let Some(n) = ["ed", "ing"]
        .iter()
        .filter_map(|suffix| stem_len(&word, suffix))
        .find(|&n| contains_vowel(&word[..n]))
    else {
        return word;
    };
    let mut stem = word[..n].to_vec();
    for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
        if let Some(n) = stem_len(&stem, suffix) {
            return replace(&stem, n, replacement);
        }
    }
    if ends_double_consonant(&stem) {
        if !matches!(stem.last(), Some('l' | 's' | 'z')) {
            stem.pop();
        }
        return stem;
    }
    if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

/// Terminal `y` becomes `i` only after a consonant that is not the first
/// letter.
fn step1c(word: Vec<char>) -> Vec<char> {
    match stem_len(&word, "y") {
        Some(n) if n > 1 && is_consonant(&word, n - 1) => replace(&word, n, "i"),
        _ => word,
    }
}

fn step2(word: Vec<char>) -> Vec<char> {
    if let Some(n) = stem_len(&word, "alli") {
        if has_positive_measure(&word[..n]) {
            return step2(replace(&word, n, "al"));
        }
    }
    apply_rules(word, STEP2_RULES)
}

fn step3(word: Vec<char>) -> Vec<char> {
    apply_rules(word, STEP3_RULES)
}

fn step4(word: Vec<char>) -> Vec<char> {
    apply_rules(word, STEP4_RULES)
}

fn step5a(word: Vec<char>) -> Vec<char> {
    if let Some(n) = stem_len(&word, "e") {
        let stem = &word[..n];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_vec();
        }
    }
    word
}

fn step5b(word: Vec<char>) -> Vec<char> {
    match stem_len(&word, "ll") {
        Some(n) if measure(&with_trailing_l(&word[..n])) > 1 => replace(&word, n, "l"),
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::stem;

    fn assert_stems(cases: &[(&str, &str)]) {
        for (word, expected) in cases {
            assert_eq!(stem(word), *expected, "stem({word})");
        }
    }

    #[test]
    fn strips_plurals_and_past_participles() {
        assert_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "tie"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("filing", "file"),
            ("tied", "tie"),
            ("cried", "cri"),
        ]);
    }

    #[test]
    fn maps_terminal_y_only_after_a_consonant() {
        assert_stems(&[
            ("happy", "happi"),
            ("truly", "truli"),
            ("day", "day"),
            ("enjoy", "enjoy"),
            ("cry", "cri"),
        ]);
    }

    #[test]
    fn reduces_derivational_suffixes() {
        assert_stems(&[
            ("relational", "relat"),
            ("generalization", "gener"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("revival", "reviv"),
            ("allowance", "allow"),
            ("adjustment", "adjust"),
            ("controll", "control"),
            ("roll", "roll"),
            ("generate", "gener"),
            ("rate", "rate"),
            ("cease", "ceas"),
        ]);
    }

    #[test]
    fn applies_adverb_extensions() {
        assert_stems(&[
            ("gratefully", "grate"),
            ("hopelessly", "hopeless"),
            ("absolutely", "absolut"),
        ]);
    }

    #[test]
    fn uses_fixed_stems_for_irregular_forms() {
        assert_stems(&[
            ("dying", "die"),
            ("lying", "lie"),
            ("sky", "sky"),
            ("skies", "sky"),
            ("news", "news"),
            ("proceed", "proceed"),
        ]);
    }

    #[test]
    fn stems_sentiment_vocabulary() {
        assert_stems(&[
            ("wonderful", "wonder"),
            ("excellent", "excel"),
            ("terrible", "terribl"),
            ("disappointed", "disappoint"),
            ("amazing", "amaz"),
            ("boring", "bore"),
        ]);
    }

    #[test]
    fn leaves_short_words_and_stems_accented_ones() {
        assert_stems(&[("is", "is"), ("ies", "i"), ("açaí", "açaí"), ("cafés", "café")]);
    }
}
