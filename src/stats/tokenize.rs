use once_cell::sync::Lazy;
use regex::Regex;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

/// Splits text into lowercase word tokens
///
/// A token is a maximal run of word characters (letters, digits, underscore).
///
/// # Examples
///
/// ```
/// use sumi_sieve::stats::tokenize;
///
/// assert_eq!(tokenize("Hello, World_42!"), vec!["hello", "world_42"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Counts tokens without allocating them
pub fn count_tokens(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}
