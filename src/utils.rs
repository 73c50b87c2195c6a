//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use pofilter::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Number of non-overlapping occurrences of `pattern` in `text`.
pub fn count_occurrences(text: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    text.matches(pattern).count()
}

/// True when every pattern occurs the same number of times in both strings.
pub fn counts_match(str1: &str, str2: &str, patterns: &[&str]) -> bool {
    patterns
        .iter()
        .all(|p| count_occurrences(str1, p) == count_occurrences(str2, p))
}

/// A word written entirely in capitals: it has at least one cased
/// character and no lowercase ones ("HTML", "MP3").
pub fn is_upper_word(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Length in characters, which is what all length heuristics compare.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
