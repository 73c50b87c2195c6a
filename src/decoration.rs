//! Extractors for the decorative parts of a string.
//!
//! Everything here is a pure function over one string: whitespace and
//! punctuation at either end, accelerator keys, marked variables, numbers,
//! and a few token shapes (functions, emails, URLs). The checks compare
//! what these return for the original and the translation.
//!
//! Positions are byte offsets into the input.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::VariableEnd;
use crate::utils::contains_alphabetic;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").unwrap());

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?:[\w/.:;+~%#$?=&,()\-]+|www\.[\w/.:;+~%#$?=&,()\-]+|ftp:[\w/.:;+~%#?=&,\-]+",
    )
    .unwrap()
});

const DEGREE_SIGN: char = '\u{b0}';

/// Punctuation for the purpose of start/end comparison.
///
/// Anything at or above U+0080 counts as text, so letters of non-Latin
/// scripts are never mistaken for punctuation.
fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && (c as u32) < 0x80
}

pub fn leading_whitespace(s: &str) -> &str {
    let end = s.len() - s.trim_start().len();
    &s[..end]
}

pub fn trailing_whitespace(s: &str) -> &str {
    &s[s.trim_end().len()..]
}

pub fn leading_punctuation(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !is_punctuation(*c))
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

pub fn trailing_punctuation(s: &str) -> &str {
    let start = s
        .char_indices()
        .rev()
        .find(|(_, c)| !is_punctuation(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    &s[start..]
}

/// True if no character in `s` is alphabetic (an empty string qualifies).
pub fn is_pure_punctuation(s: &str) -> bool {
    !contains_alphabetic(s)
}

/// Whether `candidate` may act as an accelerator key.
pub fn is_valid_accelerator(candidate: char, ignore_list: &[char]) -> bool {
    candidate != '_' && candidate.is_alphanumeric() && !ignore_list.contains(&candidate)
}

/// Accelerator occurrence: marker position and the key that follows it.
pub type Accelerator = (usize, char);

/// Finds every use of `marker`, split into valid and invalid accelerators.
///
/// The character right after a marker is consumed with it, so a doubled
/// marker (`&&`) is one invalid accelerator rather than two.
pub fn find_accelerators(
    s: &str,
    marker: char,
    ignore_list: &[char],
) -> (Vec<Accelerator>, Vec<Accelerator>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    let mut chars = s.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c != marker {
            continue;
        }
        let Some((_, candidate)) = chars.next() else {
            break;
        };
        if is_valid_accelerator(candidate, ignore_list) {
            valid.push((pos, candidate));
        } else {
            invalid.push((pos, candidate));
        }
    }

    (valid, invalid)
}

/// `(valid, invalid)` accelerator counts for one marker.
pub fn count_accelerators(s: &str, marker: char, ignore_list: &[char]) -> (usize, usize) {
    let (valid, invalid) = find_accelerators(s, marker, ignore_list);
    (valid.len(), invalid.len())
}

/// Accelerator keys (valid, invalid) without their positions.
pub fn get_accelerators(s: &str, marker: char, ignore_list: &[char]) -> (Vec<char>, Vec<char>) {
    let (valid, invalid) = find_accelerators(s, marker, ignore_list);
    (
        valid.into_iter().map(|(_, c)| c).collect(),
        invalid.into_iter().map(|(_, c)| c).collect(),
    )
}

fn is_acceptable_variable(variable: &str) -> bool {
    if variable.is_empty() {
        return true;
    }
    let stripped: String = variable.chars().filter(|c| *c != '_' && *c != '.').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
}

/// Finds variables opened by `start` and closed according to `end`.
///
/// Returns the position of the start marker and the variable text without
/// its delimiters. With a literal end marker, a later `start` before the
/// matched `end` wins, so `%s and %s%` does not swallow the first `%s`.
/// An empty start marker matches nothing.
pub fn find_marked_variables(
    s: &str,
    start: &str,
    end: &VariableEnd,
    ignore_list: &[&str],
) -> Vec<(usize, String)> {
    let mut variables = Vec::new();
    if start.is_empty() {
        return variables;
    }

    let mut pos = 0;
    while let Some(found) = s[pos..].find(start) {
        let mut start_match = pos + found;
        pos = start_match + start.len();

        let variable = match end {
            VariableEnd::UntilNonAlphanumeric => {
                let rest = &s[pos..];
                let mut end_match = rest
                    .char_indices()
                    .find(|(_, c)| !c.is_alphanumeric())
                    .map_or(s.len(), |(i, _)| pos + i);
                // A marker followed directly by a non-alphanumeric character
                // runs to the end of the string and is then rejected below.
                if end_match == pos {
                    end_match = s.len();
                }
                let variable = &s[pos..end_match];
                pos = end_match;
                variable
            }
            VariableEnd::Fixed(width) => {
                let rest = &s[pos..];
                let end_match = if *width == 0 {
                    pos
                } else {
                    match rest.char_indices().nth(*width - 1) {
                        Some((i, c)) => pos + i + c.len_utf8(),
                        None => break,
                    }
                };
                let variable = &s[pos..end_match];
                pos = end_match;
                variable
            }
            VariableEnd::Literal(end_marker) => {
                let Some(found_end) = s[pos..].find(end_marker.as_str()) else {
                    break;
                };
                let end_match = pos + found_end;
                if let Some(inner) = s[pos..end_match].rfind(start) {
                    let inner_start = pos + inner;
                    start_match = inner_start;
                    pos = inner_start + start.len();
                }
                let variable = &s[pos..end_match];
                pos = end_match + end_marker.len();
                variable
            }
        };

        if !ignore_list.contains(&variable) && is_acceptable_variable(variable) {
            variables.push((start_match, variable.to_string()));
        }
    }

    variables
}

/// Variable names marked with `start`/`end`, in order of appearance.
pub fn get_variables(s: &str, start: &str, end: &VariableEnd) -> Vec<String> {
    find_marked_variables(s, start, end, &[])
        .into_iter()
        .map(|(_, v)| v)
        .collect()
}

/// All numbers in `s`, in order.
///
/// A period or degree sign inside a number keeps the run going; a trailing
/// period that no digit follows is dropped. Separators are compared
/// literally, so `1,000` and `1 000` are different numbers.
pub fn get_numbers(s: &str) -> Vec<String> {
    let mut numbers = Vec::new();
    let mut in_number = false;
    let mut current = String::new();
    let mut carry_period = String::new();

    for c in s.chars() {
        if c.is_numeric() {
            in_number = true;
        } else if in_number && c != '.' && c != DEGREE_SIGN {
            in_number = false;
            if !current.is_empty() {
                numbers.push(std::mem::take(&mut current));
            }
        }

        if in_number {
            if c == DEGREE_SIGN {
                current.push(c);
            } else if c == '.' {
                carry_period.push(c);
            } else {
                current.push_str(&carry_period);
                current.push(c);
                carry_period.clear();
            }
        } else {
            carry_period.clear();
        }
    }
    if in_number && !current.is_empty() {
        numbers.push(current);
    }

    numbers
}

/// Whitespace-separated tokens that look like calls: `open()`.
pub fn get_functions(s: &str) -> Vec<&str> {
    s.split_whitespace().filter(|w| w.ends_with("()")).collect()
}

pub fn get_emails(s: &str) -> Vec<&str> {
    EMAIL_REGEX.find_iter(s).map(|m| m.as_str()).collect()
}

pub fn get_urls(s: &str) -> Vec<&str> {
    URL_REGEX.find_iter(s).map(|m| m.as_str()).collect()
}
