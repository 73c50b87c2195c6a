//! Text transforms applied to a string before a check looks at it.
//!
//! Each prefilter is a pure `&str -> String` function. The factories return
//! boxed closures so a checker can precompute one filter per configured
//! accelerator marker or variable delimiter pair.

use crate::config::VariableEnd;
use crate::decoration::{find_accelerators, find_marked_variables};

/// Marker opening a translator note (KDE style `_: note\n`).
pub const NOTE_MARKER: &str = "_:";

/// Escaped newline that closes a translator note.
const NOTE_TERMINATOR: &str = "\\n";

/// Words whose apostrophe is part of the word, not a quote.
const WORDS_WITH_PUNCTUATION: &[&str] = &[
    // english
    "can't",
    "couldn't",
    "doesn't",
    "don't",
    "wasn't",
    "won't",
    "you're",
    "user's",
    "system's",
    "writer's",
    // afrikaans
    "'n",
    "makro's",
    "scenario's",
];

pub type Prefilter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Replacement for a matched variable: `(variable, start, end) -> text`.
pub type VariableTransform = fn(&str, &str, &VariableEnd) -> String;

/// Drops a leading translator note up to and including its escaped `\n`.
///
/// A note that is never closed is left alone.
pub fn strip_localization_note(s: &str) -> &str {
    if !s.starts_with(NOTE_MARKER) {
        return s;
    }
    match s.find(NOTE_TERMINATOR) {
        Some(i) => {
            let rest = &s[i + NOTE_TERMINATOR.len()..];
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => s,
    }
}

/// Builds a filter that deletes valid accelerator markers, keeping the key.
pub fn make_accelerator_filter(marker: char) -> Prefilter {
    Box::new(move |s: &str| {
        let (accelerators, _) = find_accelerators(s, marker, &[]);
        let mut filtered = String::with_capacity(s.len());
        let mut last = 0;
        for (pos, key) in accelerators {
            filtered.push_str(&s[last..pos]);
            filtered.push(key);
            last = pos + marker.len_utf8() + key.len_utf8();
        }
        filtered.push_str(&s[last..]);
        filtered
    })
}

/// Builds a filter that replaces every marked variable with `transform`'s output.
pub fn make_variable_filter(start: &str, end: VariableEnd, transform: VariableTransform) -> Prefilter {
    let start = start.to_string();
    let end_len = match &end {
        VariableEnd::Literal(marker) => marker.len(),
        VariableEnd::UntilNonAlphanumeric | VariableEnd::Fixed(_) => 0,
    };
    Box::new(move |s: &str| {
        let variables = find_marked_variables(s, &start, &end, &[]);
        let mut filtered = String::with_capacity(s.len());
        let mut last = 0;
        for (pos, variable) in variables {
            filtered.push_str(&s[last..pos]);
            filtered.push_str(&transform(&variable, &start, &end));
            last = pos + start.len() + variable.len() + end_len;
        }
        filtered.push_str(&s[last..]);
        filtered
    })
}

/// Keeps the variable name and drops its delimiters.
pub fn variable_name(variable: &str, _start: &str, _end: &VariableEnd) -> String {
    variable.to_string()
}

/// Drops the variable entirely.
pub fn remove_variable(_variable: &str, _start: &str, _end: &VariableEnd) -> String {
    String::new()
}

fn without_punctuation(word: &str) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn push_token(normalized: &mut String, token: &str) {
    match normalize_token(token) {
        Some(replacement) => normalized.push_str(&replacement),
        None => normalized.push_str(token),
    }
}

fn normalize_token(token: &str) -> Option<String> {
    if WORDS_WITH_PUNCTUATION.contains(&token.to_lowercase().as_str()) {
        return Some(without_punctuation(token));
    }

    // Quotes around a word stay; only an apostrophe inside it is dropped.
    let core = token.trim_matches('\'');
    if core.is_empty() || !core.contains('\'') {
        return None;
    }
    let leading = token.len() - token.trim_start_matches('\'').len();
    let trailing = token.len() - token.trim_end_matches('\'').len();
    Some(format!(
        "{}{}{}",
        &token[..leading],
        without_punctuation(core),
        &token[token.len() - trailing..]
    ))
}

/// Replaces words containing an apostrophe ("don't", Afrikaans "'n") with
/// their unpunctuated form so quote checks do not count them.
pub fn normalize_punctuated_words(s: &str) -> String {
    if !s.contains('\'') {
        return s.to_string();
    }

    let mut normalized = String::with_capacity(s.len());
    let mut token_start: Option<usize> = None;

    for (i, c) in s.char_indices() {
        let in_word = c.is_alphanumeric() || c == '\'';
        match (in_word, token_start) {
            (true, None) => token_start = Some(i),
            (false, Some(start)) => {
                push_token(&mut normalized, &s[start..i]);
                token_start = None;
                normalized.push(c);
            }
            (false, None) => normalized.push(c),
            (true, Some(_)) => {}
        }
    }
    if let Some(start) = token_start {
        push_token(&mut normalized, &s[start..]);
    }

    normalized
}
