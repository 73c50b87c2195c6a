use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};

/// How a variable that opened with a start marker ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableEnd {
    /// Exactly this many characters after the start marker (`%1`, `%s`).
    Fixed(usize),
    /// Up to the next occurrence of this literal (`&amp;`, `$(NAME)`).
    Literal(String),
    /// Up to the first non-alphanumeric character (`$name`).
    UntilNonAlphanumeric,
}

impl From<&str> for VariableEnd {
    fn from(marker: &str) -> Self {
        VariableEnd::Literal(marker.to_string())
    }
}

impl From<usize> for VariableEnd {
    fn from(width: usize) -> Self {
        VariableEnd::Fixed(width)
    }
}

pub type VariableDelimiter = (String, VariableEnd);

/// Conventions of one localization project that the checks need to know.
///
/// Nothing here is validated: an odd marker simply never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Only consulted by the spell check.
    pub target_language: Option<String>,
    pub accelerator_markers: Vec<char>,
    pub variable_delimiters: Vec<VariableDelimiter>,
    /// Words that must appear untranslated in the target.
    pub forbidden_words: BTreeSet<String>,
    /// Words that must not survive untranslated into the target.
    pub required_words: BTreeSet<String>,
    valid_characters: Option<BTreeSet<char>>,
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }

    pub fn with_accelerators(mut self, markers: impl IntoIterator<Item = char>) -> Self {
        self.accelerator_markers.extend(markers);
        self
    }

    pub fn with_variables<S, E>(mut self, delimiters: impl IntoIterator<Item = (S, E)>) -> Self
    where
        S: Into<String>,
        E: Into<VariableEnd>,
    {
        self.variable_delimiters
            .extend(delimiters.into_iter().map(|(s, e)| (s.into(), e.into())));
        self
    }

    pub fn with_forbidden_words<S: Into<String>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.forbidden_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_required_words<S: Into<String>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.required_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_valid_characters(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.set_valid_characters(chars);
        self
    }

    /// Adds `chars` to the allowed character set: a string's `chars()`, a
    /// `BTreeSet<char>`, or any other characters.
    pub fn set_valid_characters(&mut self, chars: impl IntoIterator<Item = char>) {
        self.valid_characters
            .get_or_insert_with(BTreeSet::new)
            .extend(chars);
    }

    pub fn valid_characters(&self) -> Option<&BTreeSet<char>> {
        self.valid_characters.as_ref()
    }

    /// Characters of `s` outside the allowed set, in order of appearance.
    ///
    /// Empty when no set is configured.
    pub fn disallowed_characters(&self, s: &str) -> Vec<char> {
        match &self.valid_characters {
            Some(valid) => s.chars().filter(|c| !valid.contains(c)).collect(),
            None => Vec::new(),
        }
    }

    /// Merges `other` into `self`.
    ///
    /// Marker and delimiter lists are concatenated as-is; duplicates are harmless.
    pub fn update(&mut self, other: &CheckerConfig) {
        if other.target_language.is_some() {
            self.target_language.clone_from(&other.target_language);
        }
        self.accelerator_markers
            .extend(other.accelerator_markers.iter().copied());
        self.variable_delimiters
            .extend(other.variable_delimiters.iter().cloned());
        self.forbidden_words
            .extend(other.forbidden_words.iter().cloned());
        self.required_words
            .extend(other.required_words.iter().cloned());
        if let Some(valid) = &other.valid_characters {
            self.valid_characters
                .get_or_insert_with(BTreeSet::new)
                .extend(valid.iter().copied());
        }
    }
}

/// Reads a word list: one word per line, surrounding whitespace and blank
/// lines ignored.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
