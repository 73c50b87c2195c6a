use std::path::PathBuf;

use thiserror::Error;

/// A rule that could not produce a verdict.
///
/// This is never used for a translation that merely fails a check; those are
/// reported through [`crate::issues::Outcome`].
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("no spell checker for language '{language}': {reason}")]
    Dictionary { language: String, reason: String },

    #[error("{0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("error in filter {rule}: {source_text:?}, {target_text:?}, {reason}")]
    Rule {
        rule: String,
        source_text: String,
        target_text: String,
        #[source]
        reason: RuleError,
    },

    #[error("Unknown checker style: {0} (expected one of: standard, mozilla, openoffice, gnome, kde)")]
    UnknownPreset(String),

    #[error("Failed to read word list: {path}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CheckError>;
