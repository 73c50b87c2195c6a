//! Rule outcomes and the failures they turn into.
//!
//! A rule reports its verdict as an [`Outcome`]; the engine records every
//! non-passing outcome as a [`Failure`]. Both kinds of failure share one
//! list, and the [`Severity`] keeps them apart for callers that escalate
//! serious ones.

use crate::error::RuleError;

// ============================================================
// Severity
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The translation could break the application (lost variable, changed escapes).
    Error,
    /// The translation needs a human to look at it.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// ============================================================
// Outcome
// ============================================================

/// Verdict of one rule on one string pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Ordinary failure; `None` means "explain with the rule's own doc".
    Fail(Option<String>),
    /// Failure that must force the unit back to review.
    Serious(String),
}

impl Outcome {
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Fail(Some(message.into()))
    }

    pub fn serious(message: impl Into<String>) -> Self {
        Outcome::Serious(message.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail(None)
        }
    }
}

/// What a rule function returns. `Err` means the rule itself is broken.
pub type RuleResult = Result<Outcome, RuleError>;

// ============================================================
// Failure
// ============================================================

/// One failed rule for one string pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub rule: String,
    pub message: String,
    pub severity: Severity,
}

impl Failure {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn serious(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::new(rule, message)
        }
    }

    pub fn is_serious(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The annotation added to a unit: `"<rule>: <message>"`.
    pub fn annotation(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}
