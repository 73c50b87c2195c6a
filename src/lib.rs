//! Pofilter - translation quality checks
//!
//! Pofilter compares an original string with its translation and reports
//! likely mistakes: lost variables or accelerators, changed punctuation,
//! mismatched brackets, untranslated text, and more. A unit-aware driver
//! writes the findings back onto translation units as comments and marks
//! them fuzzy.
//!
//! ## Module Structure
//!
//! - `checks`: Rule engine (checkers, precondition graph, rule registry)
//! - `config`: Checker configuration, presets and config file loading
//! - `decoration`: Extractors for accelerators, variables, numbers, URLs
//! - `error`: Error types
//! - `filter`: Unit-aware driver and batch filtering
//! - `issues`: Rule outcomes and failures
//! - `prefilters`: String normalizers applied before comparison
//! - `report`: Cargo-style rendering of filter results
//! - `spelling`: Spell checker seam and dictionary cache
//! - `unit`: Translation unit abstraction
//! - `utils`: Shared utility functions

pub mod checks;
pub mod config;
pub mod decoration;
pub mod error;
pub mod filter;
pub mod issues;
pub mod prefilters;
pub mod report;
pub mod spelling;
pub mod unit;
pub mod utils;

pub use checks::{Checker, RuleSelection, TeeChecker, UnitChecker};
pub use config::CheckerConfig;
pub use error::{CheckError, RuleError};
pub use filter::{FilterSummary, UnitFilter};
pub use issues::{Failure, Outcome, Severity};
pub use unit::{PoUnit, TranslationUnit};
