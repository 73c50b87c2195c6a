//! Unit-aware driver.
//!
//! Pulls the string pairs out of a unit, runs the checker team over them,
//! and writes the verdict back: one visible comment per failure and the
//! fuzzy flag. A unit that passes is never touched.

use std::sync::Arc;

use rayon::prelude::*;

use crate::checks::{ErrorHandler, TeeChecker};
use crate::error::Result;
use crate::issues::Failure;
use crate::spelling::SpellCache;
use crate::unit::TranslationUnit;

/// A unit that failed at least one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedUnit {
    /// Position of the unit in the batch.
    pub index: usize,
    pub source: String,
    pub target: String,
    pub failures: Vec<Failure>,
}

impl FlaggedUnit {
    pub fn has_serious(&self) -> bool {
        self.failures.iter().any(Failure::is_serious)
    }
}

/// Outcome of filtering a batch of units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Units that were run through the checks (headers and skipped units excluded).
    pub units_checked: usize,
    pub flagged: Vec<FlaggedUnit>,
}

impl FilterSummary {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.flagged.iter().map(|unit| unit.failures.len()).sum()
    }

    pub fn serious_count(&self) -> usize {
        self.flagged
            .iter()
            .flat_map(|unit| &unit.failures)
            .filter(|failure| failure.is_serious())
            .count()
    }
}

pub struct UnitFilter {
    checker: TeeChecker,
    include_fuzzy: bool,
    include_review: bool,
}

impl UnitFilter {
    pub fn new(checker: TeeChecker) -> Self {
        Self {
            checker,
            include_fuzzy: true,
            include_review: true,
        }
    }

    /// Whether units already marked fuzzy are checked.
    pub fn include_fuzzy(mut self, include: bool) -> Self {
        self.include_fuzzy = include;
        self
    }

    /// Whether units marked for review are checked.
    pub fn include_review(mut self, include: bool) -> Self {
        self.include_review = include;
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.checker = self.checker.with_error_handler(handler);
        self
    }

    pub fn with_spell_cache(mut self, cache: Arc<SpellCache>) -> Self {
        self.checker = self.checker.with_spell_cache(cache);
        self
    }

    pub fn checker(&self) -> &TeeChecker {
        &self.checker
    }

    fn should_check<U: TranslationUnit>(&self, unit: &U) -> bool {
        if unit.is_header() {
            tracing::debug!("skipping header unit");
            return false;
        }
        if !self.include_fuzzy && unit.is_fuzzy() {
            tracing::debug!(source = unit.source(), "skipping fuzzy unit");
            return false;
        }
        if !self.include_review && unit.is_review() {
            tracing::debug!(source = unit.source(), "skipping unit under review");
            return false;
        }
        true
    }

    /// Runs the checks over `unit` without modifying it.
    ///
    /// A plural unit is checked twice: singular against the first form, then
    /// plural against the second. The failures of both passes are kept in
    /// that order.
    pub fn check_unit<U: TranslationUnit>(&self, unit: &U) -> Result<Vec<Failure>> {
        if !self.should_check(unit) {
            return Ok(Vec::new());
        }

        let mut failures = self
            .checker
            .run_unit_filters(unit, unit.source(), unit.target())?;
        if let Some((plural, target)) = unit.plural_pair() {
            failures.extend(self.checker.run_unit_filters(unit, plural, target)?);
        }
        Ok(failures)
    }

    /// Checks `unit` and, if anything failed, annotates it and marks it fuzzy.
    pub fn filter_unit<U: TranslationUnit>(&self, unit: &mut U) -> Result<Vec<Failure>> {
        let failures = self.check_unit(unit)?;
        if !failures.is_empty() {
            for failure in &failures {
                unit.add_visible_comment(failure.annotation());
            }
            unit.mark_fuzzy();
        }
        Ok(failures)
    }

    fn filter_indexed<U: TranslationUnit>(
        &self,
        index: usize,
        unit: &mut U,
    ) -> Result<(bool, Option<FlaggedUnit>)> {
        if !self.should_check(unit) {
            return Ok((false, None));
        }
        // Captured before annotation so the report shows what was checked.
        let source = unit.source().to_string();
        let target = unit.target().to_string();
        let failures = self.filter_unit(unit)?;
        let flagged = (!failures.is_empty()).then_some(FlaggedUnit {
            index,
            source,
            target,
            failures,
        });
        Ok((true, flagged))
    }

    /// Filters every unit in order, stopping at the first broken rule.
    pub fn filter_units<U: TranslationUnit>(&self, units: &mut [U]) -> Result<FilterSummary> {
        let mut summary = FilterSummary::default();
        for (index, unit) in units.iter_mut().enumerate() {
            let (checked, flagged) = self.filter_indexed(index, unit)?;
            summary.units_checked += usize::from(checked);
            summary.flagged.extend(flagged);
        }
        Ok(summary)
    }

    /// Like [`filter_units`](Self::filter_units), with units spread over the
    /// rayon thread pool. Flagged units come back in input order.
    pub fn par_filter_units<U>(&self, units: &mut [U]) -> Result<FilterSummary>
    where
        U: TranslationUnit + Send,
    {
        let results: Vec<(bool, Option<FlaggedUnit>)> = units
            .par_iter_mut()
            .enumerate()
            .map(|(index, unit)| self.filter_indexed(index, unit))
            .collect::<Result<_>>()?;

        let mut summary = FilterSummary::default();
        for (checked, flagged) in results {
            summary.units_checked += usize::from(checked);
            summary.flagged.extend(flagged);
        }
        Ok(summary)
    }
}
