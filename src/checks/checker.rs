use std::sync::Arc;

use super::standard::{Rule, STANDARD_RULES};
use super::{ErrorHandler, Preconditions, RuleSelection, RuleSet, Subject, run_rule_sets};
use crate::config::CheckerConfig;
use crate::error::Result;
use crate::issues::{Failure, RuleResult};
use crate::prefilters::{
    Prefilter, make_accelerator_filter, make_variable_filter, normalize_punctuated_words,
    remove_variable, variable_name,
};
use crate::spelling::SpellCache;

/// Runs the standard string-pair rules under one project configuration.
///
/// The prefilters are built once from the configuration: one per accelerator
/// marker and two per variable delimiter pair (keep the name, drop it all).
pub struct Checker {
    config: CheckerConfig,
    accelerator_filters: Vec<Prefilter>,
    variable_filters: Vec<Prefilter>,
    variable_removers: Vec<Prefilter>,
    preconditions: Preconditions,
    eligible: Vec<&'static str>,
    error_handler: Option<ErrorHandler>,
    spell_cache: Option<Arc<SpellCache>>,
}

impl Checker {
    /// A checker with every standard rule eligible.
    pub fn new(config: CheckerConfig) -> Self {
        Self::with_selection(config, &RuleSelection::all())
    }

    pub fn with_selection(config: CheckerConfig, selection: &RuleSelection) -> Self {
        let accelerator_filters = config
            .accelerator_markers
            .iter()
            .map(|marker| make_accelerator_filter(*marker))
            .collect();
        let variable_filters = config
            .variable_delimiters
            .iter()
            .map(|(start, end)| make_variable_filter(start, end.clone(), variable_name))
            .collect();
        let variable_removers = config
            .variable_delimiters
            .iter()
            .map(|(start, end)| make_variable_filter(start, end.clone(), remove_variable))
            .collect();

        Self {
            accelerator_filters,
            variable_filters,
            variable_removers,
            preconditions: Preconditions::standard(),
            eligible: selection.select(STANDARD_RULES.iter().map(|rule| rule.name)),
            error_handler: None,
            spell_cache: None,
            config,
        }
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.set_error_handler(handler);
        self
    }

    pub fn with_spell_cache(mut self, cache: Arc<SpellCache>) -> Self {
        self.set_spell_cache(cache);
        self
    }

    pub(crate) fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.error_handler = Some(handler);
    }

    pub(crate) fn set_spell_cache(&mut self, cache: Arc<SpellCache>) {
        self.spell_cache = Some(cache);
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn spell_cache(&self) -> Option<&SpellCache> {
        self.spell_cache.as_deref()
    }

    /// Removes accelerator markers, keeping the accelerated character.
    pub fn filter_accelerators(&self, s: &str) -> String {
        apply_all(&self.accelerator_filters, s)
    }

    /// Replaces every configured variable with its bare name.
    pub fn filter_variables(&self, s: &str) -> String {
        apply_all(&self.variable_filters, s)
    }

    /// Removes every configured variable.
    pub fn remove_variables(&self, s: &str) -> String {
        apply_all(&self.variable_removers, s)
    }

    pub fn filter_punctuated_words(&self, s: &str) -> String {
        normalize_punctuated_words(s)
    }

    /// Runs every eligible rule over one pair.
    pub fn run_filters(&self, source: &str, target: &str) -> Result<Vec<Failure>> {
        run_rule_sets(&[self as &dyn RuleSet], &Subject::pair(source, target))
    }

    /// Runs one rule directly, ignoring eligibility and preconditions.
    pub fn run_rule(&self, name: &str, source: &str, target: &str) -> Option<RuleResult> {
        find_rule(name).map(|rule| (rule.check)(self, source, target))
    }

    /// `(name, doc)` of every eligible rule, sorted by name.
    pub fn rule_docs(&self) -> Vec<(&'static str, &'static str)> {
        let mut docs: Vec<_> = STANDARD_RULES
            .iter()
            .filter(|rule| self.eligible.contains(&rule.name))
            .map(|rule| (rule.name, rule.doc))
            .collect();
        docs.sort();
        docs
    }
}

fn apply_all(filters: &[Prefilter], s: &str) -> String {
    filters
        .iter()
        .fold(s.to_string(), |filtered, filter| filter(&filtered))
}

fn find_rule(name: &str) -> Option<&'static Rule> {
    STANDARD_RULES.iter().find(|rule| rule.name == name)
}

impl RuleSet for Checker {
    fn defined_rules(&self) -> Vec<(&'static str, &'static str)> {
        STANDARD_RULES
            .iter()
            .map(|rule| (rule.name, rule.doc))
            .collect()
    }

    fn eligible_rules(&self) -> &[&'static str] {
        &self.eligible
    }

    fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    fn evaluate(&self, rule: &str, subject: &Subject<'_>) -> Option<RuleResult> {
        self.run_rule(rule, subject.source, subject.target)
    }

    fn error_handler(&self) -> Option<&ErrorHandler> {
        self.error_handler.as_ref()
    }

    fn doc(&self, rule: &str) -> Option<&'static str> {
        find_rule(rule).map(|rule| rule.doc)
    }
}
