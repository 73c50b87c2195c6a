//! The translation checks engine.
//!
//! A [`Checker`] runs the standard string-pair rules over `(source, target)`;
//! a [`UnitChecker`] runs rules that need the whole unit. A [`TeeChecker`]
//! runs several of them as a team with one shared precondition graph, so a
//! failing gate in one member also silences dependents in another.
//!
//! ## Module Structure
//!
//! - `checker`: the string-pair engine and its prefilter helpers
//! - `preconditions`: gate rules and the dependents they suppress
//! - `standard`: the standard rule registry
//! - `unit`: unit-level rules (fuzzy, review)

mod checker;
mod preconditions;
mod standard;
mod unit;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use enum_dispatch::enum_dispatch;

pub use checker::Checker;
pub use preconditions::Preconditions;
pub use standard::{Rule, RuleFn, STANDARD_RULES};
pub use unit::{UNIT_RULES, UnitChecker, UnitRule};

use crate::config::CheckerConfig;
use crate::error::{CheckError, Result, RuleError};
use crate::issues::{Failure, Outcome, RuleResult};
use crate::spelling::SpellCache;
use crate::unit::TranslationUnit;

/// Decides the verdict for a rule that broke: `(rule, source, target, error) -> passed`.
pub type ErrorHandler = Arc<dyn Fn(&str, &str, &str, &RuleError) -> bool + Send + Sync>;

/// Which rules a checker runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSelection {
    pub exclude: Vec<String>,
    /// When set, only these rules run.
    pub include: Option<Vec<String>>,
}

impl RuleSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn excluding<S: Into<String>>(rules: impl IntoIterator<Item = S>) -> Self {
        Self {
            exclude: rules.into_iter().map(Into::into).collect(),
            include: None,
        }
    }

    pub fn only<S: Into<String>>(rules: impl IntoIterator<Item = S>) -> Self {
        Self {
            exclude: Vec::new(),
            include: Some(rules.into_iter().map(Into::into).collect()),
        }
    }

    pub fn allows(&self, rule: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|names| names.iter().any(|n| n == rule));
        included && !self.exclude.iter().any(|n| n == rule)
    }

    /// Narrows `defined` (in order) to the selected rules.
    pub(crate) fn select(&self, defined: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
        defined.filter(|name| self.allows(name)).collect()
    }
}

/// What a rule looks at: the string pair and, when available, its unit.
#[derive(Clone, Copy)]
pub struct Subject<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub unit: Option<&'a dyn TranslationUnit>,
}

impl<'a> Subject<'a> {
    pub fn pair(source: &'a str, target: &'a str) -> Self {
        Self {
            source,
            target,
            unit: None,
        }
    }
}

/// A set of named rules sharing one precondition graph.
#[enum_dispatch]
pub trait RuleSet {
    /// Every rule this set defines as `(name, doc)`, in evaluation order.
    fn defined_rules(&self) -> Vec<(&'static str, &'static str)>;

    /// Rules that run and get reported, in evaluation order.
    fn eligible_rules(&self) -> &[&'static str];

    fn preconditions(&self) -> &Preconditions;

    /// Runs one rule; `None` if this set does not define it.
    fn evaluate(&self, rule: &str, subject: &Subject<'_>) -> Option<RuleResult>;

    fn error_handler(&self) -> Option<&ErrorHandler>;

    fn doc(&self, rule: &str) -> Option<&'static str> {
        self.defined_rules()
            .into_iter()
            .find(|(name, _)| *name == rule)
            .map(|(_, doc)| doc)
    }

    fn is_eligible(&self, rule: &str) -> bool {
        self.eligible_rules().contains(&rule)
    }
}

/// A member of a [`TeeChecker`].
#[enum_dispatch(RuleSet)]
pub enum CheckerKind {
    Pair(Checker),
    Unit(UnitChecker),
}

/// Runs one rule and turns a non-passing verdict into a [`Failure`].
fn check_rule(set: &dyn RuleSet, rule: &'static str, subject: &Subject<'_>) -> Result<Option<Failure>> {
    let Some(result) = set.evaluate(rule, subject) else {
        return Ok(None);
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(reason) => match set.error_handler() {
            Some(handler) => {
                let passed = handler(rule, subject.source, subject.target, &reason);
                tracing::warn!(rule, error = %reason, passed, "error handler decided broken rule");
                Outcome::from(passed)
            }
            None => {
                return Err(CheckError::Rule {
                    rule: rule.to_string(),
                    source_text: subject.source.to_string(),
                    target_text: subject.target.to_string(),
                    reason,
                });
            }
        },
    };

    let failure = match outcome {
        Outcome::Pass => return Ok(None),
        Outcome::Fail(message) => {
            let message = message.unwrap_or_else(|| set.doc(rule).unwrap_or_default().to_string());
            Failure::new(rule, message)
        }
        Outcome::Serious(message) => Failure::serious(rule, message),
    };
    tracing::debug!(rule, serious = failure.is_serious(), "rule failed");
    Ok(Some(failure))
}

/// The engine loop shared by every checker.
///
/// Gates run first, in graph declaration order, member by member. A gate
/// runs even when it is not eligible; it is then only used to suppress its
/// dependents and never reported. Everything else runs afterwards in
/// registry order unless a failed gate suppressed it.
pub(crate) fn run_rule_sets(sets: &[&dyn RuleSet], subject: &Subject<'_>) -> Result<Vec<Failure>> {
    let mut failures = Vec::new();
    let mut suppressed: HashSet<&'static str> = HashSet::new();

    for set in sets {
        for (gate, dependents) in set.preconditions().iter() {
            if suppressed.contains(gate) {
                continue;
            }
            if let Some(failure) = check_rule(*set, gate, subject)? {
                if set.is_eligible(gate) {
                    failures.push(failure);
                }
                tracing::debug!(gate, suppressed = dependents.len(), "precondition failed");
                suppressed.extend(dependents.iter().copied());
            }
        }
    }

    for set in sets {
        for &rule in set.eligible_rules() {
            if set.preconditions().is_gate(rule) || suppressed.contains(rule) {
                continue;
            }
            if let Some(failure) = check_rule(*set, rule, subject)? {
                failures.push(failure);
            }
        }
    }

    Ok(failures)
}

/// A team of checkers run as one.
pub struct TeeChecker {
    members: Vec<CheckerKind>,
}

impl TeeChecker {
    pub fn new(members: Vec<CheckerKind>) -> Self {
        Self { members }
    }

    /// The standard string checks plus the unit-level checks.
    pub fn standard(config: CheckerConfig, selection: &RuleSelection) -> Self {
        let tee = Self::new(vec![
            Checker::with_selection(config, selection).into(),
            UnitChecker::with_selection(selection).into(),
        ]);
        tee.warn_unknown_rules(selection);
        tee
    }

    fn warn_unknown_rules(&self, selection: &RuleSelection) {
        let Some(include) = &selection.include else {
            return;
        };
        let known: HashSet<&str> = self
            .members
            .iter()
            .flat_map(|m| m.defined_rules())
            .map(|(name, _)| name)
            .collect();
        for name in include.iter().filter(|n| !known.contains(n.as_str())) {
            tracing::warn!(rule = %name, "could not find filter");
        }
    }

    /// Installs `handler` on every member.
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        for member in &mut self.members {
            match member {
                CheckerKind::Pair(checker) => checker.set_error_handler(Arc::clone(&handler)),
                CheckerKind::Unit(checker) => checker.set_error_handler(Arc::clone(&handler)),
            }
        }
        self
    }

    /// Hands `cache` to every string-pair member.
    pub fn with_spell_cache(mut self, cache: Arc<SpellCache>) -> Self {
        for member in &mut self.members {
            if let CheckerKind::Pair(checker) = member {
                checker.set_spell_cache(Arc::clone(&cache));
            }
        }
        self
    }

    pub fn members(&self) -> &[CheckerKind] {
        &self.members
    }

    /// Runs every member over a bare string pair; unit rules pass.
    pub fn run_filters(&self, source: &str, target: &str) -> Result<Vec<Failure>> {
        self.run(&Subject::pair(source, target))
    }

    /// Runs every member over one string pair of `unit`.
    pub fn run_unit_filters(
        &self,
        unit: &dyn TranslationUnit,
        source: &str,
        target: &str,
    ) -> Result<Vec<Failure>> {
        self.run(&Subject {
            source,
            target,
            unit: Some(unit),
        })
    }

    fn run(&self, subject: &Subject<'_>) -> Result<Vec<Failure>> {
        let sets: Vec<&dyn RuleSet> = self.members.iter().map(|m| m as &dyn RuleSet).collect();
        run_rule_sets(&sets, subject)
    }

    /// Union of the members' eligible rules.
    pub fn eligible_rules(&self) -> BTreeSet<&'static str> {
        self.members
            .iter()
            .flat_map(|m| m.eligible_rules().iter().copied())
            .collect()
    }

    /// `(name, doc)` of every eligible rule, sorted by name.
    pub fn rule_docs(&self) -> Vec<(&'static str, &'static str)> {
        let mut docs: Vec<_> = self
            .members
            .iter()
            .flat_map(|m| {
                m.defined_rules()
                    .into_iter()
                    .filter(|(name, _)| m.is_eligible(name))
                    .collect::<Vec<_>>()
            })
            .collect();
        docs.sort();
        docs.dedup_by_key(|(name, _)| *name);
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::PoUnit;
    use pretty_assertions::assert_eq;

    fn rule_names(failures: &[Failure]) -> Vec<&str> {
        failures.iter().map(|f| f.rule.as_str()).collect()
    }

    #[test]
    fn test_selection_allows() {
        let selection = RuleSelection::excluding(["startcaps"]);
        assert!(selection.allows("untranslated"));
        assert!(!selection.allows("startcaps"));

        let selection = RuleSelection::only(["variables", "startcaps"]);
        assert!(selection.allows("variables"));
        assert!(!selection.allows("numbers"));
    }

    #[test]
    fn test_tee_runs_unit_rules_with_unit() {
        let tee = TeeChecker::standard(CheckerConfig::default(), &RuleSelection::all());
        let unit = PoUnit::new("test", "rest").with_fuzzy(true);

        let failures = tee.run_unit_filters(&unit, "test", "rest").unwrap();
        assert_eq!(rule_names(&failures), vec!["isfuzzy"]);

        // Without a unit the unit rules have nothing to look at.
        assert!(tee.run_filters("test", "rest").unwrap().is_empty());
    }

    #[test]
    fn test_tee_shares_suppression_across_members() {
        let tee = TeeChecker::standard(CheckerConfig::default(), &RuleSelection::all());
        let unit = PoUnit::new("Save", "")
            .with_fuzzy(true)
            .with_type_comment("review");

        let failures = tee.run_unit_filters(&unit, "Save", "").unwrap();
        assert_eq!(rule_names(&failures), vec!["untranslated"]);
    }

    #[test]
    fn test_tee_eligible_rules_is_union() {
        let tee = TeeChecker::standard(
            CheckerConfig::default(),
            &RuleSelection::only(["isfuzzy", "numbers"]),
        );
        let eligible: Vec<_> = tee.eligible_rules().into_iter().collect();
        assert_eq!(eligible, vec!["isfuzzy", "numbers"]);
    }

    #[test]
    fn test_rule_docs_sorted() {
        let tee = TeeChecker::standard(CheckerConfig::default(), &RuleSelection::all());
        let docs = tee.rule_docs();
        let names: Vec<_> = docs.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"isreview"));
        assert!(names.contains(&"variables"));
        assert!(docs.iter().all(|(_, doc)| !doc.is_empty()));
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_unknown_include_is_logged() {
        TeeChecker::standard(CheckerConfig::default(), &RuleSelection::only(["nosuchrule"]));
        assert!(logs_contain("could not find filter"));
    }
}
