use super::{ErrorHandler, Preconditions, RuleSelection, RuleSet, Subject};
use crate::issues::{Outcome, RuleResult};
use crate::unit::TranslationUnit;

/// A rule over the whole unit rather than one string pair.
pub struct UnitRule {
    pub name: &'static str,
    pub doc: &'static str,
    pub check: fn(&dyn TranslationUnit) -> RuleResult,
}

pub static UNIT_RULES: &[UnitRule] = &[
    UnitRule {
        name: "isfuzzy",
        doc: "check if the unit has been marked fuzzy",
        check: isfuzzy,
    },
    UnitRule {
        name: "isreview",
        doc: "check if the unit has been marked review",
        check: isreview,
    },
];

fn isfuzzy(unit: &dyn TranslationUnit) -> RuleResult {
    Ok((!unit.is_fuzzy()).into())
}

fn isreview(unit: &dyn TranslationUnit) -> RuleResult {
    Ok((!unit.is_review()).into())
}

/// Runs the unit-level rules. It has no gates of its own; a gate failing in
/// another member of the same tee still suppresses these.
pub struct UnitChecker {
    preconditions: Preconditions,
    eligible: Vec<&'static str>,
    error_handler: Option<ErrorHandler>,
}

impl UnitChecker {
    pub fn new() -> Self {
        Self::with_selection(&RuleSelection::all())
    }

    pub fn with_selection(selection: &RuleSelection) -> Self {
        Self {
            preconditions: Preconditions::none(),
            eligible: selection.select(UNIT_RULES.iter().map(|rule| rule.name)),
            error_handler: None,
        }
    }

    pub(crate) fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.error_handler = Some(handler);
    }
}

impl Default for UnitChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet for UnitChecker {
    fn defined_rules(&self) -> Vec<(&'static str, &'static str)> {
        UNIT_RULES.iter().map(|rule| (rule.name, rule.doc)).collect()
    }

    fn eligible_rules(&self) -> &[&'static str] {
        &self.eligible
    }

    fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    fn evaluate(&self, rule: &str, subject: &Subject<'_>) -> Option<RuleResult> {
        let rule = UNIT_RULES.iter().find(|r| r.name == rule)?;
        Some(match subject.unit {
            Some(unit) => (rule.check)(unit),
            None => Ok(Outcome::Pass),
        })
    }

    fn error_handler(&self) -> Option<&ErrorHandler> {
        self.error_handler.as_ref()
    }
}
