/// Rules that make no sense once a string is known to be untranslated.
const UNTRANSLATED_DEPENDENTS: &[&str] = &[
    "short",
    "long",
    "unchanged",
    "accelerators",
    "acceleratedvariables",
    "variables",
    "printf",
    "emails",
    "urls",
    "functions",
    "options",
    "escapes",
    "newlines",
    "tabs",
    "singlequoting",
    "doublequoting",
    "doublespacing",
    "puncspacing",
    "startwhitespace",
    "endwhitespace",
    "startpunc",
    "endpunc",
    "purepunc",
    "brackets",
    "sentencecount",
    "startcaps",
    "simplecaps",
    "acronyms",
    "doublewords",
    "numbers",
    "filepaths",
    "xmltags",
    "simpleplurals",
    "validchars",
    "notranslatewords",
    "musttranslatewords",
    "kdecomments",
    "spellcheck",
    "compendiumconflicts",
    "blank",
    "isfuzzy",
    "isreview",
];

/// A whitespace-only translation is as untranslated as an empty one.
const BLANK_DEPENDENTS: &[&str] = &[
    "short",
    "long",
    "unchanged",
    "accelerators",
    "acceleratedvariables",
    "variables",
    "printf",
    "emails",
    "urls",
    "functions",
    "options",
    "escapes",
    "newlines",
    "tabs",
    "singlequoting",
    "doublequoting",
    "doublespacing",
    "puncspacing",
    "startwhitespace",
    "endwhitespace",
    "startpunc",
    "endpunc",
    "purepunc",
    "brackets",
    "sentencecount",
    "startcaps",
    "simplecaps",
    "acronyms",
    "doublewords",
    "numbers",
    "filepaths",
    "xmltags",
    "simpleplurals",
    "validchars",
    "notranslatewords",
    "musttranslatewords",
    "spellcheck",
];

/// A merged translation carries both candidates, so counts cannot line up.
const COMPENDIUM_DEPENDENTS: &[&str] = &[
    "accelerators",
    "brackets",
    "escapes",
    "numbers",
    "startpunc",
    "long",
    "variables",
    "startcaps",
    "sentencecount",
    "simplecaps",
    "doublespacing",
    "endpunc",
    "xmltags",
    "startwhitespace",
    "endwhitespace",
    "singlequoting",
    "doublequoting",
    "filepaths",
    "purepunc",
    "doublewords",
    "printf",
];

/// Gate rules and the rules each one suppresses when it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preconditions {
    gates: Vec<(&'static str, &'static [&'static str])>,
}

impl Preconditions {
    pub fn none() -> Self {
        Self::default()
    }

    /// The graph of the standard checks.
    pub fn standard() -> Self {
        Self {
            gates: vec![
                ("untranslated", UNTRANSLATED_DEPENDENTS),
                ("blank", BLANK_DEPENDENTS),
                ("compendiumconflicts", COMPENDIUM_DEPENDENTS),
            ],
        }
    }

    /// Gates with their dependents, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.gates.iter().copied()
    }

    pub fn is_gate(&self, rule: &str) -> bool {
        self.gates.iter().any(|(gate, _)| *gate == rule)
    }

    pub fn dependents(&self, gate: &str) -> &'static [&'static str] {
        self.gates
            .iter()
            .find(|(name, _)| *name == gate)
            .map(|(_, dependents)| *dependents)
            .unwrap_or_default()
    }
}
