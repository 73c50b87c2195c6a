//! Translation units as seen by the checks.
//!
//! File formats live elsewhere; the checks only need the strings, the fuzzy
//! and review state, and somewhere to write annotations.

/// A unit of translation: one original with its translation(s).
pub trait TranslationUnit {
    fn source(&self) -> &str;

    /// The (first) translation.
    fn target(&self) -> &str;

    /// Plural original paired with the second translation form, when the
    /// unit has plural forms. A missing second form reads as empty.
    fn plural_pair(&self) -> Option<(&str, &str)> {
        None
    }

    fn is_header(&self) -> bool {
        false
    }

    fn is_fuzzy(&self) -> bool;

    fn has_type_comment(&self, name: &str) -> bool;

    fn is_review(&self) -> bool {
        self.has_type_comment("review")
    }

    fn add_visible_comment(&mut self, comment: String);

    fn mark_fuzzy(&mut self);
}

/// A gettext-style unit held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoUnit {
    pub source: String,
    pub source_plural: Option<String>,
    /// Translation forms; index 0 is the singular.
    pub targets: Vec<String>,
    pub fuzzy: bool,
    pub header: bool,
    /// Type comments such as `review` (without the leading `#,`/`#(`).
    pub type_comments: Vec<String>,
    /// Annotations added for translators.
    pub visible_comments: Vec<String>,
}

impl PoUnit {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            targets: vec![target.into()],
            ..Self::default()
        }
    }

    pub fn plural<S: Into<String>>(
        source: impl Into<String>,
        source_plural: impl Into<String>,
        targets: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            source: source.into(),
            source_plural: Some(source_plural.into()),
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The PO header: empty msgid.
    pub fn header(content: impl Into<String>) -> Self {
        Self {
            header: true,
            ..Self::new("", content)
        }
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn with_type_comment(mut self, name: impl Into<String>) -> Self {
        self.type_comments.push(name.into());
        self
    }
}

impl TranslationUnit for PoUnit {
    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        self.targets.first().map_or("", String::as_str)
    }

    fn plural_pair(&self) -> Option<(&str, &str)> {
        let plural = self.source_plural.as_deref()?;
        let target = self.targets.get(1).map_or("", String::as_str);
        Some((plural, target))
    }

    fn is_header(&self) -> bool {
        self.header
    }

    fn is_fuzzy(&self) -> bool {
        self.fuzzy
    }

    fn has_type_comment(&self, name: &str) -> bool {
        self.type_comments.iter().any(|c| c == name)
    }

    fn add_visible_comment(&mut self, comment: String) {
        self.visible_comments.push(comment);
    }

    fn mark_fuzzy(&mut self) {
        self.fuzzy = true;
    }
}
