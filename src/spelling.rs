//! Spell-checker seam for the `spellcheck` rule.
//!
//! No dictionary backend ships with this crate. Callers plug one in through
//! [`SpellChecker`] and hand the checker a [`SpellCache`], which builds at
//! most one dictionary per language and shares it between threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::RuleError;

/// A word the dictionary did not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub word: String,
    /// Byte offset of the word in the checked text.
    pub offset: usize,
    pub suggestions: Vec<String>,
}

pub trait SpellChecker: Send + Sync {
    fn check(&self, text: &str) -> Vec<Misspelling>;
}

pub type DictionaryFactory =
    Box<dyn Fn(&str) -> Result<Arc<dyn SpellChecker>, RuleError> + Send + Sync>;

/// Lazily built spell checkers keyed by language code.
pub struct SpellCache {
    factory: DictionaryFactory,
    dictionaries: Mutex<HashMap<String, Arc<dyn SpellChecker>>>,
}

impl SpellCache {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn SpellChecker>, RuleError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            dictionaries: Mutex::new(HashMap::new()),
        }
    }

    /// The dictionary for `language`, built on first use.
    ///
    /// The lock is held while building so a dictionary is never built twice.
    pub fn get(&self, language: &str) -> Result<Arc<dyn SpellChecker>, RuleError> {
        let mut dictionaries = self
            .dictionaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(dictionary) = dictionaries.get(language) {
            return Ok(Arc::clone(dictionary));
        }
        let dictionary = (self.factory)(language)?;
        tracing::debug!(language, "built spell checker");
        dictionaries.insert(language.to_string(), Arc::clone(&dictionary));
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.dictionaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SpellCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellCache")
            .field("languages", &self.len())
            .finish()
    }
}
