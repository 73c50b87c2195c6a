//! Checker configuration.
//!
//! [`CheckerConfig`] is what the engine consumes. [`FilterConfig`] is the
//! on-disk `.pofilterrc.json` that picks a preset, adds project words and
//! selects rules; it resolves into a `CheckerConfig` and a ready filter.

mod model;
mod presets;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use model::{CheckerConfig, VariableDelimiter, VariableEnd, read_word_list};
pub use presets::Preset;

use crate::checks::{RuleSelection, TeeChecker};
use crate::filter::UnitFilter;

pub const CONFIG_FILE_NAME: &str = ".pofilterrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    /// Added to the preset's markers.
    #[serde(default)]
    pub accelerator_markers: Vec<char>,
    /// Added to the preset's delimiters: `["%", 1]`, `["$", null]`, `["&", ";"]`.
    #[serde(default)]
    pub variable_delimiters: Vec<VariableDelimiter>,
    #[serde(default)]
    pub notranslate_words: Vec<String>,
    #[serde(default)]
    pub musttranslate_words: Vec<String>,
    /// Word list file, relative to the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notranslate_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musttranslate_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_characters: Option<String>,
    #[serde(default)]
    pub exclude_rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_rules: Option<Vec<String>>,
    #[serde(default = "default_include_units")]
    pub include_fuzzy: bool,
    #[serde(default = "default_include_units")]
    pub include_review: bool,
}

fn default_preset() -> String {
    Preset::default().name().to_string()
}

fn default_include_units() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            target_language: None,
            accelerator_markers: Vec::new(),
            variable_delimiters: Vec::new(),
            notranslate_words: Vec::new(),
            musttranslate_words: Vec::new(),
            notranslate_file: None,
            musttranslate_file: None,
            valid_characters: None,
            exclude_rules: Vec::new(),
            include_rules: None,
            include_fuzzy: default_include_units(),
            include_review: default_include_units(),
        }
    }
}

impl FilterConfig {
    /// Validate configuration values.
    ///
    /// Only the preset name is checked; odd markers or delimiters simply
    /// never match.
    pub fn validate(&self) -> Result<()> {
        self.preset
            .parse::<Preset>()
            .with_context(|| format!("Invalid value in 'preset': \"{}\"", self.preset))?;
        Ok(())
    }

    pub fn selection(&self) -> RuleSelection {
        RuleSelection {
            exclude: self.exclude_rules.clone(),
            include: self.include_rules.clone(),
        }
    }

    /// The preset's configuration with this file's additions merged in.
    ///
    /// Word list files are resolved against `base_dir`.
    pub fn checker_config(&self, base_dir: &Path) -> Result<CheckerConfig> {
        let mut config = CheckerConfig::from_preset(&self.preset)?;

        let mut forbidden = self.notranslate_words.clone();
        if let Some(file) = &self.notranslate_file {
            forbidden.extend(read_word_list(&base_dir.join(file))?);
        }
        let mut required = self.musttranslate_words.clone();
        if let Some(file) = &self.musttranslate_file {
            required.extend(read_word_list(&base_dir.join(file))?);
        }

        let mut extra = CheckerConfig::new()
            .with_accelerators(self.accelerator_markers.iter().copied())
            .with_variables(self.variable_delimiters.iter().cloned())
            .with_forbidden_words(forbidden)
            .with_required_words(required);
        if let Some(language) = &self.target_language {
            extra = extra.with_target_language(language);
        }
        if let Some(chars) = &self.valid_characters {
            extra.set_valid_characters(chars.chars());
        }

        config.update(&extra);
        Ok(config)
    }

    /// A filter ready to run over units.
    pub fn build_filter(&self, base_dir: &Path) -> Result<UnitFilter> {
        let checker = TeeChecker::standard(self.checker_config(base_dir)?, &self.selection());
        Ok(UnitFilter::new(checker)
            .include_fuzzy(self.include_fuzzy)
            .include_review(self.include_review))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = FilterConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: FilterConfig,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: FilterConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: FilterConfig::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
