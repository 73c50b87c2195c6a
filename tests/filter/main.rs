use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use pofilter::{
    Failure,
    config::{CONFIG_FILE_NAME, load_config},
    filter::UnitFilter,
};
use tempfile::TempDir;

mod batch;
mod config;
mod report;
mod units;

pub struct FilterTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl FilterTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_config(json: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(CONFIG_FILE_NAME, json)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// The filter described by the project's config file, discovered from `dir`.
    pub fn filter_from(&self, dir: &str) -> Result<UnitFilter> {
        let start = self.project_dir.join(dir);
        fs::create_dir_all(&start)?;
        let loaded = load_config(&start)?;
        loaded.config.build_filter(&loaded.base_dir)
    }

    pub fn filter(&self) -> Result<UnitFilter> {
        self.filter_from("")
    }
}

pub fn rule_names(failures: &[Failure]) -> Vec<&str> {
    failures.iter().map(|f| f.rule.as_str()).collect()
}

pub fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
