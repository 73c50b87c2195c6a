//! Named project styles.
//!
//! Each preset bundles the accelerator markers and variable conventions of
//! one localization ecosystem. `standard` has none of either.

use std::fmt;
use std::str::FromStr;

use super::model::{CheckerConfig, VariableEnd};
use crate::error::CheckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Standard,
    Mozilla,
    OpenOffice,
    Gnome,
    Kde,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Standard,
        Preset::Mozilla,
        Preset::OpenOffice,
        Preset::Gnome,
        Preset::Kde,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Mozilla => "mozilla",
            Preset::OpenOffice => "openoffice",
            Preset::Gnome => "gnome",
            Preset::Kde => "kde",
        }
    }

    pub fn config(self) -> CheckerConfig {
        use VariableEnd::{Fixed, Literal, UntilNonAlphanumeric};
        let lit = |s: &str| Literal(s.to_string());

        match self {
            Preset::Standard => CheckerConfig::new(),
            Preset::Mozilla => CheckerConfig::new().with_accelerators(['&']).with_variables([
                ("&", lit(";")),
                ("%", lit("%")),
                ("%", Fixed(1)),
                ("$", UntilNonAlphanumeric),
            ]),
            Preset::OpenOffice => CheckerConfig::new().with_accelerators(['~']).with_variables([
                ("&", lit(";")),
                ("%", lit("%")),
                ("%", UntilNonAlphanumeric),
                ("$(", lit(")")),
                ("$", lit("$")),
                ("#", lit("#")),
            ]),
            Preset::Gnome => CheckerConfig::new()
                .with_accelerators(['_'])
                .with_variables([("%", Fixed(1))]),
            // KDE plural forms and translator notes are not configured here;
            // translator notes are stripped by the checks themselves.
            Preset::Kde => CheckerConfig::new()
                .with_accelerators(['&'])
                .with_variables([("%", Fixed(1))]),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CheckError::UnknownPreset(s.to_string()))
    }
}

impl CheckerConfig {
    /// Configuration of the named project style.
    pub fn from_preset(name: &str) -> Result<Self, CheckError> {
        Ok(name.parse::<Preset>()?.config())
    }
}
