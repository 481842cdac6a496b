//! Named grass field presets for the game's scene environments.

use std::str::FromStr;

use crate::core::{Error, Result};
use super::config::{FieldConfig, GrassStyle};

/// Preset grass fields used by the built-in environments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldPreset {
    /// Green field around the table.
    Meadow,
    /// Dusk-lit orange field.
    Autumn,
}

impl FieldPreset {
    pub const ALL: [FieldPreset; 2] = [FieldPreset::Meadow, FieldPreset::Autumn];

    pub fn name(self) -> &'static str {
        match self {
            FieldPreset::Meadow => "meadow",
            FieldPreset::Autumn => "autumn",
        }
    }

    /// Full field configuration for this preset.
    pub fn config(self) -> FieldConfig {
        let style = match self {
            FieldPreset::Meadow => GrassStyle::Default,
            FieldPreset::Autumn => GrassStyle::Autumn,
        };
        FieldConfig { style, ..FieldConfig::default() }
    }

    /// Grass field shown by a scene environment, if it has one.
    ///
    /// `"default"` and `"grass"` show the meadow; environments such as
    /// `"void"`, `"clouds"` or `"city"` have no grass.
    pub fn from_environment(environment: &str) -> Option<Self> {
        match environment.trim().to_ascii_lowercase().as_str() {
            "default" | "grass" => Some(FieldPreset::Meadow),
            "autumn" => Some(FieldPreset::Autumn),
            _ => None,
        }
    }
}

impl FromStr for FieldPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
