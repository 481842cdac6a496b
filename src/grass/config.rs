//! Grass field configuration.
//!
//! A `FieldConfig` fully determines one generation run up to the random
//! draws. Configs can be loaded from and saved to JSON; loading validates.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Largest blade count whose vertex indices still fit in `u32`.
pub const MAX_BLADE_COUNT: u32 = u32::MAX / 5;

/// Visual style of the field: picks the blade shader and ground material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrassStyle {
    #[default]
    Default,
    Autumn,
}

impl GrassStyle {
    pub fn name(self) -> &'static str {
        match self {
            GrassStyle::Default => "default",
            GrassStyle::Autumn => "autumn",
        }
    }

    /// Blade shader program the renderer should bind for this style.
    pub fn shader_name(self) -> &'static str {
        match self {
            GrassStyle::Default => "grass",
            GrassStyle::Autumn => "autumn_grass",
        }
    }
}

impl fmt::Display for GrassStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrassStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(GrassStyle::Default),
            "autumn" => Ok(GrassStyle::Autumn),
            _ => Err(Error::UnknownStyle(s.to_string())),
        }
    }
}

/// Input to one grass field generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Center of the circular footprint. Blades stand on its Y plane.
    pub center_position: DVec3,
    /// Diameter of the footprint in world units.
    pub area_diameter: f64,
    pub blade_count: u32,
    /// Full blade width at the base.
    pub blade_width: f64,
    /// Minimum blade height.
    pub blade_height: f64,
    /// Extra height drawn uniformly from `[0, variation)` per blade.
    pub blade_height_variation: f64,
    pub style: GrassStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            center_position: DVec3::new(0.0, -2.0, 0.0),
            area_diameter: 30.0,
            blade_count: 50_000,
            blade_width: 0.5,
            blade_height: 0.8,
            blade_height_variation: 0.3,
            style: GrassStyle::Default,
        }
    }
}

impl FieldConfig {
    /// Radius of the circular footprint.
    pub fn radius(&self) -> f64 {
        self.area_diameter / 2.0
    }

    /// Minimum X/Z corner of the footprint's bounding square.
    pub fn surface_min(&self) -> (f64, f64) {
        (self.center_position.x - self.radius(), self.center_position.z - self.radius())
    }

    /// Maximum X/Z corner of the footprint's bounding square.
    pub fn surface_max(&self) -> (f64, f64) {
        (self.center_position.x + self.radius(), self.center_position.z + self.radius())
    }

    /// Check the generator's input contract.
    ///
    /// `GrassFieldGenerator` does not call this; loaders and tools do.
    pub fn validate(&self) -> Result<()> {
        if !self.center_position.is_finite() {
            return Err(Error::InvalidConfig("center_position must be finite".into()));
        }
        if !(self.area_diameter.is_finite() && self.area_diameter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "area_diameter must be > 0, got {}", self.area_diameter
            )));
        }
        if !(self.blade_width.is_finite() && self.blade_width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "blade_width must be > 0, got {}", self.blade_width
            )));
        }
        if !(self.blade_height.is_finite() && self.blade_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "blade_height must be > 0, got {}", self.blade_height
            )));
        }
        if !(self.blade_height_variation.is_finite() && self.blade_height_variation >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "blade_height_variation must be >= 0, got {}", self.blade_height_variation
            )));
        }
        if self.blade_count > MAX_BLADE_COUNT {
            return Err(Error::InvalidConfig(format!(
                "blade_count {} exceeds u32 index range (max {})",
                self.blade_count, MAX_BLADE_COUNT
            )));
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
