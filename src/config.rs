use crate::error::SunmapError;
use crate::heat::color::ColorRamp;
use crate::heat::constants::{DEFAULT_GRID_SIZE, DEFAULT_LEGEND_STEPS, MAX_GRID_SIZE};
use crate::sun::path::DEFAULT_SUN_PATH_HOURS;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::warn;

/// Presentation settings shared by the heat grid and the sun path.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```
/// use sunmap_rs::ViewConfig;
///
/// let config = ViewConfig::from_json_str(r#"{ "grid_size": 20 }"#).unwrap();
/// assert_eq!(config.grid_size, 20);
/// assert_eq!(config.sun_path_hours, (6, 18));
///
/// let config = ViewConfig::default().grid_size(8).sun_path_hours(5, 19);
/// assert_eq!(config.hours().count(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub grid_size: u32,
    pub color_ramp: ColorRamp,
    /// Inclusive local hour window sampled for the sun path
    pub sun_path_hours: (u32, u32),
    pub legend_steps: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            color_ramp: ColorRamp::default(),
            sun_path_hours: (*DEFAULT_SUN_PATH_HOURS.start(), *DEFAULT_SUN_PATH_HOURS.end()),
            legend_steps: DEFAULT_LEGEND_STEPS,
        }
    }
}

impl ViewConfig {
    pub fn grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn color_ramp(mut self, ramp: ColorRamp) -> Self {
        self.color_ramp = ramp;
        self
    }

    pub fn sun_path_hours(mut self, start: u32, end: u32) -> Self {
        self.sun_path_hours = (start, end);
        self
    }

    pub fn legend_steps(mut self, steps: usize) -> Self {
        self.legend_steps = steps;
        self
    }

    pub fn hours(&self) -> RangeInclusive<u32> {
        self.sun_path_hours.0..=self.sun_path_hours.1
    }

    /// Checks the grid size is within `1..=MAX_GRID_SIZE` and the hour window
    /// lies within one day and runs forwards.
    pub fn validate(&self) -> Result<(), SunmapError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            warn!(grid_size = self.grid_size, "rejected grid size");
            return Err(SunmapError::ConfigError(format!(
                "grid_size must be between 1 and {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }

        let (start, end) = self.sun_path_hours;
        if start > end || end > 23 {
            warn!(start, end, "rejected sun path hours");
            return Err(SunmapError::ConfigError(format!(
                "sun_path_hours must satisfy start <= end <= 23, got ({}, {})",
                start, end
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SunmapError> {
        let config: ViewConfig = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "invalid view config");
            SunmapError::ConfigError(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SunmapError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| SunmapError::IoError(e.to_string()))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, SunmapError> {
        serde_json::to_string_pretty(self).map_err(|e| SunmapError::ConfigError(e.to_string()))
    }
}
