//! Per-run settings.

use serde::{Deserialize, Serialize};

use crate::dedup::DEFAULT_TOLERANCE;
use crate::error::GridError;
use crate::sink::{DEFAULT_LAYER_NAME, StrokeStyle};

/// Settings for one grid run. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Per-axis tolerance under which two lines are the same line.
    pub tolerance: f64,
    /// Base name of the layer the lines are drawn on.
    pub layer_name: String,
    pub stroke: StrokeStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            stroke: StrokeStyle::default(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GridError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
