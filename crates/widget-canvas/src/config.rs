//! Canvas configuration

use serde::{Deserialize, Serialize};
use crate::error::{CanvasError, CanvasResult};

/// Default preferred cell size in pixels
pub const DEFAULT_CELL_SIZE: f32 = 180.0;

/// Default minimum cell size in pixels
pub const DEFAULT_MIN_CELL_SIZE: f32 = 150.0;

/// Configuration for a widgets canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Preferred cell size; cells never grow beyond it
    pub desired_cell_size: f32,
    /// Smallest cell size the canvas may shrink to
    pub min_cell_size: f32,
    /// Drop target kind that receives widgets moved into a folder
    pub folder_drop_kind: String,
    /// Draggable kind announced when a widget is grabbed
    pub widget_drag_kind: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            desired_cell_size: DEFAULT_CELL_SIZE,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            folder_drop_kind: "folder".to_string(),
            widget_drag_kind: "widget".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: CanvasConfig =
            serde_json::from_str(json).map_err(|e| CanvasError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that cell sizes are usable
    pub fn validate(&self) -> CanvasResult<()> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.desired_cell_size) || !usable(self.min_cell_size) {
            return Err(CanvasError::InvalidConfig(format!(
                "cell sizes must be positive, got desired={} min={}",
                self.desired_cell_size, self.min_cell_size
            )));
        }
        if self.min_cell_size > self.desired_cell_size {
            return Err(CanvasError::InvalidConfig(format!(
                "min cell size {} exceeds desired cell size {}",
                self.min_cell_size, self.desired_cell_size
            )));
        }
        Ok(())
    }
}
