//! Editor configuration.

use crate::error::{SlideError, SlideResult};
use serde::{Deserialize, Serialize};

/// Smallest width or height an interactive resize may produce.
pub const MIN_BOX_SIZE: f64 = 10.0;

/// Vertical distance between a selected shape and its floating toolbar.
pub const TOOLBAR_OFFSET: f64 = 40.0;

/// File name offered for JSON exports.
pub const EXPORT_FILE_NAME: &str = "slide.json";

pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 200.0;

/// Font families offered by the text toolbar.
pub const DEFAULT_FONT_FAMILIES: &[&str] = &["Inter", "Arial", "Times New Roman", "Roboto", "Montserrat"];

/// Tunables shared by the store, commands and export.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideConfig {
    pub min_box_size: f64,
    pub toolbar_offset: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub font_families: Vec<String>,
    pub export_file_name: String,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            min_box_size: MIN_BOX_SIZE,
            toolbar_offset: TOOLBAR_OFFSET,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            font_families: DEFAULT_FONT_FAMILIES.iter().map(|f| f.to_string()).collect(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl SlideConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> SlideResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SlideResult<()> {
        if !(self.min_box_size >= 0.0) {
            return Err(SlideError::Config(format!(
                "minBoxSize must be non-negative, got {}",
                self.min_box_size
            )));
        }
        if !(self.min_font_size > 0.0 && self.min_font_size <= self.max_font_size) {
            return Err(SlideError::Config(format!(
                "font size range {}..={} is empty",
                self.min_font_size, self.max_font_size
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(SlideError::Config("exportFileName is empty".to_string()));
        }
        Ok(())
    }

    /// Clamp a requested font size into the allowed range.
    pub fn clamp_font_size(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min_font_size;
        }
        size.max(self.min_font_size).min(self.max_font_size)
    }

    pub fn is_known_font(&self, family: &str) -> bool {
        self.font_families.iter().any(|f| f == family)
    }
}
