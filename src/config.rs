//! Editor configuration
//!
//! Tunables shared by the timeline and the edit session. The JavaScript side
//! passes a (possibly partial) object; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::error::{AnnotatorError, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Decimal places kept when deriving marker durations
    pub duration_precision: u32,

    /// Curator name used when the save form leaves it blank
    pub default_curator: String,

    /// Written to `annotation_tools` of saved annotations
    pub annotation_tool: String,

    /// Suggested file name for exported documents
    pub export_file_name: String,

    /// Zoom multiplier applied when entering edit mode (divided on exit)
    pub edit_zoom_factor: f64,

    pub min_tempo: u32,
    pub max_tempo: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            duration_precision: 3,
            default_curator: "Anonymous".to_string(),
            annotation_tool: "ChordFinder".to_string(),
            export_file_name: "modified_annotations.jams".to_string(),
            edit_zoom_factor: 2.0,
            min_tempo: 30,
            max_tempo: 248,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(text)
            .map_err(|e| AnnotatorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.min_tempo == 0 || self.min_tempo > self.max_tempo {
            return Err(AnnotatorError::InvalidConfig(format!(
                "Invalid tempo range: {}..{}",
                self.min_tempo, self.max_tempo
            )));
        }
        if !(self.edit_zoom_factor.is_finite() && self.edit_zoom_factor > 0.0) {
            return Err(AnnotatorError::InvalidConfig(format!(
                "Invalid edit zoom factor: {}",
                self.edit_zoom_factor
            )));
        }
        if self.duration_precision > 9 {
            return Err(AnnotatorError::InvalidConfig(format!(
                "Duration precision {} exceeds 9 decimals",
                self.duration_precision
            )));
        }
        Ok(())
    }
}
