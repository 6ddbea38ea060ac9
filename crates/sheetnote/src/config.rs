//! Tunable parameters for every pipeline stage.
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON file only
//! needs to name the fields it overrides.

use std::path::Path;

/// Grayscale + contrast normalization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Contrast multiplier applied around mid-gray after desaturation.
    pub contrast: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { contrast: 1.5 }
    }
}

/// Staff detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffMethod {
    /// One staff at a fixed fraction of the image height.
    #[default]
    Proportional,
    /// Horizontal projection of dark pixels, grouped into five-line staffs.
    Projection,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaffConfig {
    pub method: StaffMethod,
    /// Top line position as a fraction of image height (proportional method).
    pub top_fraction: f64,
    /// Line spacing as a fraction of image height (proportional method).
    pub spacing_fraction: f64,
    /// Pixels strictly below this intensity count as ink (projection method).
    pub dark_threshold: u8,
    /// Minimum fraction of a row that must be ink for it to be a staff line.
    pub min_line_coverage: f32,
    /// Maximum relative deviation of a line gap from the staff's mean gap.
    pub max_gap_deviation: f64,
}

impl Default for StaffConfig {
    fn default() -> Self {
        Self {
            method: StaffMethod::Proportional,
            top_fraction: 0.35,
            spacing_fraction: 0.06,
            dark_threshold: 128,
            min_line_coverage: 0.5,
            max_gap_deviation: 0.25,
        }
    }
}

/// Notehead candidate extraction and size gating.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoteheadConfig {
    /// Extra contrast applied before binarization.
    pub contrast: f32,
    /// Pixels strictly below this intensity are treated as ink.
    pub dark_threshold: u8,
    /// Expected notehead size as a multiple of staff spacing.
    pub size_factor: f64,
    /// Accepted bounding-box width range, as multiples of the expected size.
    pub width_range: [f64; 2],
    /// Accepted bounding-box height range, as multiples of the expected size.
    pub height_range: [f64; 2],
    /// Confidence assigned to contour detections.
    pub detection_confidence: f32,
    /// Confidence assigned to synthesized fallback notes.
    pub fallback_confidence: f32,
}

impl Default for NoteheadConfig {
    fn default() -> Self {
        Self {
            contrast: 1.5,
            dark_threshold: 128,
            size_factor: 0.8,
            width_range: [0.5, 2.0],
            height_range: [0.3, 1.5],
            detection_confidence: 0.7,
            fallback_confidence: 0.8,
        }
    }
}

/// Label overlay layout.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Pitch label glyph height (pixels).
    pub font_size: f32,
    /// Status badge glyph height (pixels).
    pub badge_font_size: f32,
    /// Horizontal distance between consecutive labels.
    pub label_pitch_px: i32,
    /// Vertical position of the label band as a fraction of image height.
    pub label_band_fraction: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            badge_font_size: 7.0,
            label_pitch_px: 60,
            label_band_fraction: 0.75,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OmrConfig {
    pub preprocess: PreprocessConfig,
    pub staff: StaffConfig,
    pub notehead: NoteheadConfig,
    pub overlay: OverlayConfig,
}

impl OmrConfig {
    /// Load a (partial) configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
