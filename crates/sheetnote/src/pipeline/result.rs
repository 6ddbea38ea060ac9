use std::fmt::Write as _;
use std::sync::Arc;

use image::DynamicImage;

use crate::note::DetectedNote;
use crate::staff::StaffInfo;

/// Outcome of one recognition run.
///
/// Holds a shared handle to the original image for overlay rendering; the
/// image itself is not serialized.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OmrResult {
    detected_notes: Vec<DetectedNote>,
    staffs: Vec<StaffInfo>,
    /// Wall-clock duration of the run in seconds.
    processing_time: f64,
    /// Original image dimensions [width, height].
    image_size: [u32; 2],
    #[serde(skip)]
    original: Arc<DynamicImage>,
}

impl OmrResult {
    pub(crate) fn new(
        detected_notes: Vec<DetectedNote>,
        staffs: Vec<StaffInfo>,
        processing_time: f64,
        original: Arc<DynamicImage>,
    ) -> Self {
        Self {
            detected_notes,
            staffs,
            processing_time: processing_time.max(0.0),
            image_size: [original.width(), original.height()],
            original,
        }
    }

    pub fn detected_notes(&self) -> &[DetectedNote] {
        &self.detected_notes
    }

    pub fn staffs(&self) -> &[StaffInfo] {
        &self.staffs
    }

    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    pub fn image_size(&self) -> [u32; 2] {
        self.image_size
    }

    pub fn original_image(&self) -> &DynamicImage {
        &self.original
    }

    /// True when every note was synthesized rather than detected.
    pub fn is_fallback(&self) -> bool {
        !self.detected_notes.is_empty() && self.detected_notes.iter().all(DetectedNote::is_fallback)
    }

    /// Multi-line report: note count and timing, then one line per note.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Found {} notes in {:.2} seconds\n",
            self.detected_notes.len(),
            self.processing_time
        );
        for (i, note) in self.detected_notes.iter().enumerate() {
            let _ = write!(
                out,
                "\n{}. {} at ({}, {})",
                i + 1,
                note.pitch,
                note.center[0] as i64,
                note.center[1] as i64
            );
        }
        out
    }
}
