//! Detection backends.
//!
//! The pipeline only talks to the [`StaffDetector`] and [`NoteheadDetector`]
//! traits, so the heuristic implementations here can be swapped for a real
//! computer-vision backend without touching the orchestration or the data
//! model.

pub(crate) mod notehead;
pub(crate) mod staff;

use image::GrayImage;

use crate::error::OmrError;
use crate::note::DetectedNote;
use crate::pitch::Clef;
use crate::staff::StaffInfo;

pub use notehead::{passes_size_filter, ContourNoteheadDetector};
pub use staff::{ProjectionStaffDetector, ProportionalStaffDetector};

/// Finds staffs in a preprocessed grayscale image.
pub trait StaffDetector {
    /// Return the staffs found, top to bottom.
    ///
    /// Implementations report an image without staff structure as
    /// [`OmrError::NoStaffDetected`] or an empty list; the pipeline treats
    /// both as a failed run.
    fn detect_staffs(&self, gray: &GrayImage, clef: Clef) -> Result<Vec<StaffInfo>, OmrError>;
}

/// Finds noteheads and assigns pitches relative to previously found staffs.
pub trait NoteheadDetector {
    fn detect_notes(
        &self,
        gray: &GrayImage,
        staffs: &[StaffInfo],
    ) -> Result<Vec<DetectedNote>, OmrError>;
}

pub(crate) fn ensure_raster(gray: &GrayImage) -> Result<(), OmrError> {
    if gray.width() == 0 || gray.height() == 0 {
        return Err(OmrError::ImageProcessingFailed);
    }
    Ok(())
}
