//! sheetnote: heuristic optical music recognition for photographed sheet music.
//!
//! Given a page image and a clef, the pipeline finds a staff, locates
//! notehead-shaped blobs and maps each one's vertical position to a pitch.
//! The stages are:
//!
//! 1. **Preprocess** – desaturation and contrast boost.
//! 2. **Staff** – staff geometry (fixed-proportion placeholder by default,
//!    horizontal-projection line finder optionally).
//! 3. **Notehead** – contour extraction, size gating against staff spacing,
//!    pitch mapping; synthetic fallback notes when nothing survives.
//! 4. **Overlay** – pitch labels drawn onto a copy of the original image.
//!
//! # Public API
//! - [`Recognizer`] as the entry point, configured by [`OmrConfig`]
//! - [`StaffDetector`] / [`NoteheadDetector`] for plugging in other backends
//! - [`map_pitch`] and the pitch/staff value types
//! - [`render_overlay`] for verification images

mod api;
mod config;
mod demo;
mod detector;
mod error;
mod note;
mod overlay;
mod pipeline;
mod pitch;
mod preprocess;
mod staff;

#[cfg(test)]
mod test_utils;

pub use api::Recognizer;
pub use config::{
    NoteheadConfig, OmrConfig, OverlayConfig, PreprocessConfig, StaffConfig, StaffMethod,
};
pub use demo::demo_sheet;
pub use detector::{
    passes_size_filter, ContourNoteheadDetector, NoteheadDetector, ProjectionStaffDetector,
    ProportionalStaffDetector, StaffDetector,
};
pub use error::OmrError;
pub use note::{BoundingBox, DetectedNote, NoteOrigin};
pub use overlay::{render_overlay, render_overlay_with};
pub use pipeline::OmrResult;
pub use pitch::{map_pitch, staff_position, Accidental, Clef, NoteLetter, Pitch};
pub use preprocess::preprocess;
pub use staff::StaffInfo;
