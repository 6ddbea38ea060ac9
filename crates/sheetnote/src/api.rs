//! High-level recognition API.
//!
//! [`Recognizer`] is the primary entry point. It owns an [`OmrConfig`] and
//! the detection backends built from it.

use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

use crate::config::{OmrConfig, StaffMethod};
use crate::detector::{
    ContourNoteheadDetector, NoteheadDetector, ProjectionStaffDetector,
    ProportionalStaffDetector, StaffDetector,
};
use crate::error::OmrError;
use crate::overlay;
use crate::pipeline::{self, OmrResult};
use crate::pitch::Clef;

type StaffBackend = Box<dyn StaffDetector + Send + Sync>;
type NoteheadBackend = Box<dyn NoteheadDetector + Send + Sync>;

/// Sheet-music recognizer.
///
/// Create once, run on many images. Runs share no mutable state, so one
/// recognizer may be used from several threads.
///
/// # Examples
///
/// ```
/// use sheetnote::{demo_sheet, Clef, Recognizer};
///
/// let recognizer = Recognizer::default();
/// let result = recognizer.recognize(demo_sheet(), Clef::Treble).unwrap();
/// // The demo noteheads sit on staff lines, merge with them into one
/// // contour and fail the size filter, so this page yields fallback notes.
/// assert!(result.is_fallback());
/// println!("{}", result.summary());
/// let overlay = recognizer.render_overlay(&result);
/// assert_eq!(overlay.dimensions(), (400, 300));
/// ```
pub struct Recognizer {
    config: OmrConfig,
    staff_detector: StaffBackend,
    notehead_detector: NoteheadBackend,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::with_config(OmrConfig::default())
    }
}

impl Recognizer {
    /// Build the heuristic backends selected by `config`.
    pub fn with_config(config: OmrConfig) -> Self {
        let staff_detector: StaffBackend = match config.staff.method {
            StaffMethod::Proportional => {
                Box::new(ProportionalStaffDetector::from_config(&config.staff))
            }
            StaffMethod::Projection => Box::new(ProjectionStaffDetector::from_config(&config.staff)),
        };
        let notehead_detector = Box::new(ContourNoteheadDetector::new(config.notehead.clone()));
        Self {
            config,
            staff_detector,
            notehead_detector,
        }
    }

    /// Use custom detection backends. `config.staff` and `config.notehead`
    /// are kept for reference but not consulted.
    pub fn with_backends(
        config: OmrConfig,
        staff_detector: impl StaffDetector + Send + Sync + 'static,
        notehead_detector: impl NoteheadDetector + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            staff_detector: Box::new(staff_detector),
            notehead_detector: Box::new(notehead_detector),
        }
    }

    pub fn config(&self) -> &OmrConfig {
        &self.config
    }

    /// Run preprocessing, staff detection and notehead detection on `image`.
    pub fn recognize(
        &self,
        image: impl Into<Arc<DynamicImage>>,
        clef: Clef,
    ) -> Result<OmrResult, OmrError> {
        pipeline::run(
            image.into(),
            clef,
            &self.config.preprocess,
            self.staff_detector.as_ref(),
            self.notehead_detector.as_ref(),
        )
    }

    /// Render `result` with this recognizer's overlay settings.
    pub fn render_overlay(&self, result: &OmrResult) -> RgbaImage {
        overlay::render_overlay_with(result, &self.config.overlay)
    }
}
