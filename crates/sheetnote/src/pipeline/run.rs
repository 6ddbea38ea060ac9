//! Top-level orchestrator: preprocess -> staffs -> noteheads.

use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;

use super::OmrResult;
use crate::config::PreprocessConfig;
use crate::detector::{NoteheadDetector, StaffDetector};
use crate::error::OmrError;
use crate::pitch::Clef;
use crate::preprocess::preprocess;

/// Run every stage in order. Any stage error aborts the run; no partial
/// result is returned.
pub(crate) fn run(
    original: Arc<DynamicImage>,
    clef: Clef,
    preprocess_cfg: &PreprocessConfig,
    staff_detector: &dyn StaffDetector,
    notehead_detector: &dyn NoteheadDetector,
) -> Result<OmrResult, OmrError> {
    let start = Instant::now();

    let gray = preprocess(&original, preprocess_cfg)?;

    let staffs = staff_detector.detect_staffs(&gray, clef)?;
    if staffs.is_empty() {
        return Err(OmrError::NoStaffDetected);
    }
    tracing::info!("{} staffs detected", staffs.len());

    let notes = notehead_detector.detect_notes(&gray, &staffs)?;
    drop(gray);

    let elapsed = start.elapsed().as_secs_f64();
    tracing::info!("{} notes in {:.3}s", notes.len(), elapsed);
    Ok(OmrResult::new(notes, staffs, elapsed, original))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use image::GrayImage;

    use crate::detector::{
        ContourNoteheadDetector, ProjectionStaffDetector, ProportionalStaffDetector,
    };
    use crate::note::{DetectedNote, NoteOrigin};
    use crate::staff::StaffInfo;
    use crate::test_utils::{blank_page, draw_notehead, draw_staff_lines};

    struct NoStaffs;

    impl StaffDetector for NoStaffs {
        fn detect_staffs(&self, _: &GrayImage, _: Clef) -> Result<Vec<StaffInfo>, OmrError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct RecordingNotes {
        called: AtomicBool,
    }

    impl NoteheadDetector for RecordingNotes {
        fn detect_notes(
            &self,
            _: &GrayImage,
            _: &[StaffInfo],
        ) -> Result<Vec<DetectedNote>, OmrError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[test]
    fn empty_image_fails_preprocessing() {
        let notes = RecordingNotes::default();
        let err = run(
            Arc::new(DynamicImage::new_luma8(0, 10)),
            Clef::Treble,
            &PreprocessConfig::default(),
            &ProportionalStaffDetector::default(),
            &notes,
        )
        .unwrap_err();
        assert_eq!(err, OmrError::ImageProcessingFailed);
        assert!(!notes.called.load(Ordering::SeqCst));
    }

    #[test]
    fn empty_staff_list_stops_before_noteheads() {
        let notes = RecordingNotes::default();
        let err = run(
            Arc::new(DynamicImage::new_luma8(64, 64)),
            Clef::Treble,
            &PreprocessConfig::default(),
            &NoStaffs,
            &notes,
        )
        .unwrap_err();
        assert_eq!(err, OmrError::NoStaffDetected);
        assert!(!notes.called.load(Ordering::SeqCst));
    }

    #[test]
    fn blank_page_yields_five_fallback_notes() {
        let page = DynamicImage::ImageLuma8(GrayImage::from_pixel(400, 400, image::Luma([255])));
        let result = run(
            Arc::new(page),
            Clef::Bass,
            &PreprocessConfig::default(),
            &ProportionalStaffDetector::default(),
            &ContourNoteheadDetector::default(),
        )
        .unwrap();
        assert_eq!(result.detected_notes().len(), 5);
        assert!(result.is_fallback());
        assert_eq!(result.staffs().len(), 1);
        assert!(result.processing_time() >= 0.0);
        assert_eq!(result.image_size(), [400, 400]);
    }

    #[test]
    fn free_noteheads_are_detected_beside_staff_lines() {
        // staff where the proportional detector expects it on a 400 px page
        let mut page = blank_page(400, 400);
        draw_staff_lines(&mut page, 140, 24, 20, 380);
        // clear of every line: one above the staff, one below it
        draw_notehead(&mut page, (200, 116), 10, 7);
        draw_notehead(&mut page, (260, 260), 10, 7);
        let page = Arc::new(DynamicImage::ImageLuma8(page));

        let staff_detectors: [&dyn StaffDetector; 2] = [
            &ProportionalStaffDetector::default(),
            &ProjectionStaffDetector::default(),
        ];
        for staff_detector in staff_detectors {
            let result = run(
                Arc::clone(&page),
                Clef::Treble,
                &PreprocessConfig::default(),
                staff_detector,
                &ContourNoteheadDetector::default(),
            )
            .unwrap();
            assert!(!result.is_fallback());
            let mut notes = result.detected_notes().to_vec();
            notes.sort_by(|a, b| a.center[1].total_cmp(&b.center[1]));
            assert_eq!(notes.len(), 2);
            assert!(notes.iter().all(|n| n.origin == NoteOrigin::Contour));
            assert!((notes[0].center[0] - 200.0).abs() <= 1.0);
            assert!((notes[1].center[0] - 260.0).abs() <= 1.0);
            // positions -2 and 10
            assert_eq!(notes[0].pitch.to_string(), "D5");
            assert_eq!(notes[1].pitch.to_string(), "C4");
        }
    }
}
