//! Contour-based notehead detection with a synthetic fallback.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};

use super::{ensure_raster, NoteheadDetector};
use crate::config::NoteheadConfig;
use crate::error::OmrError;
use crate::note::{BoundingBox, DetectedNote, NoteOrigin};
use crate::pitch::map_pitch;
use crate::preprocess::adjust_contrast;
use crate::staff::StaffInfo;

/// Horizontal positions of the synthesized fallback notes.
const FALLBACK_X: [f64; 5] = [100.0, 150.0, 200.0, 250.0, 300.0];
/// Fallback bounding-box size (width, height).
const FALLBACK_BOX: (f64, f64) = (16.0, 12.0);

/// Whether a `width` x `height` blob is plausible as a notehead on a staff
/// with line `spacing`.
pub fn passes_size_filter(width: f64, height: f64, spacing: f64, config: &NoteheadConfig) -> bool {
    let expected = spacing * config.size_factor;
    let [w_lo, w_hi] = config.width_range;
    let [h_lo, h_hi] = config.height_range;
    if width < expected * w_lo || width > expected * w_hi {
        return false;
    }
    if height < expected * h_lo || height > expected * h_hi {
        return false;
    }
    true
}

/// Dark blobs on a light background, as bounding boxes in image pixels.
fn extract_candidates(gray: &GrayImage, config: &NoteheadConfig) -> Vec<BoundingBox> {
    let boosted = adjust_contrast(gray, config.contrast);
    let (w, h) = boosted.dimensions();
    let ink = GrayImage::from_fn(w, h, |x, y| {
        if boosted.get_pixel(x, y)[0] < config.dark_threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    find_contours::<i32>(&ink)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter_map(|c| BoundingBox::enclosing(c.points.iter().map(|p| [p.x as f64, p.y as f64])))
        .collect()
}

/// Finds notehead-sized contours and maps them to pitches on the first staff.
///
/// When no contour survives the size filter, five evenly spaced notes on the
/// staff lines are synthesized so a staff never yields an empty result.
/// Those carry [`NoteOrigin::Fallback`] and the fallback confidence.
#[derive(Debug, Clone, Default)]
pub struct ContourNoteheadDetector {
    pub config: NoteheadConfig,
}

impl ContourNoteheadDetector {
    pub fn new(config: NoteheadConfig) -> Self {
        Self { config }
    }

    fn note_from_candidate(&self, bbox: BoundingBox, staff: &StaffInfo) -> Option<DetectedNote> {
        if !passes_size_filter(bbox.width, bbox.height, staff.spacing(), &self.config) {
            tracing::trace!(
                "candidate rejected: {:.1}x{:.1} at ({:.1}, {:.1})",
                bbox.width,
                bbox.height,
                bbox.x,
                bbox.y
            );
            return None;
        }
        let center = bbox.center();
        Some(DetectedNote {
            bbox,
            center,
            staff_id: staff.id(),
            pitch: map_pitch(center[1], staff),
            confidence: self.config.detection_confidence,
            origin: NoteOrigin::Contour,
        })
    }

    fn fallback_notes(&self, staff: &StaffInfo) -> Vec<DetectedNote> {
        FALLBACK_X
            .iter()
            .enumerate()
            .map(|(line, &x)| {
                let center = [x, staff.line_y(line)];
                DetectedNote {
                    bbox: BoundingBox::centered(center, FALLBACK_BOX.0, FALLBACK_BOX.1),
                    center,
                    staff_id: staff.id(),
                    pitch: map_pitch(center[1], staff),
                    confidence: self.config.fallback_confidence,
                    origin: NoteOrigin::Fallback,
                }
            })
            .collect()
    }
}

impl NoteheadDetector for ContourNoteheadDetector {
    fn detect_notes(
        &self,
        gray: &GrayImage,
        staffs: &[StaffInfo],
    ) -> Result<Vec<DetectedNote>, OmrError> {
        ensure_raster(gray)?;
        // Only the first staff is used for gating and pitch mapping.
        let Some(staff) = staffs.first() else {
            return Ok(Vec::new());
        };

        let candidates = extract_candidates(gray, &self.config);
        tracing::info!("{} contour candidates found", candidates.len());

        let notes: Vec<DetectedNote> = candidates
            .into_iter()
            .filter_map(|bbox| self.note_from_candidate(bbox, staff))
            .collect();

        if notes.is_empty() {
            tracing::warn!("no notehead candidates passed filtering; using fallback notes");
            return Ok(self.fallback_notes(staff));
        }
        tracing::info!("{} noteheads detected", notes.len());
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{Clef, NoteLetter};
    use crate::test_utils::{blank_page, draw_notehead};
    use approx::assert_relative_eq;

    fn staff_400() -> StaffInfo {
        // geometry the proportional detector yields for a 400 px tall page
        StaffInfo::new(0, 140.0, 24.0, Clef::Treble).unwrap()
    }

    #[test]
    fn size_filter_bounds() {
        let cfg = NoteheadConfig::default();
        // spacing 20 -> expected 16: width in [8, 32], height in [4.8, 24]
        assert!(passes_size_filter(16.0, 12.0, 20.0, &cfg));
        assert!(passes_size_filter(8.0, 12.0, 20.0, &cfg));
        assert!(passes_size_filter(32.0, 12.0, 20.0, &cfg));
        assert!(!passes_size_filter(7.9, 12.0, 20.0, &cfg));
        assert!(!passes_size_filter(32.1, 12.0, 20.0, &cfg));
        assert!(!passes_size_filter(16.0, 4.7, 20.0, &cfg));
        assert!(!passes_size_filter(16.0, 24.1, 20.0, &cfg));
    }

    #[test]
    fn detects_single_notehead() {
        let mut gray = blank_page(400, 400);
        draw_notehead(&mut gray, (200, 164), 10, 7);
        let det = ContourNoteheadDetector::default();
        let notes = det.detect_notes(&gray, &[staff_400()]).unwrap();
        assert_eq!(notes.len(), 1);
        let n = &notes[0];
        assert_eq!(n.origin, NoteOrigin::Contour);
        assert_eq!(n.confidence, 0.7);
        assert_eq!(n.staff_id, 0);
        assert_relative_eq!(n.center[0], 200.0, epsilon = 1.0);
        assert_relative_eq!(n.center[1], 164.0, epsilon = 1.0);
        assert_eq!((n.pitch.letter, n.pitch.octave), (NoteLetter::D, 5));
    }

    #[test]
    fn out_of_range_blobs_fall_back() {
        let mut gray = blank_page(400, 400);
        // far too small and far too wide
        draw_notehead(&mut gray, (50, 50), 1, 1);
        draw_notehead(&mut gray, (200, 300), 120, 8);
        let det = ContourNoteheadDetector::default();
        let notes = det.detect_notes(&gray, &[staff_400()]).unwrap();
        assert_eq!(notes.len(), 5);
        assert!(notes.iter().all(|n| n.is_fallback() && n.confidence == 0.8));
    }

    #[test]
    fn fallback_layout_and_pitches() {
        let det = ContourNoteheadDetector::default();
        let notes = det
            .detect_notes(&blank_page(400, 400), &[staff_400()])
            .unwrap();
        let xs: Vec<f64> = notes.iter().map(|n| n.center[0]).collect();
        let ys: Vec<f64> = notes.iter().map(|n| n.center[1]).collect();
        assert_eq!(xs, vec![100.0, 150.0, 200.0, 250.0, 300.0]);
        assert_eq!(ys, vec![140.0, 164.0, 188.0, 212.0, 236.0]);
        let names: Vec<String> = notes.iter().map(|n| n.pitch.to_string()).collect();
        assert_eq!(names, vec!["F5", "D5", "B4", "G4", "E4"]);
        assert_eq!(notes[0].bbox.width, 16.0);
        assert_eq!(notes[0].bbox.height, 12.0);
    }

    #[test]
    fn only_first_staff_is_used() {
        let second = StaffInfo::new(7, 300.0, 10.0, Clef::Bass).unwrap();
        let det = ContourNoteheadDetector::default();
        let notes = det
            .detect_notes(&blank_page(400, 400), &[staff_400(), second])
            .unwrap();
        assert!(notes.iter().all(|n| n.staff_id == 0));
    }

    #[test]
    fn no_staff_no_notes() {
        let det = ContourNoteheadDetector::default();
        assert!(det.detect_notes(&blank_page(50, 50), &[]).unwrap().is_empty());
    }

    #[test]
    fn empty_raster_fails() {
        let det = ContourNoteheadDetector::default();
        assert_eq!(
            det.detect_notes(&GrayImage::new(0, 0), &[staff_400()]),
            Err(OmrError::ImageProcessingFailed)
        );
    }
}
