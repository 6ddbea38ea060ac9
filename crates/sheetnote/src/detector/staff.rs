//! Staff detection backends.

use image::GrayImage;

use super::{ensure_raster, StaffDetector};
use crate::config::StaffConfig;
use crate::error::OmrError;
use crate::pitch::Clef;
use crate::staff::StaffInfo;

/// Places a single staff at a fixed proportion of the image height.
///
/// This is a stand-in for line detection: it never inspects pixels beyond
/// checking that the image has any.
#[derive(Debug, Clone)]
pub struct ProportionalStaffDetector {
    /// Top line as a fraction of image height.
    pub top_fraction: f64,
    /// Line spacing as a fraction of image height.
    pub spacing_fraction: f64,
}

impl Default for ProportionalStaffDetector {
    fn default() -> Self {
        Self::from_config(&StaffConfig::default())
    }
}

impl ProportionalStaffDetector {
    pub fn from_config(config: &StaffConfig) -> Self {
        Self {
            top_fraction: config.top_fraction,
            spacing_fraction: config.spacing_fraction,
        }
    }
}

impl StaffDetector for ProportionalStaffDetector {
    fn detect_staffs(&self, gray: &GrayImage, clef: Clef) -> Result<Vec<StaffInfo>, OmrError> {
        ensure_raster(gray)?;
        let height = gray.height() as f64;
        let staff = StaffInfo::new(
            0,
            height * self.top_fraction,
            height * self.spacing_fraction,
            clef,
        )?;
        tracing::debug!(
            "proportional staff: top={:.1} bottom={:.1} spacing={:.1}",
            staff.top_y(),
            staff.bottom_y(),
            staff.spacing()
        );
        Ok(vec![staff])
    }
}

/// Finds staff lines from the horizontal projection of ink pixels.
///
/// A row is a line row when at least `min_line_coverage` of its pixels are
/// darker than `dark_threshold`. Adjacent line rows merge into one line at
/// their mean y. Every run of five lines whose gaps stay within
/// `max_gap_deviation` of their mean becomes a staff.
#[derive(Debug, Clone)]
pub struct ProjectionStaffDetector {
    pub dark_threshold: u8,
    pub min_line_coverage: f32,
    pub max_gap_deviation: f64,
}

impl Default for ProjectionStaffDetector {
    fn default() -> Self {
        Self::from_config(&StaffConfig::default())
    }
}

impl ProjectionStaffDetector {
    pub fn from_config(config: &StaffConfig) -> Self {
        Self {
            dark_threshold: config.dark_threshold,
            min_line_coverage: config.min_line_coverage,
            max_gap_deviation: config.max_gap_deviation,
        }
    }

    fn line_rows(&self, gray: &GrayImage) -> Vec<bool> {
        let (w, h) = gray.dimensions();
        let min_count = (self.min_line_coverage * w as f32).ceil().max(1.0) as usize;
        (0..h)
            .map(|y| {
                let dark = (0..w)
                    .filter(|&x| gray.get_pixel(x, y)[0] < self.dark_threshold)
                    .count();
                dark >= min_count
            })
            .collect()
    }

    /// Group `lines` (sorted y centers) into five-line staffs as
    /// `(top_y, spacing)` pairs.
    fn group_staffs(&self, lines: &[f64]) -> Vec<(f64, f64)> {
        let mut staffs = Vec::new();
        let mut i = 0;
        while i + 5 <= lines.len() {
            let window = &lines[i..i + 5];
            let mean_gap = (window[4] - window[0]) / StaffInfo::SPACES;
            let regular = mean_gap > 0.0
                && window
                    .windows(2)
                    .all(|p| ((p[1] - p[0]) - mean_gap).abs() <= self.max_gap_deviation * mean_gap);
            if regular {
                staffs.push((window[0], mean_gap));
                i += 5;
            } else {
                i += 1;
            }
        }
        staffs
    }
}

/// Merge runs of consecutive `true` rows into their mean row index.
fn merge_runs(rows: &[bool]) -> Vec<f64> {
    let mut lines = Vec::new();
    let mut start: Option<usize> = None;
    for (y, &is_line) in rows.iter().enumerate() {
        match (is_line, start) {
            (true, None) => start = Some(y),
            (false, Some(s)) => {
                lines.push((s + y - 1) as f64 / 2.0);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        lines.push((s + rows.len() - 1) as f64 / 2.0);
    }
    lines
}

impl StaffDetector for ProjectionStaffDetector {
    fn detect_staffs(&self, gray: &GrayImage, clef: Clef) -> Result<Vec<StaffInfo>, OmrError> {
        ensure_raster(gray)?;
        let lines = merge_runs(&self.line_rows(gray));
        tracing::debug!("{} staff line candidates", lines.len());

        let staffs = self
            .group_staffs(&lines)
            .into_iter()
            .enumerate()
            .map(|(id, (top, spacing))| StaffInfo::new(id, top, spacing, clef))
            .collect::<Result<Vec<_>, _>>()?;
        if staffs.is_empty() {
            return Err(OmrError::NoStaffDetected);
        }
        tracing::info!("{} staffs found by projection", staffs.len());
        Ok(staffs)
    }
}
