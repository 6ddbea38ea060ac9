use serde::Serialize;

use crate::error::OmrError;
use crate::pitch::Clef;

/// Geometry of a single five-line staff in image pixel coordinates.
///
/// `bottom_y` is always `top_y + 4 * spacing`; construct through
/// [`StaffInfo::new`] which derives it and rejects invalid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaffInfo {
    id: usize,
    top_y: f64,
    bottom_y: f64,
    spacing: f64,
    clef: Clef,
}

impl StaffInfo {
    /// Number of spaces between the five staff lines.
    pub const SPACES: f64 = 4.0;

    pub fn new(id: usize, top_y: f64, spacing: f64, clef: Clef) -> Result<Self, OmrError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(OmrError::InvalidStaffSpacing(spacing));
        }
        if !top_y.is_finite() {
            return Err(OmrError::InvalidStaffTop(top_y));
        }
        Ok(Self {
            id,
            top_y,
            bottom_y: top_y + spacing * Self::SPACES,
            spacing,
            clef,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Y coordinate of the top staff line.
    pub fn top_y(&self) -> f64 {
        self.top_y
    }

    /// Y coordinate of the bottom staff line.
    pub fn bottom_y(&self) -> f64 {
        self.bottom_y
    }

    /// Distance between adjacent staff lines (pixels).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    /// Y coordinate of line `index` (0 = top, 4 = bottom).
    pub fn line_y(&self, index: usize) -> f64 {
        self.top_y + self.spacing * index as f64
    }
}
