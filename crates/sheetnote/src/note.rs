use serde::Serialize;

use crate::pitch::Pitch;

/// Axis-aligned rectangle in image pixels (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Smallest box containing all `points`, or `None` for an empty slice.
    pub fn enclosing(points: impl IntoIterator<Item = [f64; 2]>) -> Option<Self> {
        let mut iter = points.into_iter();
        let [x0, y0] = iter.next()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
        for [x, y] in iter {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// Box of the given size centered on `center`.
    pub fn centered(center: [f64; 2], width: f64, height: f64) -> Self {
        Self {
            x: center[0] - width / 2.0,
            y: center[1] - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }
}

/// Where a detected note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteOrigin {
    /// A contour that passed the notehead size filter.
    Contour,
    /// Synthesized because no contour survived filtering.
    Fallback,
}

/// A notehead with its assigned pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectedNote {
    pub bbox: BoundingBox,
    /// Center in image pixel coordinates.
    pub center: [f64; 2],
    /// Id of the staff the pitch was mapped against.
    pub staff_id: usize,
    pub pitch: Pitch,
    /// Heuristic confidence in [0, 1].
    pub confidence: f32,
    pub origin: NoteOrigin,
}

impl DetectedNote {
    pub fn is_fallback(&self) -> bool {
        self.origin == NoteOrigin::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_box() {
        let b = BoundingBox::enclosing([[3.0, 4.0], [10.0, 1.0], [5.0, 9.0]]).unwrap();
        assert_eq!(
            b,
            BoundingBox {
                x: 3.0,
                y: 1.0,
                width: 7.0,
                height: 8.0
            }
        );
        assert_eq!(b.center(), [6.5, 5.0]);
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn centered_box() {
        let b = BoundingBox::centered([100.0, 50.0], 16.0, 12.0);
        assert_eq!((b.x, b.y), (92.0, 44.0));
        assert_eq!(b.center(), [100.0, 50.0]);
    }
}
