// THEORY:
// A `Detection` is the summary the vision stage hands over for one frame:
// which colour was found, where its bounding box sits and how large the
// contour is. Like `SmartBlob` snapshots, it is a plain data container with
// no memory of earlier frames.
//
// Small contours are noise (sensor speckle, reflections), so a detection only
// counts once its area passes `min_area`.

use crate::core_modules::point::Point;

/// Axis-aligned box around a contour, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

/// The largest contour of one colour profile in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Name of the matching `ColorProfile`.
    pub color: String,
    pub bounding_box: BoundingBox,
    /// Contour area in square pixels.
    pub area: f64,
}

impl Detection {
    pub fn new(color: impl Into<String>, bounding_box: BoundingBox, area: f64) -> Self {
        Self {
            color: color.into(),
            bounding_box,
            area,
        }
    }

    /// Centre of the bounding box, rounded down.
    pub fn centroid(&self) -> Point {
        let b = &self.bounding_box;
        Point::new(b.x + b.width / 2, b.y + b.height / 2)
    }

    pub fn is_significant(&self, min_area: f64) -> bool {
        self.area > min_area
    }
}

/// Returns the first detection whose area exceeds `min_area`. Callers pass
/// candidates in palette order so that colour priority is preserved.
pub fn first_significant<I>(candidates: I, min_area: f64) -> Option<Detection>
where
    I: IntoIterator<Item = Detection>,
{
    candidates.into_iter().find(|d| d.is_significant(min_area))
}
