// THEORY:
// Pixel-space primitives shared by every other module. A `Point` is a plain
// value: centroids, targets and frame centres are all `Point`s, and none of
// them carry identity or history. Signed coordinates let deltas and
// off-frame values be represented without special cases.

/// A 2D coordinate in frame pixel space. Origin is the top-left corner and
/// `y` grows downwards, matching the camera image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed offset `(self - other)` per axis, widened so that no pair of
    /// `i32` coordinates can overflow.
    pub fn offset_from(&self, other: Point) -> (i64, i64) {
        (
            self.x as i64 - other.x as i64,
            self.y as i64 - other.y as i64,
        )
    }

    /// Euclidean distance in whole pixels, truncated towards zero.
    pub fn distance_to(&self, other: Point) -> u32 {
        let (dx, dy) = self.offset_from(other);
        (dx as f64).hypot(dy as f64) as u32
    }
}

/// Dimensions of a captured frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_signed_per_axis() {
        let a = Point::new(10, 40);
        let b = Point::new(30, 20);
        assert_eq!(a.offset_from(b), (-20, 20));
        assert_eq!(b.offset_from(a), (20, -20));
    }

    #[test]
    fn offset_does_not_overflow_at_extremes() {
        let a = Point::new(i32::MAX, i32::MIN);
        let b = Point::new(i32::MIN, i32::MAX);
        assert_eq!(a.offset_from(b), (u32::MAX as i64, -(u32::MAX as i64)));
    }

    #[test]
    fn distance_truncates() {
        assert_eq!(Point::new(0, 0).distance_to(Point::new(3, 4)), 5);
        // sqrt(2) = 1.414...
        assert_eq!(Point::new(0, 0).distance_to(Point::new(1, 1)), 1);
    }

    #[test]
    fn center_uses_integer_division() {
        assert_eq!(FrameSize::new(640, 480).center(), Point::new(320, 240));
        assert_eq!(FrameSize::new(641, 481).center(), Point::new(320, 240));
    }
}
