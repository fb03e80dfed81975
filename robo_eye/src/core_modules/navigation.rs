// THEORY:
// `Navigation` is the two-axis counterpart of `advise`. Where the advisor
// picks a single dominant direction, navigation judges each axis on its own
// and may ask for a horizontal and a vertical move at the same time
// ("Move Right & Move Down"). An axis only contributes once its offset
// exceeds the reach threshold; when neither does, the target is reached.
//
// The sign convention is shared with `direction_advisor` so both outputs
// always agree on which way is which.

use std::fmt;

use crate::core_modules::direction_advisor::{self, Direction};
use crate::core_modules::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    /// `Left` or `Right`, if the horizontal offset exceeds the threshold.
    pub horizontal: Option<Direction>,
    /// `Up` or `Down`, if the vertical offset exceeds the threshold.
    pub vertical: Option<Direction>,
}

impl Navigation {
    pub fn is_reached(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.horizontal, self.vertical) {
            (Some(h), Some(v)) => write!(f, "{h} & {v}"),
            (Some(h), None) => write!(f, "{h}"),
            (None, Some(v)) => write!(f, "{v}"),
            (None, None) => f.write_str("Target Reached"),
        }
    }
}

/// Computes the per-axis instructions that move `centroid` onto `target`.
pub fn navigate(centroid: Point, target: Point, reach_threshold: u32) -> Navigation {
    let (dx, dy) = centroid.offset_from(target);
    let threshold = reach_threshold as i64;

    Navigation {
        horizontal: (dx.abs() > threshold).then(|| direction_advisor::horizontal(dx)),
        vertical: (dy.abs() > threshold).then(|| direction_advisor::vertical(dy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_axes_combine() {
        let nav = navigate(Point::new(100, 100), Point::new(300, 400), 30);
        assert_eq!(nav.horizontal, Some(Direction::Right));
        assert_eq!(nav.vertical, Some(Direction::Down));
        assert_eq!(nav.to_string(), "Move Right & Move Down");
        assert!(!nav.is_reached());
    }

    #[test]
    fn single_axis_reports_alone() {
        let nav = navigate(Point::new(500, 210), Point::new(300, 200), 30);
        assert_eq!(nav.to_string(), "Move Left");

        let nav = navigate(Point::new(300, 500), Point::new(300, 200), 30);
        assert_eq!(nav.to_string(), "Move Up");
    }

    #[test]
    fn threshold_is_exclusive() {
        let target = Point::new(200, 200);
        let nav = navigate(Point::new(230, 170), target, 30);
        assert!(nav.is_reached());
        assert_eq!(nav.to_string(), "Target Reached");

        let nav = navigate(Point::new(231, 200), target, 30);
        assert_eq!(nav.horizontal, Some(Direction::Left));
        assert_eq!(nav.vertical, None);
    }

    #[test]
    fn agrees_with_advisor_on_dominant_axis() {
        let target = Point::new(320, 240);
        for centroid in [Point::new(10, 250), Point::new(600, 20), Point::new(330, 470)] {
            let nav = navigate(centroid, target, 30);
            let advised = direction_advisor::advise(centroid, target, 30);
            assert!(nav.horizontal == Some(advised) || nav.vertical == Some(advised));
        }
    }
}
