// THEORY:
// The `DirectionAdvisor` is the decision core of the crate. It turns the
// position of a detected object into one discrete movement instruction.
//
// Key architectural principles:
// 1.  **Stateless Utility**: `advise` is a pure function of its arguments.
//     The current target and the previous direction are passed in by the
//     caller, never kept here, so every frame is decided independently.
// 2.  **Dead-zone**: a pixel tolerance around the target absorbs detection
//     jitter. Without it the label would flicker between opposite
//     directions while the object sits almost on the target.
// 3.  **Dominant Axis**: only one instruction is issued per frame, for the
//     axis with the larger error. Ties go to the horizontal axis.
// 4.  **Fixed Convention**: the label describes how the object has to move
//     to reach the target. An object right of the target gets `Left`, an
//     object below it (image y grows downwards) gets `Up`.

use std::fmt;

use crate::core_modules::point::Point;

/// A discrete movement instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    /// Aligned with the reference point; the robot keeps going forward.
    Centered,
}

impl Direction {
    /// The on-screen label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Left => "Move Left",
            Direction::Right => "Move Right",
            Direction::Up => "Move Up",
            Direction::Down => "Move Down",
            Direction::Centered => "Move Forward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Instruction for a horizontal offset `centroid.x - target.x`.
pub(crate) fn horizontal(dx: i64) -> Direction {
    if dx > 0 { Direction::Left } else { Direction::Right }
}

/// Instruction for a vertical offset `centroid.y - target.y`.
pub(crate) fn vertical(dy: i64) -> Direction {
    if dy > 0 { Direction::Up } else { Direction::Down }
}

/// Maps a centroid and a reference point to a single movement instruction.
///
/// Returns `Centered` when both axis offsets are within `tolerance`.
/// Otherwise the axis with the larger absolute offset decides, with the
/// horizontal axis winning ties.
pub fn advise(centroid: Point, target: Point, tolerance: u32) -> Direction {
    let (dx, dy) = centroid.offset_from(target);
    let tolerance = tolerance as i64;

    if dx.abs() <= tolerance && dy.abs() <= tolerance {
        return Direction::Centered;
    }

    if dx.abs() >= dy.abs() {
        horizontal(dx)
    } else {
        vertical(dy)
    }
}

/// Coarse steering towards an object based on which third of the frame its
/// centroid falls in. Unlike `advise`, the label points at the object: an
/// object in the left third yields `Left`.
pub fn heading(centroid_x: i32, frame_width: u32) -> Direction {
    // Compare in thirds without dividing: x < w/3  <=>  3x < w.
    let x3 = centroid_x as i64 * 3;
    let width = frame_width as i64;

    if x3 < width {
        Direction::Left
    } else if x3 > 2 * width {
        Direction::Right
    } else {
        Direction::Centered
    }
}
