// THEORY:
// Colour profiles describe *what* to look for, not *how*. Each profile is a
// named set of inclusive HSV bounds on the OpenCV scale (hue 0..=180,
// saturation and value 0..=255). The caller hands these bounds to its vision
// library's range threshold; this crate never touches pixels.
//
// Red needs two ranges because its hue wraps around 0/180. Profiles are kept
// in priority order: when several colours are visible, the earliest profile
// in the palette wins.

use image::Rgb;
use serde::Deserialize;

use crate::error::ConfigError;

/// Largest hue value on the OpenCV 8-bit HSV scale.
pub const HUE_MAX: u8 = 180;

/// Inclusive lower and upper `[h, s, v]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        [h, s, v]
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(value, (lo, hi))| (*lo..=*hi).contains(value))
    }

    fn check(&self) -> Result<(), &'static str> {
        if self.lower.iter().zip(self.upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err("lower bound exceeds upper bound");
        }
        if self.upper[0] > HUE_MAX {
            return Err("hue exceeds 180");
        }
        Ok(())
    }
}

/// A named colour to detect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorProfile {
    pub name: String,
    pub ranges: Vec<HsvRange>,
    /// RGB colour used when drawing this profile's label.
    pub swatch: [u8; 3],
}

impl ColorProfile {
    pub fn new(name: &str, ranges: Vec<HsvRange>, swatch: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            ranges,
            swatch,
        }
    }

    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        self.ranges.iter().any(|range| range.contains(h, s, v))
    }

    pub fn swatch(&self) -> Rgb<u8> {
        Rgb(self.swatch)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ranges.is_empty() {
            return Err(ConfigError::NoRanges(self.name.clone()));
        }
        for range in &self.ranges {
            range.check().map_err(|reason| ConfigError::InvalidRange {
                name: self.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

/// Red, blue, green and yellow, in that priority order.
pub fn default_palette() -> Vec<ColorProfile> {
    vec![
        ColorProfile::new(
            "Red",
            vec![
                HsvRange::new([0, 120, 70], [10, 255, 255]),
                HsvRange::new([170, 120, 70], [180, 255, 255]),
            ],
            [255, 0, 0],
        ),
        ColorProfile::new("Blue", vec![HsvRange::new([94, 80, 2], [126, 255, 255])], [0, 0, 255]),
        ColorProfile::new("Green", vec![HsvRange::new([35, 100, 100], [85, 255, 255])], [0, 255, 0]),
        ColorProfile::new(
            "Yellow",
            vec![HsvRange::new([20, 100, 100], [30, 255, 255])],
            [255, 255, 0],
        ),
    ]
}
