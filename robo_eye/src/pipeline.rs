// THEORY:
// The `pipeline` module is the top-level API of the crate. It wraps the
// small decision units into one per-frame call: hand it the frame size and
// the frame's detection (if any), get back a `Report` that says what to
// display.
//
// All state that a capture loop would otherwise keep in loose variables (the
// current target, the time of the last arrival, whether a target exists yet)
// lives in the `NavigationPipeline` value owned by that loop.

use std::path::Path;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::debug;

use crate::core_modules::color::{ColorProfile, default_palette};
use crate::core_modules::detection::Detection;
use crate::core_modules::direction_advisor::{self, Direction};
use crate::core_modules::navigation::{self, Navigation};
use crate::core_modules::point::{FrameSize, Point};
use crate::core_modules::target::{TargetEpisode, TargetGenerator};
use crate::error::ConfigError;

// Re-export key data structures for the public API.
pub use crate::core_modules::detection::BoundingBox;
pub use crate::core_modules::target::TargetMode;

/// Configuration for the NavigationPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pixel distance per axis within which the object counts as on target.
    /// Also used as the dead-zone of the single-direction advisor.
    pub reach_threshold: u32,
    /// `"random"` for a fresh random target per episode, `"center"` to steer
    /// towards the frame centre.
    pub reference: TargetMode,
    /// Minimum distance between a random target and the frame edges.
    pub target_margin: u32,
    /// Contours at or below this area (square pixels) are ignored.
    pub min_object_area: f64,
    /// Minimum time between two arrivals before another target is issued.
    pub reach_cooldown_ms: u64,
    /// Colours to look for, highest priority first.
    pub palette: Vec<ColorProfile>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reach_threshold: 30,
            reference: TargetMode::Random,
            target_margin: 50,
            min_object_area: 800.0,
            reach_cooldown_ms: 800,
            palette: default_palette(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_object_area.is_finite() || self.min_object_area < 0.0 {
            return Err(ConfigError::InvalidMinArea(self.min_object_area));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.palette.iter().try_for_each(ColorProfile::validate)
    }

    pub fn reach_cooldown(&self) -> Duration {
        Duration::from_millis(self.reach_cooldown_ms)
    }
}

/// Everything the display needs for a frame in which an object was found.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceData {
    pub detection: Detection,
    pub centroid: Point,
    /// The target this frame was judged against.
    pub target: Point,
    /// Coarse steering towards the object by frame thirds.
    pub heading: Direction,
    /// Single dominant-axis instruction towards the target.
    pub direction: Direction,
    /// Per-axis instructions towards the target.
    pub navigation: Navigation,
    /// Straight-line distance to the target in pixels.
    pub distance: u32,
    /// Set when reaching the target caused a new one to be issued.
    pub retargeted: bool,
}

/// The primary output of the pipeline for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    NoObjectDetected { target: Point },
    Guidance(GuidanceData),
}

impl Report {
    pub fn navigation_label(&self) -> String {
        match self {
            Report::NoObjectDetected { .. } => "No object to navigate".to_string(),
            Report::Guidance(data) => data.navigation.to_string(),
        }
    }

    /// The dominant-axis instruction towards the target.
    pub fn direction_label(&self) -> &'static str {
        match self {
            Report::NoObjectDetected { .. } => "No Object Detected",
            Report::Guidance(data) => data.direction.label(),
        }
    }

    pub fn heading_label(&self) -> &'static str {
        match self {
            Report::NoObjectDetected { .. } => "No Object Detected",
            Report::Guidance(data) => data.heading.label(),
        }
    }
}

/// The main, top-level struct for per-frame navigation.
pub struct NavigationPipeline {
    config: PipelineConfig,
    generator: TargetGenerator,
    episode: Option<TargetEpisode>,
    rng: StdRng,
    frame_count: u64,
}

impl NavigationPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as `new`, but with a reproducible target sequence.
    pub fn with_seed(config: PipelineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PipelineConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            generator: TargetGenerator::new(config.target_margin).with_mode(config.reference),
            config,
            episode: None,
            rng,
            frame_count: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The current target, once the first frame has been processed.
    pub fn target(&self) -> Option<Point> {
        self.episode.as_ref().map(TargetEpisode::target)
    }

    pub fn targets_reached(&self) -> u64 {
        self.episode.as_ref().map_or(0, TargetEpisode::completed)
    }

    pub fn process(&mut self, frame: FrameSize, detection: Option<Detection>, now: Instant) -> Report {
        self.frame_count += 1;

        // Stage 1: Target Initialisation
        let cooldown = self.config.reach_cooldown();
        let generator = self.generator;
        let rng = &mut self.rng;
        let episode = self
            .episode
            .get_or_insert_with(|| TargetEpisode::start(generator, cooldown, frame, rng));
        let target = episode.target();

        let Some(detection) = detection else {
            debug!(frame = self.frame_count, "no object detected");
            return Report::NoObjectDetected { target };
        };

        // Stage 2: Direction Inference
        let centroid = detection.centroid();
        let threshold = self.config.reach_threshold;
        let heading = direction_advisor::heading(centroid.x, frame.width);
        let direction = direction_advisor::advise(centroid, target, threshold);
        let navigation = navigation::navigate(centroid, target, threshold);
        let distance = centroid.distance_to(target);

        // Stage 3: Episode Update
        let retargeted = episode.observe(navigation.is_reached(), now, frame, &mut self.rng);

        debug!(
            frame = self.frame_count,
            color = %detection.color,
            cx = centroid.x,
            cy = centroid.y,
            %direction,
            %navigation,
            distance,
            "guidance"
        );

        Report::Guidance(GuidanceData {
            detection,
            centroid,
            target,
            heading,
            direction,
            navigation,
            distance,
            retargeted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: FrameSize = FrameSize::new(640, 480);

    fn detection_at(p: Point) -> Detection {
        Detection::new("Red", BoundingBox::new(p.x - 20, p.y - 20, 40, 40), 1600.0)
    }

    fn pipeline(seed: u64) -> NavigationPipeline {
        NavigationPipeline::with_seed(PipelineConfig::default(), seed).unwrap()
    }

    #[test]
    fn first_frame_creates_target() {
        let mut p = pipeline(1);
        assert_eq!(p.target(), None);

        let report = p.process(FRAME, None, Instant::now());
        let target = p.target().unwrap();
        assert_eq!(report, Report::NoObjectDetected { target });
        assert_eq!(report.navigation_label(), "No object to navigate");
        assert!((50..=590).contains(&target.x));
        assert!((50..=430).contains(&target.y));
    }

    #[test]
    fn no_detection_keeps_target() {
        let mut p = pipeline(2);
        let now = Instant::now();
        p.process(FRAME, None, now);
        let target = p.target();
        for _ in 0..10 {
            p.process(FRAME, None, now);
        }
        assert_eq!(p.target(), target);
    }

    #[test]
    fn guidance_points_at_target() {
        let mut p = pipeline(3);
        let now = Instant::now();
        p.process(FRAME, None, now);
        let target = p.target().unwrap();

        let centroid = Point::new(target.x + 200, target.y);
        let Report::Guidance(data) = p.process(FRAME, Some(detection_at(centroid)), now) else {
            panic!("expected guidance");
        };
        assert_eq!(data.centroid, centroid);
        assert_eq!(data.target, target);
        assert_eq!(data.direction, Direction::Left);
        assert_eq!(data.navigation.horizontal, Some(Direction::Left));
        assert_eq!(data.navigation.vertical, None);
        assert_eq!(data.distance, 200);
        assert!(!data.retargeted);
        assert_eq!(p.target(), Some(target));
    }

    #[test]
    fn reaching_target_issues_new_one() {
        let mut p = pipeline(4);
        let now = Instant::now();
        p.process(FRAME, None, now);
        let target = p.target().unwrap();

        let Report::Guidance(data) = p.process(FRAME, Some(detection_at(target)), now) else {
            panic!("expected guidance");
        };
        assert!(data.navigation.is_reached());
        assert_eq!(data.direction, Direction::Centered);
        assert_eq!(data.target, target);
        assert!(data.retargeted);
        assert_eq!(p.targets_reached(), 1);
    }

    #[test]
    fn same_seed_same_targets() {
        let mut a = pipeline(99);
        let mut b = pipeline(99);
        let now = Instant::now();
        for step in 0..5u64 {
            let t = now + Duration::from_secs(step);
            a.process(FRAME, None, t);
            b.process(FRAME, None, t);
            let target = a.target().unwrap();
            assert_eq!(b.target(), Some(target));
            a.process(FRAME, Some(detection_at(target)), t);
            b.process(FRAME, Some(detection_at(target)), t);
        }
        assert_eq!(a.targets_reached(), 5);
    }

    #[test]
    fn heading_uses_frame_thirds() {
        let mut p = pipeline(5);
        let report = p.process(FRAME, Some(detection_at(Point::new(60, 240))), Instant::now());
        assert_eq!(report.heading_label(), "Move Left");
    }

    #[test]
    fn center_reference_centers_object_at_frame_center() {
        let config = PipelineConfig {
            reference: TargetMode::Center,
            ..PipelineConfig::default()
        };
        let mut p = NavigationPipeline::with_seed(config, 6).unwrap();
        let now = Instant::now();

        let report = p.process(FRAME, Some(detection_at(FRAME.center())), now);
        let Report::Guidance(data) = &report else {
            panic!("expected guidance");
        };
        assert_eq!(data.target, Point::new(320, 240));
        assert_eq!(data.direction, Direction::Centered);
        assert_eq!(report.direction_label(), "Move Forward");
        assert!(!data.retargeted);
        assert_eq!(p.target(), Some(Point::new(320, 240)));

        let report = p.process(FRAME, Some(detection_at(Point::new(500, 240))), now + Duration::from_secs(2));
        assert_eq!(report.direction_label(), "Move Left");
        assert_eq!(p.target(), Some(Point::new(320, 240)));
    }

    #[test]
    fn direction_label_follows_advisor() {
        let mut p = pipeline(8);
        let report = p.process(FRAME, None, Instant::now());
        assert_eq!(report.direction_label(), "No Object Detected");

        let target = p.target().unwrap();
        let report = p.process(FRAME, Some(detection_at(Point::new(target.x, target.y - 150))), Instant::now());
        assert_eq!(report.direction_label(), "Move Down");
    }

    #[test]
    fn config_parses_center_reference() {
        let config = PipelineConfig::from_toml_str("reference = \"center\"").unwrap();
        assert_eq!(config.reference, TargetMode::Center);
    }

    #[test]
    fn config_rejects_bad_min_area() {
        for source in ["min_object_area = -1.0", "min_object_area = nan", "min_object_area = inf"] {
            let err = PipelineConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMinArea(_)), "{source}");
        }
    }

    #[test]
    fn config_parses_partial_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            reach_threshold = 15

            [[palette]]
            name = "Orange"
            swatch = [255, 165, 0]
            ranges = [{ lower = [10, 100, 100], upper = [20, 255, 255] }]
            "#,
        )
        .unwrap();
        assert_eq!(config.reach_threshold, 15);
        assert_eq!(config.target_margin, 50);
        assert_eq!(config.palette.len(), 1);
        assert_eq!(config.palette[0].name, "Orange");
    }

    #[test]
    fn config_rejects_empty_palette() {
        let err = PipelineConfig::from_toml_str("palette = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPalette));
    }

    #[test]
    fn config_rejects_bad_toml() {
        let err = PipelineConfig::from_toml_str("reach_threshold = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = PipelineConfig::load(Path::new("/nonexistent/robo_eye.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn pipeline_rejects_invalid_config() {
        let config = PipelineConfig {
            palette: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(NavigationPipeline::new(config).is_err());
    }
}
