// THEORY:
// Targets give the demo something to steer towards. A `TargetGenerator`
// samples a random point inside the frame, away from the edges, and a
// `TargetEpisode` owns the current target for as long as it takes the
// object to reach it.
//
// Lifecycle:
// - **Start**: the episode is created with a freshly sampled target.
// - **Navigate**: each frame the caller reports whether the object reached
//   the target.
// - **Arrival**: on arrival a new target is sampled, unless the previous
//   arrival happened less than `cooldown` ago. The cooldown keeps a target
//   that spawns right under the object from being consumed in the same
//   breath, so the "Target Reached" label stays readable.
// - **Centre mode**: the target is pinned to the frame centre. Arrivals are
//   still counted, but the target never moves.
//
// Time and randomness are both passed in by the caller, which keeps the
// episode deterministic under test.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::Deserialize;
use tracing::info;

use crate::core_modules::point::{FrameSize, Point};

/// Where targets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// A new random point for every episode.
    #[default]
    Random,
    /// Always the frame centre; arrival never moves it.
    Center,
}

/// Produces targets inside a frame. Random targets keep `margin` pixels
/// clear of every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetGenerator {
    pub margin: u32,
    pub mode: TargetMode,
}

impl TargetGenerator {
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            mode: TargetMode::Random,
        }
    }

    pub fn with_mode(mut self, mode: TargetMode) -> Self {
        self.mode = mode;
        self
    }

    /// In `Random` mode, picks a uniformly random point in
    /// `[margin, extent - margin]` on both axes, bounds inclusive. An axis too
    /// short for the margin falls back to the centre of that axis. In
    /// `Center` mode, returns the frame centre.
    pub fn sample<R: Rng + ?Sized>(&self, frame: FrameSize, rng: &mut R) -> Point {
        match self.mode {
            TargetMode::Center => frame.center(),
            TargetMode::Random => Point::new(
                self.sample_axis(frame.width, rng),
                self.sample_axis(frame.height, rng),
            ),
        }
    }

    fn sample_axis<R: Rng + ?Sized>(&self, extent: u32, rng: &mut R) -> i32 {
        let low = self.margin as i64;
        let high = extent as i64 - self.margin as i64;
        if high < low {
            return (extent / 2) as i32;
        }
        rng.gen_range(low..=high) as i32
    }
}

/// The current navigation target and the bookkeeping needed to replace it.
#[derive(Debug, Clone)]
pub struct TargetEpisode {
    generator: TargetGenerator,
    cooldown: Duration,
    target: Point,
    last_reached: Option<Instant>,
    completed: u64,
}

impl TargetEpisode {
    /// Starts the first episode with a freshly sampled target.
    pub fn start<R: Rng + ?Sized>(
        generator: TargetGenerator,
        cooldown: Duration,
        frame: FrameSize,
        rng: &mut R,
    ) -> Self {
        let target = generator.sample(frame, rng);
        info!(x = target.x, y = target.y, "initial target");
        Self {
            generator,
            cooldown,
            target,
            last_reached: None,
            completed: 0,
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Number of targets reached so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Feeds one frame's arrival status into the episode. Returns `true`
    /// when the target was replaced. A centre target is counted as reached
    /// but never replaced; it only follows the frame size.
    pub fn observe<R: Rng + ?Sized>(
        &mut self,
        reached: bool,
        now: Instant,
        frame: FrameSize,
        rng: &mut R,
    ) -> bool {
        if !reached {
            return false;
        }

        let cooled_down = match self.last_reached {
            Some(last) => now.saturating_duration_since(last) > self.cooldown,
            None => true,
        };
        if !cooled_down {
            return false;
        }

        self.last_reached = Some(now);
        self.completed += 1;
        if self.generator.mode == TargetMode::Center {
            self.target = frame.center();
            info!(completed = self.completed, "centre reached");
            return false;
        }

        self.target = self.generator.sample(frame, rng);
        info!(
            x = self.target.x,
            y = self.target.y,
            completed = self.completed,
            "target reached, new target"
        );
        true
    }
}
