use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use opencv::{
    core::{self, Mat},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use robo_eye::core_modules::point::FrameSize;
use robo_eye::core_modules::snapshot;
use robo_eye::pipeline::{NavigationPipeline, PipelineConfig, Report};
use tracing::{error, info, warn};

mod detect;
mod overlay;

/// Tracks a coloured object on a webcam feed and shows how to steer it onto a
/// random target.
#[derive(Debug, Parser)]
struct Args {
    /// Camera index to open.
    #[arg(long, default_value_t = 0)]
    camera: i32,
    /// Read frames from a video file instead of a camera.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Requested capture width.
    #[arg(long, default_value_t = 640)]
    width: u32,
    /// Requested capture height.
    #[arg(long, default_value_t = 480)]
    height: u32,
    /// TOML file overriding the pipeline defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Save a PNG of the frame each time a target is reached.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// Seed for reproducible targets.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "RoboEye - Multi-Color Tracking with Target")]
    window: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // --- 1. Argument Parsing & Setup ---
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.snapshot_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    // --- 2. Video I/O Initialization ---
    let mut cap = open_capture(&args)?;
    info!(
        width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)?,
        height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)?,
        "capture opened"
    );

    // --- 3. Pipeline Initialization ---
    let mut pipeline = match args.seed {
        Some(seed) => NavigationPipeline::with_seed(config, seed)?,
        None => NavigationPipeline::new(config)?,
    };

    // --- 4. Main Processing Loop ---
    let mut raw = Mat::default();
    let mut last_label = String::new();
    loop {
        if !cap.read(&mut raw)? || raw.empty() {
            if args.input.is_some() {
                info!("end of input");
            } else {
                error!("camera not accessible");
            }
            break;
        }

        // --- 5. Mirror & Detect ---
        let mut frame = Mat::default();
        core::flip(&raw, &mut frame, 1)?;
        let mut hsv = Mat::default();
        imgproc::cvt_color(&frame, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

        let size = FrameSize::new(frame.cols() as u32, frame.rows() as u32);
        let config = pipeline.config();
        let detection = detect::detect(&hsv, &config.palette, config.min_object_area)?;
        let swatch = detection.as_ref().and_then(|d| {
            config
                .palette
                .iter()
                .find(|p| p.name == d.color)
                .map(|p| p.swatch)
        });

        // --- 6. Guidance ---
        let report = pipeline.process(size, detection, Instant::now());
        let label = format!("{} | {}", report.direction_label(), report.navigation_label());
        if label != last_label {
            info!(
                navigate = %report.navigation_label(),
                direction = report.direction_label(),
                heading = report.heading_label(),
                "guidance changed"
            );
            last_label = label;
        }

        // --- 7. Visualization ---
        overlay::draw(&mut frame, &report, swatch)?;

        if let (Report::Guidance(data), Some(dir)) = (&report, &args.snapshot_dir) {
            if data.retargeted {
                let path = dir.join(format!("target_{:04}.png", pipeline.targets_reached()));
                if let Err(e) = save_snapshot(&frame, &path) {
                    warn!(path = %path.display(), "snapshot failed: {e:#}");
                }
            }
        }

        highgui::imshow(&args.window, &frame)?;
        if highgui::wait_key(1)? & 0xFF == 'q' as i32 {
            break;
        }
    }

    highgui::destroy_all_windows()?;
    info!(reached = pipeline.targets_reached(), "shutting down");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn open_capture(args: &Args) -> anyhow::Result<VideoCapture> {
    let mut cap = match &args.input {
        Some(path) => {
            let path = path.to_str().context("input path is not valid UTF-8")?;
            VideoCapture::from_file(path, videoio::CAP_ANY)?
        }
        None => {
            let mut cap = VideoCapture::new(args.camera, videoio::CAP_ANY)?;
            cap.set(videoio::CAP_PROP_FRAME_WIDTH, args.width as f64)?;
            cap.set(videoio::CAP_PROP_FRAME_HEIGHT, args.height as f64)?;
            cap
        }
    };
    if !cap.is_opened()? {
        cap.release()?;
        bail!("failed to open video source");
    }
    Ok(cap)
}

fn save_snapshot(frame: &Mat, path: &Path) -> anyhow::Result<()> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
    let bytes = rgb.data_bytes()?;
    snapshot::save_png(path, rgb.cols() as u32, rgb.rows() as u32, bytes)?;
    info!(path = %path.display(), "snapshot saved");
    Ok(())
}
