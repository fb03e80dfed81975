use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a `PipelineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("min_object_area must be a finite, non-negative number, got {0}")]
    InvalidMinArea(f64),
    #[error("palette must contain at least one colour profile")]
    EmptyPalette,
    #[error("colour profile `{0}` has no HSV ranges")]
    NoRanges(String),
    #[error("colour profile `{name}` has an invalid HSV range: {reason}")]
    InvalidRange { name: String, reason: &'static str },
}

/// Failures while writing a PNG snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
