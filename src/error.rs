//! Errors surfaced by a single conversion

use crate::geometry::GeometryError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a file path: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("Refusing to overwrite the input file {}", .0.display())]
    OutputWouldOverwriteInput(PathBuf),

    #[error("Could not find the video encoder at '{}'; set it with `ffmpeg-path set`", .0.display())]
    ToolNotFound(PathBuf),

    #[error("Video encoder exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
