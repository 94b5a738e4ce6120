//! One conversion request, end to end

use crate::batch;
use crate::error::Result;
use crate::ffmpeg_path::FfmpegPath;
use crate::geometry::MediaDimensions;
use crate::image_processing;
use crate::image_processing::ImageOperation;
use crate::jpeg_quality::JPEG_QUALITY;
use crate::jpeg_quality::JpegQuality;
use crate::video;
use crate::video::VideoRequest;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::warn;

/// Collaborator settings a conversion needs, passed in rather than read from globals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSettings {
    /// Video encoder executable
    pub ffmpeg: PathBuf,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Lossy WebP quality, 0-100
    pub webp_quality: u8,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(FfmpegPath::DEFAULT),
            jpeg_quality: JpegQuality::DEFAULT,
            webp_quality: Self::DEFAULT_WEBP_QUALITY,
        }
    }
}

impl ConversionSettings {
    pub const DEFAULT_WEBP_QUALITY: u8 = 80;

    /// Read the persisted settings, falling back to defaults when they cannot be loaded
    #[must_use]
    pub fn load() -> Self {
        let ffmpeg = match FfmpegPath::load() {
            Ok(path) => path.0,
            Err(e) => {
                warn!(
                    "Failed to load ffmpeg path: {}. Using default {}",
                    e,
                    FfmpegPath::DEFAULT
                );
                PathBuf::from(FfmpegPath::DEFAULT)
            }
        };
        Self {
            ffmpeg,
            jpeg_quality: JPEG_QUALITY.load(Ordering::SeqCst),
            webp_quality: Self::DEFAULT_WEBP_QUALITY,
        }
    }
}

/// A successfully written output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dimensions: MediaDimensions,
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output: {}", self.output.display())
    }
}

/// Anything the front ends can ask for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionRequest {
    Image {
        input: PathBuf,
        operation: ImageOperation,
    },
    Video(VideoRequest),
    /// Every jpg/jpeg/png in a folder to WebP
    Folder(PathBuf),
}

impl ConversionRequest {
    /// Run the request to completion and describe the result in one line
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::error::ConversionError`] of a single-file request. A folder
    /// request only fails if the folder cannot be listed; per-file failures are part of
    /// the returned summary.
    pub async fn run(self, settings: ConversionSettings) -> Result<String> {
        match self {
            ConversionRequest::Image { input, operation } => {
                let outcome = image_processing::convert_image(input, operation, settings).await?;
                Ok(outcome.to_string())
            }
            ConversionRequest::Video(request) => {
                let outcome = video::convert_video(&request, &settings).await?;
                Ok(outcome.to_string())
            }
            ConversionRequest::Folder(folder) => {
                let report = batch::convert_folder_to_webp(&folder, &settings).await?;
                Ok(report.to_string())
            }
        }
    }
}
