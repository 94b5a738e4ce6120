//! Video re-encodes through an external ffmpeg
//!
//! The frame size comes from [`resolve_video_frame`]; ffmpeg scales the source to
//! cover that frame and center-crops the overflow in a single filter pass.

use crate::conversion::ConversionOutcome;
use crate::conversion::ConversionSettings;
use crate::error::ConversionError;
use crate::error::Result;
use crate::geometry::AspectRatio;
use crate::geometry::MediaDimensions;
use crate::geometry::VideoResolution;
use crate::geometry::resolve_video_frame;
use crate::output_path::output_path;
use arbitrary::Arbitrary;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;
use tracing::error;
use tracing::info;

const PRESET: &str = "medium";
const AUDIO_BITRATE: &str = "128k";

/// How hard to squeeze the output
#[derive(clap::ValueEnum, Arbitrary, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    /// Smallest files
    High,
    #[default]
    Medium,
    /// Best quality
    Low,
}

impl Compression {
    /// x264 constant rate factor
    #[must_use]
    pub const fn crf(self) -> u8 {
        match self {
            Compression::High => 32,
            Compression::Medium => 28,
            Compression::Low => 23,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Compression::High => "high",
            Compression::Medium => "medium",
            Compression::Low => "low",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoRequest {
    pub input: PathBuf,
    pub ratio: AspectRatio,
    pub resolution: VideoResolution,
    pub compression: Compression,
}

impl VideoRequest {
    /// Encoded frame size, even on both axes
    ///
    /// # Errors
    ///
    /// Propagates [`crate::geometry::GeometryError::InvalidAspectRatio`].
    pub fn frame(&self) -> Result<MediaDimensions> {
        Ok(resolve_video_frame(self.ratio, self.resolution)?.to_even())
    }

    /// `<stem>-<W>x<H>.mp4`
    ///
    /// # Errors
    ///
    /// See [`output_path`].
    pub fn output(&self, frame: MediaDimensions) -> Result<PathBuf> {
        output_path(&self.input, Some(&frame.to_string()), "mp4")
    }
}

/// `scale=W:H:force_original_aspect_ratio=increase,crop=W:H`
#[must_use]
pub fn filter_graph(frame: MediaDimensions) -> String {
    let (w, h) = (frame.width, frame.height);
    format!("scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}")
}

/// Full ffmpeg argument list, without the executable
#[must_use]
pub fn ffmpeg_args(request: &VideoRequest, frame: MediaDimensions, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(request.input.clone().into_os_string());
    args.push("-vf".into());
    args.push(filter_graph(frame).into());
    let crf = request.compression.crf().to_string();
    args.extend(
        [
            "-c:v",
            "libx264",
            "-preset",
            PRESET,
            "-crf",
            crf.as_str(),
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            "aac",
            "-b:a",
            AUDIO_BITRATE,
            "-movflags",
            "+faststart",
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}

/// Re-encode `request.input` and wait for ffmpeg to exit
///
/// # Errors
///
/// Geometry and naming errors, [`ConversionError::InvalidInput`] if the input is not a
/// file, [`ConversionError::ToolNotFound`] if ffmpeg cannot be spawned, and
/// [`ConversionError::ToolFailed`] with ffmpeg's stderr on a non-zero exit.
pub async fn convert_video(
    request: &VideoRequest,
    settings: &ConversionSettings,
) -> Result<ConversionOutcome> {
    let started = Instant::now();
    info!(
        "Re-encoding {} to {} at {} ({} compression)",
        request.input.display(),
        request.ratio,
        request.resolution,
        request.compression.as_str()
    );

    match run_ffmpeg(request, settings).await {
        Ok(outcome) => {
            info!(
                "Wrote {} ({}) in {}",
                outcome.output.display(),
                outcome.dimensions,
                humantime::format_duration(started.elapsed())
            );
            Ok(outcome)
        }
        Err(e) => {
            error!("Failed to re-encode {}: {}", request.input.display(), e);
            Err(e)
        }
    }
}

async fn run_ffmpeg(request: &VideoRequest, settings: &ConversionSettings) -> Result<ConversionOutcome> {
    let frame = request.frame()?;
    let output = request.output(frame)?;
    if !request.input.is_file() {
        return Err(ConversionError::InvalidInput(request.input.clone()));
    }

    let args = ffmpeg_args(request, frame, &output);
    debug!("Running {} {:?}", settings.ffmpeg.display(), args);

    let result = Command::new(&settings.ffmpeg)
        .args(&args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConversionError::ToolNotFound(settings.ffmpeg.clone())
            } else {
                ConversionError::Io {
                    path: settings.ffmpeg.clone(),
                    source,
                }
            }
        })?;

    if !result.status.success() {
        return Err(ConversionError::ToolFailed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    Ok(ConversionOutcome {
        input: request.input.clone(),
        output,
        dimensions: frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(input: &Path, ratio: &str) -> VideoRequest {
        VideoRequest {
            input: input.to_path_buf(),
            ratio: ratio.parse().unwrap(),
            resolution: VideoResolution::P720,
            compression: Compression::Medium,
        }
    }

    #[test]
    fn portrait_frame_is_even() {
        let req = request(Path::new("/videos/clip.mov"), "9:16");
        let frame = req.frame().unwrap();
        assert_eq!(frame, MediaDimensions::new(406, 720));
        assert_eq!(
            req.output(frame).unwrap(),
            PathBuf::from("/videos/clip-406x720.mp4")
        );
    }

    #[test]
    fn filter_scales_then_crops() {
        assert_eq!(
            filter_graph(MediaDimensions::new(1280, 720)),
            "scale=1280:720:force_original_aspect_ratio=increase,crop=1280:720"
        );
    }

    #[test]
    fn args_carry_filter_and_crf() {
        let mut req = request(Path::new("in.mp4"), "16:9");
        req.compression = Compression::High;
        let frame = req.frame().unwrap();
        let output = req.output(frame).unwrap();
        let args: Vec<String> = ffmpeg_args(&req, frame, &output)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let after = |flag: &str| {
            let i = args.iter().position(|a| a == flag).unwrap();
            args[i + 1].clone()
        };
        assert_eq!(after("-i"), "in.mp4");
        assert_eq!(after("-crf"), "32");
        assert_eq!(after("-c:v"), "libx264");
        assert_eq!(
            after("-vf"),
            "scale=1280:720:force_original_aspect_ratio=increase,crop=1280:720"
        );
        assert_eq!(args.last().map(String::as_str), Some("in-1280x720.mp4"));
    }

    #[test]
    fn crf_mapping() {
        assert_eq!(Compression::High.crf(), 32);
        assert_eq!(Compression::Medium.crf(), 28);
        assert_eq!(Compression::Low.crf(), 23);
    }

    #[tokio::test]
    async fn missing_encoder_is_reported() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("clip.mp4");
        std::fs::write(&input, b"")?;
        let settings = ConversionSettings {
            ffmpeg: td.path().join("no-such-ffmpeg"),
            ..ConversionSettings::default()
        };
        let err = convert_video(&request(&input, "1:1"), &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::ToolNotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn missing_input_is_reported_before_spawning() -> eyre::Result<()> {
        let td = tempdir()?;
        let err = convert_video(
            &request(&td.path().join("gone.mp4"), "1:1"),
            &ConversionSettings::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_reported() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("clip.mp4");
        std::fs::write(&input, b"")?;
        let settings = ConversionSettings {
            ffmpeg: PathBuf::from("false"),
            ..ConversionSettings::default()
        };
        let err = convert_video(&request(&input, "4:3"), &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::ToolFailed { .. }));
        Ok(())
    }
}
