pub mod batch;
pub mod ffmpeg_path;
pub mod gui;
pub mod image;
pub mod jpeg_quality;
pub mod video;

use crate::cli::command::batch::BatchArgs;
use crate::cli::command::ffmpeg_path::FfmpegPathArgs;
use crate::cli::command::gui::GuiArgs;
use crate::cli::command::image::ImageArgs;
use crate::cli::command::jpeg_quality::JpegQualityArgs;
use crate::cli::command::video::VideoArgs;
use crate::cli::to_args::ToArgs;
use crate::conversion::ConversionRequest;
use crate::conversion::ConversionSettings;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Convert, resize or crop a single image
    Image(ImageArgs),

    /// Re-encode a video to an aspect ratio with ffmpeg
    Video(VideoArgs),

    /// Convert every jpg/jpeg/png in a folder to WebP
    Batch(BatchArgs),

    /// Show or change the ffmpeg executable
    FfmpegPath(FfmpegPathArgs),

    /// Show or change the JPEG encoder quality
    JpegQuality(JpegQualityArgs),

    /// Launch a graphical user interface
    Gui(GuiArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Gui(GuiArgs::default())
    }
}

impl Command {
    /// # Errors
    ///
    /// Returns an error if the chosen subcommand fails.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            Command::Image(args) => args.invoke(),
            Command::Video(args) => args.invoke(),
            Command::Batch(args) => args.invoke(),
            Command::FfmpegPath(args) => args.invoke(),
            Command::JpegQuality(args) => args.invoke(),
            Command::Gui(args) => args.invoke(),
        }
    }
}

impl ToArgs for Command {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            Command::Image(image_args) => {
                args.push("image".into());
                args.extend(image_args.to_args());
            }
            Command::Video(video_args) => {
                args.push("video".into());
                args.extend(video_args.to_args());
            }
            Command::Batch(batch_args) => {
                args.push("batch".into());
                args.extend(batch_args.to_args());
            }
            Command::FfmpegPath(ffmpeg_path_args) => {
                args.push("ffmpeg-path".into());
                args.extend(ffmpeg_path_args.to_args());
            }
            Command::JpegQuality(jpeg_quality_args) => {
                args.push("jpeg-quality".into());
                args.extend(jpeg_quality_args.to_args());
            }
            Command::Gui(gui_args) => {
                args.push("gui".into());
                args.extend(gui_args.to_args());
            }
        }
        args
    }
}

/// Run a single-file conversion on a fresh runtime and print its summary line
pub(crate) fn run_request(request: ConversionRequest) -> eyre::Result<()> {
    let settings = ConversionSettings::load();
    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(request.run(settings))?;
    println!("{summary}");
    Ok(())
}
