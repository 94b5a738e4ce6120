#![deny(clippy::disallowed_methods)]

pub mod app_home;
pub mod batch;
pub mod cli;
pub mod conversion;
pub mod error;
pub mod ffmpeg_path;
pub mod geometry;
pub mod gui;
pub mod image_processing;
pub mod jpeg_quality;
pub mod output_path;
pub mod tracing;
pub mod video;

use crate::cli::Cli;
use clap::CommandFactory;
use clap::FromArgMatches;
pub use conversion::ConversionOutcome;
pub use conversion::ConversionRequest;
pub use conversion::ConversionSettings;
pub use error::ConversionError;
pub use geometry::AspectRatio;
pub use geometry::MediaDimensions;
pub use geometry::ResizeSpec;
pub use image_processing::ImageOperation;

/// Parse the command line, set up logging, and run the chosen command
///
/// # Errors
///
/// Returns an error if argument parsing, logging setup, or the command fails.
pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::command();
    let cli = Cli::from_arg_matches(&cli.get_matches())?;

    crate::tracing::init_tracing(
        cli.global_args.log_level(),
        cli.global_args.json_log_behaviour(),
    )?;

    cli.invoke()?;
    Ok(())
}
