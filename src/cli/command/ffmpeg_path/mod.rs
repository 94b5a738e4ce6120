pub mod ffmpeg_path_command;
pub mod ffmpeg_path_reset_command;
pub mod ffmpeg_path_set_command;
pub mod ffmpeg_path_show_command;

use crate::cli::command::ffmpeg_path::ffmpeg_path_command::FfmpegPathCommand;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct FfmpegPathArgs {
    #[clap(subcommand)]
    pub command: FfmpegPathCommand,
}

impl FfmpegPathArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}

impl ToArgs for FfmpegPathArgs {
    fn to_args(&self) -> Vec<OsString> {
        self.command.to_args()
    }
}
