use crate::cli::command::ffmpeg_path::ffmpeg_path_reset_command::FfmpegPathResetArgs;
use crate::cli::command::ffmpeg_path::ffmpeg_path_set_command::FfmpegPathSetArgs;
use crate::cli::command::ffmpeg_path::ffmpeg_path_show_command::FfmpegPathShowArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Clone, Arbitrary, PartialEq, Debug)]
pub enum FfmpegPathCommand {
    /// Show the configured ffmpeg executable
    Show(FfmpegPathShowArgs),

    /// Use a different ffmpeg executable
    Set(FfmpegPathSetArgs),

    /// Go back to `ffmpeg` from PATH
    Reset(FfmpegPathResetArgs),
}

impl FfmpegPathCommand {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            FfmpegPathCommand::Show(args) => args.invoke(),
            FfmpegPathCommand::Set(args) => args.invoke(),
            FfmpegPathCommand::Reset(args) => args.invoke(),
        }
    }
}

impl ToArgs for FfmpegPathCommand {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            FfmpegPathCommand::Show(a) => {
                args.push("show".into());
                args.extend(a.to_args());
            }
            FfmpegPathCommand::Set(a) => {
                args.push("set".into());
                args.extend(a.to_args());
            }
            FfmpegPathCommand::Reset(a) => {
                args.push("reset".into());
                args.extend(a.to_args());
            }
        }
        args
    }
}
