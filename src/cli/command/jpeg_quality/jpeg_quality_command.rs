use crate::cli::command::jpeg_quality::jpeg_quality_reset_command::JpegQualityResetArgs;
use crate::cli::command::jpeg_quality::jpeg_quality_set_command::JpegQualitySetArgs;
use crate::cli::command::jpeg_quality::jpeg_quality_show_command::JpegQualityShowArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Clone, Arbitrary, PartialEq, Debug)]
pub enum JpegQualityCommand {
    /// Show the current JPEG quality
    Show(JpegQualityShowArgs),

    /// Set the JPEG quality (1-100)
    Set(JpegQualitySetArgs),

    /// Reset the JPEG quality to the default and write it to the config file
    Reset(JpegQualityResetArgs),
}

impl JpegQualityCommand {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            JpegQualityCommand::Show(args) => args.invoke(),
            JpegQualityCommand::Set(args) => args.invoke(),
            JpegQualityCommand::Reset(args) => args.invoke(),
        }
    }
}

impl ToArgs for JpegQualityCommand {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            JpegQualityCommand::Show(a) => {
                args.push("show".into());
                args.extend(a.to_args());
            }
            JpegQualityCommand::Set(a) => {
                args.push("set".into());
                args.extend(a.to_args());
            }
            JpegQualityCommand::Reset(a) => {
                args.push("reset".into());
                args.extend(a.to_args());
            }
        }
        args
    }
}
