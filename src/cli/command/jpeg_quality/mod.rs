pub mod jpeg_quality_command;
pub mod jpeg_quality_reset_command;
pub mod jpeg_quality_set_command;
pub mod jpeg_quality_show_command;

use crate::cli::command::jpeg_quality::jpeg_quality_command::JpegQualityCommand;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct JpegQualityArgs {
    #[clap(subcommand)]
    pub command: JpegQualityCommand,
}

impl JpegQualityArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or written.
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}

impl ToArgs for JpegQualityArgs {
    fn to_args(&self) -> Vec<OsString> {
        self.command.to_args()
    }
}
