use crate::cli::to_args::ToArgs;
use crate::ffmpeg_path::FfmpegPath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::Path;

/// Reset the executable to the default and persist it to the config file
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct FfmpegPathResetArgs {}

impl FfmpegPathResetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        FfmpegPath::set_to(Path::new(FfmpegPath::DEFAULT))?;
        println!("Reset ffmpeg to default: {}", FfmpegPath::DEFAULT);
        Ok(())
    }
}

impl ToArgs for FfmpegPathResetArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
