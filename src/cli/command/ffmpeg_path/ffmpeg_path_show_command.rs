use crate::cli::to_args::ToArgs;
use crate::ffmpeg_path::FfmpegPath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct FfmpegPathShowArgs {}

impl FfmpegPathShowArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or created.
    pub fn invoke(self) -> eyre::Result<()> {
        let ffmpeg = FfmpegPath::load()?;
        println!("ffmpeg: {}", ffmpeg.as_path().display());
        println!("Config file: {}", FfmpegPath::config_file_path()?.display());
        Ok(())
    }
}

impl ToArgs for FfmpegPathShowArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
