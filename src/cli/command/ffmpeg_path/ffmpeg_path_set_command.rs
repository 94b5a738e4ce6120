use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::ffmpeg_path::FfmpegPath;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct FfmpegPathSetArgs {
    /// Executable name on PATH, or a full path to it
    #[arbitrary(with = arbitrary_path)]
    pub path: PathBuf,
}

impl FfmpegPathSetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        // Bare names stay as-is for PATH lookup; a missing binary surfaces on the next video conversion
        let path = if self.path.components().count() > 1 {
            dunce::canonicalize(&self.path).unwrap_or(self.path)
        } else {
            self.path
        };
        FfmpegPath::set_to(&path)?;
        println!("Setting ffmpeg to: {}", path.display());
        Ok(())
    }
}

impl ToArgs for FfmpegPathSetArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![self.path.clone().into_os_string()]
    }
}
