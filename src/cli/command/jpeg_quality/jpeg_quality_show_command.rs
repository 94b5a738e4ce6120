use crate::cli::to_args::ToArgs;
use crate::jpeg_quality::JPEG_QUALITY;
use crate::jpeg_quality::JpegQuality;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::sync::atomic::Ordering;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct JpegQualityShowArgs {}

impl JpegQualityShowArgs {
    /// # Errors
    ///
    /// Returns an error if the config file path cannot be resolved.
    pub fn invoke(self) -> eyre::Result<()> {
        println!("JPEG quality: {}", JPEG_QUALITY.load(Ordering::SeqCst));
        println!("Config file: {}", JpegQuality::config_file_path()?.display());
        Ok(())
    }
}

impl ToArgs for JpegQualityShowArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
