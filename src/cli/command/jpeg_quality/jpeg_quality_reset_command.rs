use crate::cli::to_args::ToArgs;
use crate::jpeg_quality::JpegQuality;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct JpegQualityResetArgs {}

impl JpegQualityResetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        JpegQuality::set_to(JpegQuality::DEFAULT)?;
        println!("Reset JPEG quality to default: {}", JpegQuality::DEFAULT);
        Ok(())
    }
}

impl ToArgs for JpegQualityResetArgs {
    fn to_args(&self) -> Vec<OsString> {
        Vec::new()
    }
}
