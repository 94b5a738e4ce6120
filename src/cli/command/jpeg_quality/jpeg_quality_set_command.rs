use crate::cli::arbitrary_values::arbitrary_jpeg_quality;
use crate::cli::to_args::ToArgs;
use crate::jpeg_quality::JpegQuality;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct JpegQualitySetArgs {
    /// Quality between 1 (smallest) and 100 (best)
    #[clap(value_parser = clap::value_parser!(u8).range(1..=100))]
    #[arbitrary(with = arbitrary_jpeg_quality)]
    pub value: u8,
}

impl JpegQualitySetArgs {
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn invoke(self) -> eyre::Result<()> {
        JpegQuality::set_to(self.value)?;
        println!("Setting JPEG quality to: {}", self.value);
        Ok(())
    }
}

impl ToArgs for JpegQualitySetArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![self.value.to_string().into()]
    }
}
