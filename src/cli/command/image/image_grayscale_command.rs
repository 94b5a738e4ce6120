use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageGrayscaleArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Keep)]
    pub format: OutputFormat,
}

impl ImageGrayscaleArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::Grayscale {
                format: self.format,
            },
        )
    }
}

impl ToArgs for ImageGrayscaleArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            "--format".into(),
            self.format.as_str().into(),
        ]
    }
}
