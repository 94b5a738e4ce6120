use crate::cli::arbitrary_values::arbitrary_dimension;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageResizeHeightArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Output height in pixels; the width follows the source proportions
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_dimension)]
    pub height: u32,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Keep)]
    pub format: OutputFormat,
}

impl ImageResizeHeightArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::ResizeHeight {
                height: self.height,
                format: self.format,
            },
        )
    }
}

impl ToArgs for ImageResizeHeightArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            "--height".into(),
            self.height.to_string().into(),
            "--format".into(),
            self.format.as_str().into(),
        ]
    }
}
