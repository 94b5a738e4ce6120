use crate::cli::arbitrary_values::arbitrary_dimension;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Cut the centered `width:height` region and scale it to exactly `width x height`
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageCropArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Output width in pixels
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_dimension)]
    pub width: u32,

    /// Output height in pixels
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_dimension)]
    pub height: u32,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,
}

impl ImageCropArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::Crop {
                width: self.width,
                height: self.height,
                format: self.format,
            },
        )
    }
}

impl ToArgs for ImageCropArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            "--width".into(),
            self.width.to_string().into(),
            "--height".into(),
            self.height.to_string().into(),
            "--format".into(),
            self.format.as_str().into(),
        ]
    }
}
