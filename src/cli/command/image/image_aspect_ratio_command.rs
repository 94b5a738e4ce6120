use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::geometry::AspectRatio;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Keeps the source resolution; only the overflow on one axis is cut away
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageAspectRatioArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Target ratio as `W:H`, for example `16:9`
    pub ratio: AspectRatio,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Keep)]
    pub format: OutputFormat,
}

impl ImageAspectRatioArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::AspectRatio {
                ratio: self.ratio,
                format: self.format,
            },
        )
    }
}

impl ToArgs for ImageAspectRatioArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            self.ratio.to_string().into(),
            "--format".into(),
            self.format.as_str().into(),
        ]
    }
}
