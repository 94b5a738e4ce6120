use crate::cli::arbitrary_values::arbitrary_dimension;
use crate::cli::arbitrary_values::arbitrary_optional_dimension;
use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Scale down or up to fit inside the given bounds, keeping proportions
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageResizeArgs {
    /// Image to convert
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Maximum output width in pixels
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_dimension)]
    pub width: u32,

    /// Maximum output height in pixels
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_optional_dimension)]
    pub height: Option<u32>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Keep)]
    pub format: OutputFormat,
}

impl ImageResizeArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::Resize {
                width: self.width,
                height: self.height,
                format: self.format,
            },
        )
    }
}

impl ToArgs for ImageResizeArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![
            self.input.clone().into_os_string(),
            "--width".into(),
            self.width.to_string().into(),
        ];
        if let Some(height) = self.height {
            args.push("--height".into());
            args.push(height.to_string().into());
        }
        args.push("--format".into());
        args.push(self.format.as_str().into());
        args
    }
}
