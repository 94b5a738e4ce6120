use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::to_args::ToArgs;
use crate::image_processing::ImageOperation;
use crate::image_processing::OverlayPosition;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Output is always PNG so the overlay's transparency survives
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ImageOverlayArgs {
    /// Base image
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Image drawn on top of the base
    #[arbitrary(with = arbitrary_path)]
    pub overlay: PathBuf,

    /// Where the overlay goes; `auto` tiles overlays smaller than the base and centers the rest
    #[clap(long, value_enum, default_value_t = OverlayPosition::Auto)]
    pub position: OverlayPosition,
}

impl ImageOverlayArgs {
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, ImageOperation) {
        (
            self.input,
            ImageOperation::Overlay {
                overlay: self.overlay,
                position: self.position,
            },
        )
    }
}

impl ToArgs for ImageOverlayArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            self.overlay.clone().into_os_string(),
            "--position".into(),
            self.position.as_str().into(),
        ]
    }
}
