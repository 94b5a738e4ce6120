pub mod image_aspect_ratio_command;
pub mod image_command;
pub mod image_crop_command;
pub mod image_grayscale_command;
pub mod image_input_args;
pub mod image_overlay_command;
pub mod image_resize_command;
pub mod image_resize_height_command;

use crate::cli::command::image::image_command::ImageCommand;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct ImageArgs {
    #[clap(subcommand)]
    pub command: ImageCommand,
}

impl ImageArgs {
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    pub fn invoke(self) -> eyre::Result<()> {
        self.command.invoke()
    }
}

impl ToArgs for ImageArgs {
    fn to_args(&self) -> Vec<OsString> {
        self.command.to_args()
    }
}
