use crate::cli::command::image::image_aspect_ratio_command::ImageAspectRatioArgs;
use crate::cli::command::image::image_crop_command::ImageCropArgs;
use crate::cli::command::image::image_grayscale_command::ImageGrayscaleArgs;
use crate::cli::command::image::image_input_args::ImageInputArgs;
use crate::cli::command::image::image_overlay_command::ImageOverlayArgs;
use crate::cli::command::image::image_resize_command::ImageResizeArgs;
use crate::cli::command::image::image_resize_height_command::ImageResizeHeightArgs;
use crate::cli::command::run_request;
use crate::cli::to_args::ToArgs;
use crate::conversion::ConversionRequest;
use crate::image_processing::ImageOperation;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

#[derive(Subcommand, Clone, Arbitrary, PartialEq, Debug)]
pub enum ImageCommand {
    /// Re-encode as WebP
    Webp(ImageInputArgs),

    /// Center-crop to 700x700 WebP
    #[clap(name = "square700")]
    Square700(ImageInputArgs),

    /// Center-crop to 300x300 WebP
    #[clap(name = "square300")]
    Square300(ImageInputArgs),

    /// Scale to 1600 px wide WebP
    #[clap(name = "width1600")]
    Width1600(ImageInputArgs),

    /// Center-crop to a 256x256 icon
    Ico(ImageInputArgs),

    /// Center-crop to a 100x100 PNG
    #[clap(name = "png100")]
    Png100(ImageInputArgs),

    /// Brighten slightly and drop color
    Grayscale(ImageGrayscaleArgs),

    /// Composite another image on top
    Overlay(ImageOverlayArgs),

    /// Fit inside a width, or a width and height
    Resize(ImageResizeArgs),

    /// Fit to a height
    ResizeHeight(ImageResizeHeightArgs),

    /// Center-crop to an aspect ratio without scaling
    AspectRatio(ImageAspectRatioArgs),

    /// Center-crop and scale to an exact size
    Crop(ImageCropArgs),

    /// Re-encode as JPEG
    Jpg(ImageInputArgs),
}

impl ImageCommand {
    /// The conversion this command line asks for
    #[must_use]
    pub fn into_request(self) -> ConversionRequest {
        let (input, operation) = match self {
            ImageCommand::Webp(a) => (a.input, ImageOperation::Webp),
            ImageCommand::Square700(a) => (a.input, ImageOperation::Square700),
            ImageCommand::Square300(a) => (a.input, ImageOperation::Square300),
            ImageCommand::Width1600(a) => (a.input, ImageOperation::Width1600),
            ImageCommand::Ico(a) => (a.input, ImageOperation::Ico),
            ImageCommand::Png100(a) => (a.input, ImageOperation::Png100),
            ImageCommand::Jpg(a) => (a.input, ImageOperation::Jpg),
            ImageCommand::Grayscale(a) => a.into_parts(),
            ImageCommand::Overlay(a) => a.into_parts(),
            ImageCommand::Resize(a) => a.into_parts(),
            ImageCommand::ResizeHeight(a) => a.into_parts(),
            ImageCommand::AspectRatio(a) => a.into_parts(),
            ImageCommand::Crop(a) => a.into_parts(),
        };
        ConversionRequest::Image { input, operation }
    }

    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    pub fn invoke(self) -> eyre::Result<()> {
        run_request(self.into_request())
    }
}

impl ToArgs for ImageCommand {
    fn to_args(&self) -> Vec<OsString> {
        let (name, rest) = match self {
            ImageCommand::Webp(a) => ("webp", a.to_args()),
            ImageCommand::Square700(a) => ("square700", a.to_args()),
            ImageCommand::Square300(a) => ("square300", a.to_args()),
            ImageCommand::Width1600(a) => ("width1600", a.to_args()),
            ImageCommand::Ico(a) => ("ico", a.to_args()),
            ImageCommand::Png100(a) => ("png100", a.to_args()),
            ImageCommand::Grayscale(a) => ("grayscale", a.to_args()),
            ImageCommand::Overlay(a) => ("overlay", a.to_args()),
            ImageCommand::Resize(a) => ("resize", a.to_args()),
            ImageCommand::ResizeHeight(a) => ("resize-height", a.to_args()),
            ImageCommand::AspectRatio(a) => ("aspect-ratio", a.to_args()),
            ImageCommand::Crop(a) => ("crop", a.to_args()),
            ImageCommand::Jpg(a) => ("jpg", a.to_args()),
        };
        let mut args: Vec<OsString> = vec![name.into()];
        args.extend(rest);
        args
    }
}
