//! Still-image conversions
//!
//! Every menu entry is one [`ImageOperation`] variant. An operation decodes the
//! input, optionally crops and resamples it according to its [`ResizeSpec`],
//! applies its effect, and encodes one output file next to the input.

use crate::conversion::ConversionOutcome;
use crate::conversion::ConversionSettings;
use crate::error::ConversionError;
use crate::error::Result;
use crate::geometry::AspectRatio;
use crate::geometry::MediaDimensions;
use crate::geometry::ResizePlan;
use crate::geometry::ResizeSpec;
use crate::output_path::input_extension;
use crate::output_path::output_path;
use arbitrary::Arbitrary;
use image::DynamicImage;
use image::ImageError;
use image::ImageFormat;
use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;
use image::error::EncodingError;
use image::error::ImageFormatHint;
use image::imageops;
use image::imageops::FilterType;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::error;
use tracing::info;

/// Grayscale brightens every channel by `NUM / DEN` (20 %) before dropping color
const GRAYSCALE_BRIGHTNESS_NUM: u16 = 6;
const GRAYSCALE_BRIGHTNESS_DEN: u16 = 5;

/// Format choice for operations that do not imply one
#[derive(clap::ValueEnum, Arbitrary, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Same format and extension as the input
    #[default]
    Keep,
    Webp,
    Jpg,
    Png,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Keep => "keep",
            OutputFormat::Webp => "webp",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Encoder and file extension for an output derived from `input`
    ///
    /// # Errors
    ///
    /// `Keep` fails with [`ConversionError::UnsupportedFormat`] when the input extension is
    /// missing or unknown to the codec.
    pub fn resolve(self, input: &Path) -> Result<(ImageFormat, String)> {
        match self {
            OutputFormat::Keep => {
                let extension = input_extension(input).ok_or_else(|| {
                    ConversionError::UnsupportedFormat(format!(
                        "{} has no extension to keep",
                        input.display()
                    ))
                })?;
                let format = ImageFormat::from_extension(&extension).ok_or_else(|| {
                    ConversionError::UnsupportedFormat(format!("'.{extension}' output"))
                })?;
                Ok((format, extension))
            }
            OutputFormat::Webp => Ok((ImageFormat::WebP, "webp".to_string())),
            OutputFormat::Jpg => Ok((ImageFormat::Jpeg, "jpg".to_string())),
            OutputFormat::Png => Ok((ImageFormat::Png, "png".to_string())),
        }
    }
}

/// Where an overlay goes on the base image
#[derive(clap::ValueEnum, Arbitrary, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPosition {
    /// Tile when the overlay is smaller than the base on either axis, else center
    #[default]
    Auto,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Repeat the overlay across the whole base
    Tile,
}

impl OverlayPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OverlayPosition::Auto => "auto",
            OverlayPosition::Center => "center",
            OverlayPosition::TopLeft => "top-left",
            OverlayPosition::TopRight => "top-right",
            OverlayPosition::BottomLeft => "bottom-left",
            OverlayPosition::BottomRight => "bottom-right",
            OverlayPosition::Tile => "tile",
        }
    }

    /// Top-left corner of every overlay copy. Offsets may be negative when the overlay
    /// is larger than the base; the compositor clips them.
    #[must_use]
    pub fn placements(self, base: MediaDimensions, overlay: MediaDimensions) -> Vec<(i64, i64)> {
        let (bw, bh) = (i64::from(base.width), i64::from(base.height));
        let (ow, oh) = (i64::from(overlay.width), i64::from(overlay.height));
        match self {
            OverlayPosition::Auto if ow < bw || oh < bh => {
                OverlayPosition::Tile.placements(base, overlay)
            }
            OverlayPosition::Auto | OverlayPosition::Center => {
                vec![((bw - ow) / 2, (bh - oh) / 2)]
            }
            OverlayPosition::TopLeft => vec![(0, 0)],
            OverlayPosition::TopRight => vec![(bw - ow, 0)],
            OverlayPosition::BottomLeft => vec![(0, bh - oh)],
            OverlayPosition::BottomRight => vec![(bw - ow, bh - oh)],
            OverlayPosition::Tile => {
                if ow == 0 || oh == 0 {
                    return Vec::new();
                }
                let mut placements = Vec::new();
                let mut y = 0;
                while y < bh {
                    let mut x = 0;
                    while x < bw {
                        placements.push((x, y));
                        x += ow;
                    }
                    y += oh;
                }
                placements
            }
        }
    }
}

/// The fixed menu of still-image conversions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageOperation {
    /// Re-encode as WebP
    Webp,
    /// 700x700 center crop, WebP
    Square700,
    /// 300x300 center crop, WebP
    Square300,
    /// Fit to 1600 px wide, WebP
    Width1600,
    /// 256x256 center crop, ICO
    Ico,
    /// 100x100 center crop, PNG
    Png100,
    /// Brighten then desaturate
    Grayscale { format: OutputFormat },
    /// Composite another image on top
    Overlay {
        overlay: PathBuf,
        position: OverlayPosition,
    },
    /// Fit inside `width` (and `height` when given)
    Resize {
        width: u32,
        height: Option<u32>,
        format: OutputFormat,
    },
    /// Fit to `height`, width follows
    ResizeHeight { height: u32, format: OutputFormat },
    /// Centered crop to a ratio without scaling
    AspectRatio {
        ratio: AspectRatio,
        format: OutputFormat,
    },
    /// Centered crop to `width:height`, then scale to exactly `width x height`
    Crop {
        width: u32,
        height: u32,
        format: OutputFormat,
    },
    /// Re-encode as JPEG
    Jpg,
}

impl ImageOperation {
    /// Name used on the command line
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ImageOperation::Webp => "webp",
            ImageOperation::Square700 => "square700",
            ImageOperation::Square300 => "square300",
            ImageOperation::Width1600 => "width1600",
            ImageOperation::Ico => "ico",
            ImageOperation::Png100 => "png100",
            ImageOperation::Grayscale { .. } => "grayscale",
            ImageOperation::Overlay { .. } => "overlay",
            ImageOperation::Resize { .. } => "resize",
            ImageOperation::ResizeHeight { .. } => "resize-height",
            ImageOperation::AspectRatio { .. } => "aspect-ratio",
            ImageOperation::Crop { .. } => "crop",
            ImageOperation::Jpg => "jpg",
        }
    }

    /// Geometry this operation asks for, if any
    #[must_use]
    pub fn resize_spec(&self) -> Option<ResizeSpec> {
        match self {
            ImageOperation::Square700 => Some(ResizeSpec::FixedSquare(700)),
            ImageOperation::Square300 => Some(ResizeSpec::FixedSquare(300)),
            ImageOperation::Width1600 => Some(ResizeSpec::FitWidth(1600)),
            ImageOperation::Ico => Some(ResizeSpec::FixedSquare(256)),
            ImageOperation::Png100 => Some(ResizeSpec::FixedSquare(100)),
            ImageOperation::Resize {
                width,
                height: Some(height),
                ..
            } => Some(ResizeSpec::FitBox(*width, *height)),
            ImageOperation::Resize {
                width,
                height: None,
                ..
            } => Some(ResizeSpec::FitWidth(*width)),
            ImageOperation::ResizeHeight { height, .. } => Some(ResizeSpec::FitHeight(*height)),
            ImageOperation::AspectRatio { ratio, .. } => Some(ResizeSpec::ToAspectRatio(*ratio)),
            ImageOperation::Crop { width, height, .. } => {
                Some(ResizeSpec::ExactBox(*width, *height))
            }
            ImageOperation::Webp
            | ImageOperation::Grayscale { .. }
            | ImageOperation::Overlay { .. }
            | ImageOperation::Jpg => None,
        }
    }

    /// Encoder and extension of the output
    ///
    /// # Errors
    ///
    /// See [`OutputFormat::resolve`].
    pub fn output_format(&self, input: &Path) -> Result<(ImageFormat, String)> {
        match self {
            ImageOperation::Webp
            | ImageOperation::Square700
            | ImageOperation::Square300
            | ImageOperation::Width1600 => OutputFormat::Webp.resolve(input),
            ImageOperation::Ico => Ok((ImageFormat::Ico, "ico".to_string())),
            ImageOperation::Png100 | ImageOperation::Overlay { .. } => {
                OutputFormat::Png.resolve(input)
            }
            ImageOperation::Jpg => OutputFormat::Jpg.resolve(input),
            ImageOperation::Grayscale { format }
            | ImageOperation::Resize { format, .. }
            | ImageOperation::ResizeHeight { format, .. }
            | ImageOperation::AspectRatio { format, .. }
            | ImageOperation::Crop { format, .. } => format.resolve(input),
        }
    }

    /// Whether the output name carries a `-<tag>`. Untagged outputs may collide with
    /// the input.
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        !matches!(
            self,
            ImageOperation::Webp | ImageOperation::Ico | ImageOperation::Jpg
        )
    }

    /// The `-<tag>` part of the output name; `output` is the final image size
    #[must_use]
    pub fn output_tag(&self, output: MediaDimensions) -> Option<String> {
        match self {
            ImageOperation::Webp | ImageOperation::Ico | ImageOperation::Jpg => None,
            ImageOperation::Square700 => Some("700".to_string()),
            ImageOperation::Square300 => Some("300".to_string()),
            ImageOperation::Width1600 => Some("1600".to_string()),
            ImageOperation::Png100 => Some("100x100".to_string()),
            ImageOperation::Grayscale { .. } => Some("grayscale".to_string()),
            ImageOperation::Overlay { .. } => Some("overlay".to_string()),
            ImageOperation::Resize { .. } | ImageOperation::ResizeHeight { .. } => {
                Some(output.to_string())
            }
            ImageOperation::AspectRatio { ratio, .. } => {
                Some(format!("{}x{}", ratio.num, ratio.den))
            }
            ImageOperation::Crop { .. } => Some(format!("crop-{output}")),
        }
    }
}

/// Run `operation` on tokio's blocking pool
///
/// # Errors
///
/// Any [`ConversionError`] from [`convert_image_blocking`], or
/// [`ConversionError::Task`] if the worker panicked.
pub async fn convert_image(
    input: PathBuf,
    operation: ImageOperation,
    settings: ConversionSettings,
) -> Result<ConversionOutcome> {
    tokio::task::spawn_blocking(move || convert_image_blocking(&input, &operation, &settings))
        .await?
}

/// Decode `input`, apply `operation`, and write the output next to it.
///
/// # Errors
///
/// Returns an error if decoding, geometry, naming, or encoding fails.
pub fn convert_image_blocking(
    input: &Path,
    operation: &ImageOperation,
    settings: &ConversionSettings,
) -> Result<ConversionOutcome> {
    let started = Instant::now();
    info!(
        "Converting {} with {}",
        input.display(),
        operation.name()
    );

    match apply(input, operation, settings) {
        Ok(outcome) => {
            info!(
                "Wrote {} ({}) in {}",
                outcome.output.display(),
                outcome.dimensions,
                humantime::format_duration(started.elapsed())
            );
            Ok(outcome)
        }
        Err(e) => {
            error!("Failed to convert {}: {}", input.display(), e);
            Err(e)
        }
    }
}

fn apply(
    input: &Path,
    operation: &ImageOperation,
    settings: &ConversionSettings,
) -> Result<ConversionOutcome> {
    // Fail on bad naming or format before paying for the decode
    let (format, extension) = operation.output_format(input)?;
    if !operation.is_tagged() {
        output_path(input, None, &extension)?;
    }

    let img = open_image(input)?;
    let source = MediaDimensions::new(img.width(), img.height());
    debug!("Decoded {} at {}", input.display(), source);

    let img = match operation.resize_spec() {
        Some(spec) => {
            let plan = spec.resolve(source)?;
            debug!("Resize plan for {}: {:?}", operation.name(), plan);
            apply_plan(&img, &plan)
        }
        None => img,
    };

    let img = match operation {
        ImageOperation::Grayscale { .. } => grayscale(&img),
        ImageOperation::Overlay { overlay, position } => {
            let top = open_image(overlay)?;
            DynamicImage::ImageRgba8(composite(img.to_rgba8(), &top.to_rgba8(), *position))
        }
        _ => img,
    };

    let dimensions = MediaDimensions::new(img.width(), img.height());
    let tag = operation.output_tag(dimensions);
    let output = output_path(input, tag.as_deref(), &extension)?;
    save_image(&img, &output, format, settings)?;

    Ok(ConversionOutcome {
        input: input.to_path_buf(),
        output,
        dimensions,
    })
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ConversionError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Crop then resample to the plan's output size
#[must_use]
pub fn apply_plan(img: &DynamicImage, plan: &ResizePlan) -> DynamicImage {
    let cropped = match plan.crop {
        Some(crop) => img.crop_imm(crop.x, crop.y, crop.width, crop.height),
        None => img.clone(),
    };
    if cropped.width() == plan.output.width && cropped.height() == plan.output.height {
        return cropped;
    }
    cropped.resize_exact(plan.output.width, plan.output.height, FilterType::Lanczos3)
}

/// Brighten by 20 % and drop color, keeping alpha
#[must_use]
pub fn grayscale(img: &DynamicImage) -> DynamicImage {
    let mut rgba = img.to_rgba8();
    for pixel in rgba.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            // rounds half up, same as `(c * 1.2).round()`
            let scaled = (u16::from(*channel) * GRAYSCALE_BRIGHTNESS_NUM + GRAYSCALE_BRIGHTNESS_DEN / 2)
                / GRAYSCALE_BRIGHTNESS_DEN;
            *channel = u8::try_from(scaled).unwrap_or(u8::MAX);
        }
    }
    DynamicImage::ImageRgba8(rgba).grayscale()
}

/// Alpha-composite `top` over `base` at every placement of `position`
#[must_use]
pub fn composite(mut base: RgbaImage, top: &RgbaImage, position: OverlayPosition) -> RgbaImage {
    let base_size = MediaDimensions::new(base.width(), base.height());
    let top_size = MediaDimensions::new(top.width(), top.height());
    for (x, y) in position.placements(base_size, top_size) {
        imageops::overlay(&mut base, top, x, y);
    }
    base
}

/// Encode fully in memory, then write. A failed encode leaves nothing on disk.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    settings: &ConversionSettings,
) -> Result<()> {
    let bytes = encode_image(img, format, settings).map_err(|source| ConversionError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, bytes).map_err(|source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn encode_image(
    img: &DynamicImage,
    format: ImageFormat,
    settings: &ConversionSettings,
) -> image::ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, settings.jpeg_quality);
            if img.color().has_color() {
                encoder.encode_image(&img.to_rgb8())?;
            } else {
                encoder.encode_image(&img.to_luma8())?;
            }
        }
        ImageFormat::WebP => bytes = encode_lossy_webp(img, settings.webp_quality)?,
        ImageFormat::Ico => {
            let img = to_8bit_rgb_or_rgba(img);
            img.write_to(&mut Cursor::new(&mut bytes), format)?;
        }
        other => img.write_to(&mut Cursor::new(&mut bytes), other)?,
    }
    Ok(bytes)
}

/// libwebp lossy encode; alpha is kept only when the image has it
fn encode_lossy_webp(img: &DynamicImage, quality: u8) -> image::ImageResult<Vec<u8>> {
    let (width, height) = (img.width(), img.height());
    let quality = f32::from(quality);
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(&rgba, width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(&rgb, width, height).encode_simple(false, quality)
    };
    encoded.map(|memory| memory.to_vec()).map_err(|e| {
        ImageError::Encoding(EncodingError::new(
            ImageFormatHint::Exact(ImageFormat::WebP),
            format!("libwebp: {e:?}"),
        ))
    })
}

/// The ICO encoder only takes 8-bit RGB(A)
fn to_8bit_rgb_or_rgba(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(img),
        other if other.color().has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(other.to_rgba8())),
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn settings() -> ConversionSettings {
        ConversionSettings::default()
    }

    /// Left half red, right half blue, so crops are visible in the output
    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        img.save(path).unwrap();
    }

    fn dims_of(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    #[test]
    fn webp_conversion() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("photo.png");
        write_test_image(&input, 64, 32);

        let outcome = convert_image_blocking(&input, &ImageOperation::Webp, &settings())?;
        assert_eq!(outcome.output, td.path().join("photo.webp"));
        assert_eq!(dims_of(&outcome.output), (64, 32));
        assert_eq!(outcome.to_string(), format!("Output: {}", outcome.output.display()));
        Ok(())
    }

    #[test]
    fn square_crops_are_named_and_sized() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("wide.png");
        write_test_image(&input, 1400, 800);

        let outcome = convert_image_blocking(&input, &ImageOperation::Square700, &settings())?;
        assert_eq!(outcome.output, td.path().join("wide-700.webp"));
        assert_eq!(dims_of(&outcome.output), (700, 700));

        let outcome = convert_image_blocking(&input, &ImageOperation::Square300, &settings())?;
        assert_eq!(outcome.output, td.path().join("wide-300.webp"));
        assert_eq!(dims_of(&outcome.output), (300, 300));

        let outcome = convert_image_blocking(&input, &ImageOperation::Png100, &settings())?;
        assert_eq!(outcome.output, td.path().join("wide-100x100.png"));
        assert_eq!(dims_of(&outcome.output), (100, 100));
        Ok(())
    }

    #[test]
    fn width1600_keeps_ratio() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("big.png");
        write_test_image(&input, 300, 200);

        let outcome = convert_image_blocking(&input, &ImageOperation::Width1600, &settings())?;
        assert_eq!(outcome.output, td.path().join("big-1600.webp"));
        assert_eq!(dims_of(&outcome.output), (1600, 1067));
        Ok(())
    }

    #[test]
    fn ico_is_256_square() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("logo.png");
        write_test_image(&input, 512, 300);

        let outcome = convert_image_blocking(&input, &ImageOperation::Ico, &settings())?;
        assert_eq!(outcome.output, td.path().join("logo.ico"));
        assert_eq!(outcome.dimensions, MediaDimensions::new(256, 256));
        assert!(outcome.output.exists());
        Ok(())
    }

    #[test]
    fn jpg_drops_alpha() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("alpha.png");
        write_test_image(&input, 40, 20);

        let outcome = convert_image_blocking(&input, &ImageOperation::Jpg, &settings())?;
        assert_eq!(outcome.output, td.path().join("alpha.jpg"));
        let decoded = image::open(&outcome.output)?;
        assert!(!decoded.color().has_alpha());
        Ok(())
    }

    #[test]
    fn grayscale_keeps_format_by_default() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("color.png");
        write_test_image(&input, 10, 10);

        let op = ImageOperation::Grayscale {
            format: OutputFormat::Keep,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("color-grayscale.png"));

        let decoded = image::open(&outcome.output)?.to_rgba8();
        let pixel = decoded.get_pixel(0, 0);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
        Ok(())
    }

    #[test]
    fn grayscale_brightens() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 255])));
        let gray = grayscale(&img).to_luma8();
        assert_eq!(gray.get_pixel(0, 0)[0], 120);
    }

    #[test]
    fn resize_with_format_switch() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("shot.png");
        write_test_image(&input, 400, 300);

        let op = ImageOperation::Resize {
            width: 200,
            height: None,
            format: OutputFormat::Webp,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("shot-200x150.webp"));

        let op = ImageOperation::Resize {
            width: 200,
            height: Some(100),
            format: OutputFormat::Keep,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("shot-133x100.png"));

        let op = ImageOperation::ResizeHeight {
            height: 60,
            format: OutputFormat::Jpg,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("shot-80x60.jpg"));
        Ok(())
    }

    #[test]
    fn aspect_ratio_crops_without_scaling() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("pano.png");
        write_test_image(&input, 400, 100);

        let op = ImageOperation::AspectRatio {
            ratio: AspectRatio::new(1, 1)?,
            format: OutputFormat::Keep,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("pano-1x1.png"));
        assert_eq!(dims_of(&outcome.output), (100, 100));

        // centered crop straddles the red/blue boundary
        let decoded = image::open(&outcome.output)?.to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(99, 0), &Rgba([0, 0, 255, 255]));
        Ok(())
    }

    #[test]
    fn overlay_composites_center() -> eyre::Result<()> {
        let td = tempdir()?;
        let base = td.path().join("base.png");
        RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])).save(&base)?;
        let top = td.path().join("mark.png");
        RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])).save(&top)?;

        let op = ImageOperation::Overlay {
            overlay: top,
            position: OverlayPosition::Center,
        };
        let outcome = convert_image_blocking(&base, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("base-overlay.png"));

        let decoded = image::open(&outcome.output)?.to_rgba8();
        assert_eq!(decoded.get_pixel(4, 4), &Rgba([255, 255, 255, 255]));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        Ok(())
    }

    #[test]
    fn tile_placements_cover_base() {
        let placements = OverlayPosition::Tile
            .placements(MediaDimensions::new(10, 5), MediaDimensions::new(4, 4));
        assert_eq!(
            placements,
            vec![(0, 0), (4, 0), (8, 0), (0, 4), (4, 4), (8, 4)]
        );
    }

    #[test]
    fn corner_placements() {
        let base = MediaDimensions::new(100, 50);
        let top = MediaDimensions::new(10, 20);
        assert_eq!(OverlayPosition::BottomRight.placements(base, top), vec![(90, 30)]);
        assert_eq!(OverlayPosition::TopRight.placements(base, top), vec![(90, 0)]);
        assert_eq!(OverlayPosition::BottomLeft.placements(base, top), vec![(0, 30)]);
        // larger overlay centers with negative offsets
        assert_eq!(
            OverlayPosition::Center.placements(top, base),
            vec![(-45, -15)]
        );
    }

    #[test]
    fn webp_of_webp_is_refused() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("already.webp");
        std::fs::write(&input, b"not really")?;
        let err = convert_image_blocking(&input, &ImageOperation::Webp, &settings()).unwrap_err();
        assert!(matches!(err, ConversionError::OutputWouldOverwriteInput(_)));
        Ok(())
    }

    #[test]
    fn decode_failure_is_reported() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("broken.png");
        std::fs::write(&input, b"definitely not a png")?;
        let err = convert_image_blocking(&input, &ImageOperation::Jpg, &settings()).unwrap_err();
        assert!(matches!(err, ConversionError::Decode { .. }));
        assert!(!td.path().join("broken.jpg").exists());
        Ok(())
    }

    #[test]
    fn keep_needs_known_extension() {
        let err = OutputFormat::Keep.resolve(Path::new("noext")).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat(_)));
        let (format, ext) = OutputFormat::Keep.resolve(Path::new("a.JPEG")).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(ext, "JPEG");
    }

    #[tokio::test]
    async fn async_conversion_runs_on_blocking_pool() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("async.png");
        write_test_image(&input, 8, 8);
        let outcome = convert_image(input, ImageOperation::Webp, settings()).await?;
        assert!(outcome.output.exists());
        Ok(())
    }

    /// Smooth gradient with a little deterministic grain, saved as a high-quality JPEG
    fn write_photo_like_jpeg(path: &Path, size: u32) {
        let mut seed: u32 = 7;
        let img = image::RgbImage::from_fn(size, size, |x, y| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let grain = (seed >> 28) as u8;
            let r = (x * 255 / size) as u8;
            let g = (y * 255 / size) as u8;
            image::Rgb([r.saturating_add(grain), g.saturating_add(grain), 128 + grain])
        });
        let mut file = std::fs::File::create(path).unwrap();
        JpegEncoder::new_with_quality(&mut file, 95)
            .encode_image(&img)
            .unwrap();
    }

    #[test]
    fn webp_output_is_smaller_than_photo_input() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("photo.jpg");
        write_photo_like_jpeg(&input, 512);

        let outcome = convert_image_blocking(&input, &ImageOperation::Webp, &settings())?;
        let jpg_len = std::fs::metadata(&input)?.len();
        let webp_len = std::fs::metadata(&outcome.output)?.len();
        assert!(
            webp_len < jpg_len,
            "webp {webp_len} bytes is not smaller than jpg {jpg_len} bytes"
        );
        assert_eq!(dims_of(&outcome.output), (512, 512));
        Ok(())
    }

    #[test]
    fn lower_webp_quality_gives_smaller_files() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("photo.jpg");
        write_photo_like_jpeg(&input, 256);

        let high = ConversionSettings {
            webp_quality: 95,
            ..settings()
        };
        let outcome = convert_image_blocking(&input, &ImageOperation::Webp, &high)?;
        let high_len = std::fs::metadata(&outcome.output)?.len();

        let low = ConversionSettings {
            webp_quality: 20,
            ..settings()
        };
        let outcome = convert_image_blocking(&input, &ImageOperation::Webp, &low)?;
        let low_len = std::fs::metadata(&outcome.output)?.len();
        assert!(low_len < high_len);
        Ok(())
    }

    #[test]
    fn failed_encode_leaves_no_output() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("icon.ico");
        write_test_image(&input, 32, 32);

        // ICO caps each side at 256
        let op = ImageOperation::Resize {
            width: 300,
            height: None,
            format: OutputFormat::Keep,
        };
        let err = convert_image_blocking(&input, &op, &settings()).unwrap_err();
        assert!(matches!(err, ConversionError::Encode { .. }));
        assert!(!td.path().join("icon-300x300.ico").exists());
        Ok(())
    }

    #[test]
    fn jpg_of_upper_case_jpg_is_refused() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("photo.JPG");
        write_photo_like_jpeg(&input, 16);
        let before = std::fs::read(&input)?;

        let err = convert_image_blocking(&input, &ImageOperation::Jpg, &settings()).unwrap_err();
        assert!(matches!(err, ConversionError::OutputWouldOverwriteInput(_)));
        assert_eq!(std::fs::read(&input)?, before);
        Ok(())
    }

    #[test]
    fn crop_scales_to_exact_box() -> eyre::Result<()> {
        let td = tempdir()?;
        let input = td.path().join("pano.png");
        write_test_image(&input, 400, 100);

        let op = ImageOperation::Crop {
            width: 50,
            height: 40,
            format: OutputFormat::Png,
        };
        let outcome = convert_image_blocking(&input, &op, &settings())?;
        assert_eq!(outcome.output, td.path().join("pano-crop-50x40.png"));
        assert_eq!(dims_of(&outcome.output), (50, 40));
        Ok(())
    }

    #[test]
    fn auto_overlay_tiles_small_marks() -> eyre::Result<()> {
        let td = tempdir()?;
        let base = td.path().join("base.png");
        RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])).save(&base)?;
        let top = td.path().join("mark.png");
        RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])).save(&top)?;

        let op = ImageOperation::Overlay {
            overlay: top,
            position: OverlayPosition::Auto,
        };
        let outcome = convert_image_blocking(&base, &op, &settings())?;
        let decoded = image::open(&outcome.output)?.to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(decoded.get_pixel(9, 9), &Rgba([255, 255, 255, 255]));
        Ok(())
    }

    #[test]
    fn auto_placement_centers_large_overlays() {
        let base = MediaDimensions::new(10, 10);
        assert_eq!(
            OverlayPosition::Auto.placements(base, MediaDimensions::new(10, 10)),
            vec![(0, 0)]
        );
        assert_eq!(
            OverlayPosition::Auto.placements(base, MediaDimensions::new(20, 30)),
            vec![(-5, -10)]
        );
        assert_eq!(
            OverlayPosition::Auto.placements(base, MediaDimensions::new(5, 10)).len(),
            2
        );
    }

    #[test]
    fn grayscale_brightening_saturates() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([250, 250, 250, 255])));
        assert_eq!(grayscale(&img).to_luma8().get_pixel(0, 0)[0], 255);
    }
}
