//! Output geometry for resize, crop and video-frame operations.
//!
//! Everything here is pure arithmetic on integer pixel sizes. Callers decode the
//! source, ask this module what to crop and how big the result should be, and hand
//! the answer to the codec or to ffmpeg.
//!
//! Rounding is half-up on exact rational values, so `round(2000 * 1600 / 3000)`
//! is `1067` regardless of float error.

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use std::fmt;
use std::str::FromStr;

/// Errors raised by the geometry resolver
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Invalid aspect ratio '{0}', expected two positive integers like 16:9")]
    InvalidAspectRatio(String),

    #[error("Cropping {source_width}x{source_height} to {ratio} leaves nothing to keep")]
    DegenerateCrop {
        source_width: u32,
        source_height: u32,
        ratio: String,
    },
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Natural size of a decoded image or video frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaDimensions {
    pub width: u32,
    pub height: u32,
}

impl MediaDimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round both axes to an even size, halves going up.
    ///
    /// H.264 with 4:2:0 chroma rejects odd frame sizes.
    #[must_use]
    pub fn to_even(self) -> Self {
        Self {
            width: round_to_even(self.width),
            height: round_to_even(self.height),
        }
    }

    fn check(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::InvalidDimension(format!(
                "source must be non-empty, got {self}"
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for MediaDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A `W:H` ratio such as `16:9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    pub num: u32,
    pub den: u32,
}

impl AspectRatio {
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAspectRatio`] if either component is zero.
    pub fn new(num: u32, den: u32) -> Result<Self> {
        Self { num, den }.check()
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Taller than wide
    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.num < self.den
    }

    fn check(self) -> Result<Self> {
        if self.num == 0 || self.den == 0 {
            return Err(GeometryError::InvalidAspectRatio(self.to_string()));
        }
        Ok(self)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

impl FromStr for AspectRatio {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GeometryError::InvalidAspectRatio(s.to_string());
        let (num, den) = s.trim().split_once(':').ok_or_else(invalid)?;
        let num = num.trim().parse::<u32>().map_err(|_| invalid())?;
        let den = den.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(num, den).map_err(|_| invalid())
    }
}

impl<'a> Arbitrary<'a> for AspectRatio {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self {
            num: u.int_in_range(1..=32)?,
            den: u.int_in_range(1..=32)?,
        })
    }
}

/// A rectangle inside the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    #[must_use]
    pub fn size(&self) -> MediaDimensions {
        MediaDimensions::new(self.width, self.height)
    }

    /// Whether the box covers the whole source
    #[must_use]
    pub fn is_full(&self, source: MediaDimensions) -> bool {
        self.x == 0 && self.y == 0 && self.size() == source
    }
}

/// Result of a cover-crop: take `crop` from the source, then resample it to `output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverCrop {
    pub crop: CropBox,
    pub output: MediaDimensions,
}

/// Short-side height tiers for video re-encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Arbitrary)]
pub enum VideoResolution {
    P480,
    #[default]
    P720,
}

impl VideoResolution {
    #[must_use]
    pub const fn short_side(self) -> u32 {
        match self {
            VideoResolution::P480 => 480,
            VideoResolution::P720 => 720,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VideoResolution::P480 => "480p",
            VideoResolution::P720 => "720p",
        }
    }
}

impl fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoResolution {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "480p" => Ok(VideoResolution::P480),
            "720p" => Ok(VideoResolution::P720),
            other => Err(GeometryError::InvalidDimension(format!(
                "unknown resolution '{other}', expected 480p or 720p"
            ))),
        }
    }
}

/// What an image operation wants the output to look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSpec {
    /// Cover-crop to a square of this side
    FixedSquare(u32),
    /// Fit inside this width, height follows
    FitWidth(u32),
    /// Fit inside this height, width follows
    FitHeight(u32),
    /// Fit inside both bounds, no cropping
    FitBox(u32, u32),
    /// Centered crop to a ratio, no scaling
    ToAspectRatio(AspectRatio),
    /// Cover-crop to exactly this box
    ExactBox(u32, u32),
}

/// Crop (if any) followed by a resample to `output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub crop: Option<CropBox>,
    pub output: MediaDimensions,
}

impl ResizeSpec {
    /// # Errors
    ///
    /// Propagates errors from [`resolve_fit_inside`] and [`resolve_cover_crop`].
    pub fn resolve(self, source: MediaDimensions) -> Result<ResizePlan> {
        match self {
            ResizeSpec::FixedSquare(side) => resolve_cover_crop(source, side, side).map(Into::into),
            ResizeSpec::ExactBox(w, h) => resolve_cover_crop(source, w, h).map(Into::into),
            ResizeSpec::FitWidth(w) => Ok(ResizePlan {
                crop: None,
                output: resolve_fit_inside(source, Some(w), None)?,
            }),
            ResizeSpec::FitHeight(h) => Ok(ResizePlan {
                crop: None,
                output: resolve_fit_inside(source, None, Some(h))?,
            }),
            ResizeSpec::FitBox(w, h) => Ok(ResizePlan {
                crop: None,
                output: resolve_fit_inside(source, Some(w), Some(h))?,
            }),
            ResizeSpec::ToAspectRatio(ratio) => {
                let cover = resolve_cover_crop(source, ratio.num, ratio.den)?;
                Ok(ResizePlan {
                    crop: Some(cover.crop),
                    output: cover.crop.size(),
                })
            }
        }
    }
}

impl From<CoverCrop> for ResizePlan {
    fn from(cover: CoverCrop) -> Self {
        ResizePlan {
            crop: Some(cover.crop),
            output: cover.output,
        }
    }
}

/// Scale `source` proportionally so it fits inside the given bounds.
///
/// A `None` bound is unconstrained. The constrained axis matches its bound exactly;
/// upscaling is allowed.
///
/// # Errors
///
/// [`GeometryError::InvalidDimension`] for an empty source, a zero bound, or when
/// both bounds are missing.
pub fn resolve_fit_inside(
    source: MediaDimensions,
    target_w: Option<u32>,
    target_h: Option<u32>,
) -> Result<MediaDimensions> {
    let source = source.check()?;
    let (sw, sh) = (source.width, source.height);
    match (target_w, target_h) {
        (Some(0), _) | (_, Some(0)) => Err(GeometryError::InvalidDimension(
            "target size must be positive".to_string(),
        )),
        (None, None) => Err(GeometryError::InvalidDimension(
            "at least one of width or height is required".to_string(),
        )),
        (Some(w), None) => Ok(MediaDimensions::new(w, scale_round(sh, w, sw).max(1))),
        (None, Some(h)) => Ok(MediaDimensions::new(scale_round(sw, h, sh).max(1), h)),
        (Some(w), Some(h)) => {
            // w/sw <= h/sh means width is the tighter bound
            if u64::from(w) * u64::from(sh) <= u64::from(h) * u64::from(sw) {
                Ok(MediaDimensions::new(w, scale_round(sh, w, sw).clamp(1, h)))
            } else {
                Ok(MediaDimensions::new(scale_round(sw, h, sh).clamp(1, w), h))
            }
        }
    }
}

/// Largest centered crop of `source` with ratio `target_w:target_h`.
///
/// The returned output size is the target box itself; the codec resamples the crop
/// to it.
///
/// # Errors
///
/// [`GeometryError::InvalidAspectRatio`] for a zero target,
/// [`GeometryError::InvalidDimension`] for an empty source, and
/// [`GeometryError::DegenerateCrop`] when a cropped axis rounds to zero.
pub fn resolve_cover_crop(
    source: MediaDimensions,
    target_w: u32,
    target_h: u32,
) -> Result<CoverCrop> {
    if target_w == 0 || target_h == 0 {
        return Err(GeometryError::InvalidAspectRatio(format!(
            "{target_w}:{target_h}"
        )));
    }
    let source = source.check()?;
    let (sw, sh) = (source.width, source.height);

    let (crop_w, crop_h) = if u64::from(sw) * u64::from(target_h) > u64::from(target_w) * u64::from(sh)
    {
        // source is relatively wider: keep full height
        (scale_round(sh, target_w, target_h).min(sw), sh)
    } else {
        (sw, scale_round(sw, target_h, target_w).min(sh))
    };

    if crop_w == 0 || crop_h == 0 {
        return Err(GeometryError::DegenerateCrop {
            source_width: sw,
            source_height: sh,
            ratio: format!("{target_w}:{target_h}"),
        });
    }

    Ok(CoverCrop {
        crop: CropBox {
            x: (sw - crop_w) / 2,
            y: (sh - crop_h) / 2,
            width: crop_w,
            height: crop_h,
        },
        output: MediaDimensions::new(target_w, target_h),
    })
}

/// Absolute frame size for a video re-encoded to `ratio` at `resolution`.
///
/// The tier is the frame height. Portrait ratios derive their width from it first and
/// then recompute the height from that width, landscape ratios derive the width
/// directly. The result is not even-rounded; use [`MediaDimensions::to_even`] before
/// handing it to an encoder that needs it.
///
/// # Errors
///
/// [`GeometryError::InvalidAspectRatio`] if either ratio component is zero.
pub fn resolve_video_frame(
    ratio: AspectRatio,
    resolution: VideoResolution,
) -> Result<MediaDimensions> {
    let ratio = ratio.check()?;
    let tier = resolution.short_side();
    if ratio.is_portrait() {
        let width = scale_round(tier, ratio.num, ratio.den).max(1);
        let height = scale_round(width, ratio.den, ratio.num).max(1);
        Ok(MediaDimensions::new(width, height))
    } else {
        let width = scale_round(tier, ratio.num, ratio.den).max(1);
        Ok(MediaDimensions::new(width, tier))
    }
}

/// `round(value * num / den)` with halves rounding up, saturating at `u32::MAX`
fn scale_round(value: u32, num: u32, den: u32) -> u32 {
    let numerator = u128::from(value) * u128::from(num);
    let den = u128::from(den);
    let rounded = (2 * numerator + den) / (2 * den);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn round_to_even(value: u32) -> u32 {
    if value % 2 == 0 {
        value.max(2)
    } else {
        value.checked_add(1).unwrap_or(value - 1)
    }
}
