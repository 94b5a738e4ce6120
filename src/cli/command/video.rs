use crate::cli::arbitrary_values::arbitrary_path;
use crate::cli::command::run_request;
use crate::cli::to_args::ToArgs;
use crate::conversion::ConversionRequest;
use crate::geometry::AspectRatio;
use crate::geometry::VideoResolution;
use crate::video::Compression;
use crate::video::VideoRequest;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

/// Output lands next to the input as `<stem>-<W>x<H>.mp4`
#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct VideoArgs {
    /// Video to re-encode
    #[arbitrary(with = arbitrary_path)]
    pub input: PathBuf,

    /// Target ratio as `W:H`, for example `9:16`
    pub ratio: AspectRatio,

    /// Frame height tier, `480p` or `720p`
    #[clap(long, default_value_t = VideoResolution::P720)]
    pub resolution: VideoResolution,

    /// Higher compression means smaller files and lower quality
    #[clap(long, value_enum, default_value_t = Compression::Medium)]
    pub compression: Compression,
}

impl VideoArgs {
    #[must_use]
    pub fn into_request(self) -> ConversionRequest {
        ConversionRequest::Video(VideoRequest {
            input: self.input,
            ratio: self.ratio,
            resolution: self.resolution,
            compression: self.compression,
        })
    }

    /// # Errors
    ///
    /// Returns an error if ffmpeg cannot be run or fails.
    pub fn invoke(self) -> eyre::Result<()> {
        run_request(self.into_request())
    }
}

impl ToArgs for VideoArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![
            self.input.clone().into_os_string(),
            self.ratio.to_string().into(),
            "--resolution".into(),
            self.resolution.as_str().into(),
            "--compression".into(),
            self.compression.as_str().into(),
        ]
    }
}
