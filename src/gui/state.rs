//! Shared application state for the optimizer window

use crate::conversion::ConversionRequest;
use crate::conversion::ConversionSettings;
use crate::geometry::AspectRatio;
use crate::geometry::VideoResolution;
use crate::image_processing::ImageOperation;
use crate::image_processing::OutputFormat;
use crate::image_processing::OverlayPosition;
use crate::video::Compression;
use crate::video::VideoRequest;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::sync::mpsc::{self};
use std::thread;
use tracing::info;
use tracing::warn;

/// Entries of the operation picker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationChoice {
    Webp,
    Square700,
    Square300,
    Width1600,
    Ico,
    Png100,
    Jpg,
    Grayscale,
    Overlay,
    Resize,
    ResizeHeight,
    AspectRatio,
    Crop,
    Video,
    Batch,
}

impl OperationChoice {
    pub const ALL: [OperationChoice; 15] = [
        OperationChoice::Webp,
        OperationChoice::Square700,
        OperationChoice::Square300,
        OperationChoice::Width1600,
        OperationChoice::Ico,
        OperationChoice::Png100,
        OperationChoice::Jpg,
        OperationChoice::Grayscale,
        OperationChoice::Overlay,
        OperationChoice::Resize,
        OperationChoice::ResizeHeight,
        OperationChoice::AspectRatio,
        OperationChoice::Crop,
        OperationChoice::Video,
        OperationChoice::Batch,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            OperationChoice::Webp => "Convert to WebP",
            OperationChoice::Square700 => "Square 700x700 (WebP)",
            OperationChoice::Square300 => "Square 300x300 (WebP)",
            OperationChoice::Width1600 => "Width 1600 (WebP)",
            OperationChoice::Ico => "Icon 256x256 (ICO)",
            OperationChoice::Png100 => "PNG 100x100",
            OperationChoice::Jpg => "Convert to JPEG",
            OperationChoice::Grayscale => "Grayscale",
            OperationChoice::Overlay => "Overlay image",
            OperationChoice::Resize => "Resize to width / box",
            OperationChoice::ResizeHeight => "Resize to height",
            OperationChoice::AspectRatio => "Crop to aspect ratio",
            OperationChoice::Crop => "Crop and resize",
            OperationChoice::Video => "Video to aspect ratio",
            OperationChoice::Batch => "Folder to WebP",
        }
    }

    /// Whether the input is a folder rather than a file
    #[must_use]
    pub const fn takes_folder(self) -> bool {
        matches!(self, OperationChoice::Batch)
    }

    #[must_use]
    pub const fn has_format(self) -> bool {
        matches!(
            self,
            OperationChoice::Grayscale
                | OperationChoice::Resize
                | OperationChoice::ResizeHeight
                | OperationChoice::AspectRatio
                | OperationChoice::Crop
        )
    }

    /// File dialog filter for the input, `None` when the input is a folder
    #[must_use]
    pub fn input_filter(self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            OperationChoice::Batch => None,
            OperationChoice::Video => Some(("Videos", &VIDEO_EXTENSIONS)),
            _ => Some(("Images", &IMAGE_EXTENSIONS)),
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "ico"];
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "mkv", "avi", "webm", "m4v"];

/// Messages sent from the conversion thread
#[derive(Debug)]
pub enum BackgroundMessage {
    Finished(Result<String, String>),
}

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    pub operation: OperationChoice,
    /// Input file, or folder for a batch
    pub input: String,
    /// Image drawn on top for the overlay operation
    pub overlay: String,
    pub position: OverlayPosition,
    pub width: String,
    pub height: String,
    /// `W:H`
    pub ratio: String,
    pub format: OutputFormat,
    pub resolution: VideoResolution,
    pub compression: Compression,
    /// Last status line shown under the form
    pub status: Option<Result<String, String>>,
    pub running: bool,
    /// Whether the about window is open
    pub about_open: bool,
    background_sender: Sender<BackgroundMessage>,
    background_receiver: Receiver<BackgroundMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        let (background_sender, background_receiver) = mpsc::channel();
        Self {
            operation: OperationChoice::Webp,
            input: String::new(),
            overlay: String::new(),
            position: OverlayPosition::Auto,
            width: String::new(),
            height: String::new(),
            ratio: "16:9".to_string(),
            format: OutputFormat::Keep,
            resolution: VideoResolution::P720,
            compression: Compression::Medium,
            status: None,
            running: false,
            about_open: false,
            background_sender,
            background_receiver,
        }
    }
}

impl AppState {
    /// Turn the form fields into a request
    ///
    /// # Errors
    ///
    /// Returns a message for the status line when a field is missing or malformed.
    pub fn build_request(&self) -> Result<ConversionRequest, String> {
        let input = self.input.trim();
        if input.is_empty() {
            return Err(if self.operation.takes_folder() {
                "Choose a folder first".to_string()
            } else {
                "Choose an input file first".to_string()
            });
        }
        let input = PathBuf::from(input);

        let operation = match self.operation {
            OperationChoice::Webp => ImageOperation::Webp,
            OperationChoice::Square700 => ImageOperation::Square700,
            OperationChoice::Square300 => ImageOperation::Square300,
            OperationChoice::Width1600 => ImageOperation::Width1600,
            OperationChoice::Ico => ImageOperation::Ico,
            OperationChoice::Png100 => ImageOperation::Png100,
            OperationChoice::Jpg => ImageOperation::Jpg,
            OperationChoice::Grayscale => ImageOperation::Grayscale {
                format: self.format,
            },
            OperationChoice::Overlay => {
                let overlay = self.overlay.trim();
                if overlay.is_empty() {
                    return Err("Choose an overlay image".to_string());
                }
                ImageOperation::Overlay {
                    overlay: PathBuf::from(overlay),
                    position: self.position,
                }
            }
            OperationChoice::Resize => ImageOperation::Resize {
                width: parse_dimension("Width", &self.width)?,
                height: if self.height.trim().is_empty() {
                    None
                } else {
                    Some(parse_dimension("Height", &self.height)?)
                },
                format: self.format,
            },
            OperationChoice::ResizeHeight => ImageOperation::ResizeHeight {
                height: parse_dimension("Height", &self.height)?,
                format: self.format,
            },
            OperationChoice::AspectRatio => ImageOperation::AspectRatio {
                ratio: self.parse_ratio()?,
                format: self.format,
            },
            OperationChoice::Crop => ImageOperation::Crop {
                width: parse_dimension("Width", &self.width)?,
                height: parse_dimension("Height", &self.height)?,
                format: self.format,
            },
            OperationChoice::Video => {
                return Ok(ConversionRequest::Video(VideoRequest {
                    input,
                    ratio: self.parse_ratio()?,
                    resolution: self.resolution,
                    compression: self.compression,
                }));
            }
            OperationChoice::Batch => return Ok(ConversionRequest::Folder(input)),
        };
        Ok(ConversionRequest::Image { input, operation })
    }

    fn parse_ratio(&self) -> Result<AspectRatio, String> {
        self.ratio.trim().parse().map_err(|e| format!("{e}"))
    }

    /// Start the selected conversion on a background thread
    pub fn run_selected(&mut self, ctx: &egui::Context) {
        if self.running {
            warn!("Conversion already running, ignoring request");
            return;
        }
        let request = match self.build_request() {
            Ok(request) => request,
            Err(message) => {
                self.status = Some(Err(message));
                return;
            }
        };

        self.running = true;
        self.status = None;
        let sender = self.background_sender.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = run_on_own_runtime(request);
            let _ = sender.send(BackgroundMessage::Finished(result));
            ctx.request_repaint();
        });
    }

    /// Poll for background task completions (call this each frame)
    pub fn poll_background_tasks(&mut self) {
        while let Ok(msg) = self.background_receiver.try_recv() {
            match msg {
                BackgroundMessage::Finished(result) => {
                    match &result {
                        Ok(summary) => info!("{}", summary),
                        Err(e) => warn!("Conversion failed: {}", e),
                    }
                    self.running = false;
                    self.status = Some(result);
                }
            }
        }
    }

    /// Ask for the input file, or folder for a batch
    pub fn browse_input(&mut self) {
        let picked = match self.operation.input_filter() {
            Some((name, extensions)) => rfd::FileDialog::new()
                .add_filter(name, extensions)
                .pick_file(),
            None => rfd::FileDialog::new().pick_folder(),
        };
        if let Some(path) = picked {
            self.input = path.display().to_string();
        }
    }

    /// Ask for the image drawn on top of the base
    pub fn browse_overlay(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.overlay = path.display().to_string();
        }
    }

    /// Use a dropped path as the input, and switch to the folder operation for folders
    pub fn accept_dropped(&mut self, path: PathBuf) {
        let path = dunce::canonicalize(&path).unwrap_or(path);
        if path.is_dir() {
            self.operation = OperationChoice::Batch;
        } else if self.operation.takes_folder() {
            self.operation = OperationChoice::Webp;
        }
        self.input = path.display().to_string();
    }
}

fn parse_dimension(field: &str, value: &str) -> Result<u32, String> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{field} must be a positive whole number")),
    }
}

fn run_on_own_runtime(request: ConversionRequest) -> Result<String, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let settings = ConversionSettings::load();
    rt.block_on(request.run(settings)).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        let state = AppState::default();
        assert_eq!(
            state.build_request(),
            Err("Choose an input file first".to_string())
        );
    }

    #[test]
    fn resize_without_height_fits_width() {
        let state = AppState {
            operation: OperationChoice::Resize,
            input: " photo.png ".to_string(),
            width: "800".to_string(),
            format: OutputFormat::Webp,
            ..AppState::default()
        };
        assert_eq!(
            state.build_request(),
            Ok(ConversionRequest::Image {
                input: PathBuf::from("photo.png"),
                operation: ImageOperation::Resize {
                    width: 800,
                    height: None,
                    format: OutputFormat::Webp,
                },
            })
        );
    }

    #[test]
    fn zero_width_is_rejected() {
        let state = AppState {
            operation: OperationChoice::Resize,
            input: "photo.png".to_string(),
            width: "0".to_string(),
            ..AppState::default()
        };
        assert!(state.build_request().is_err());
    }

    #[test]
    fn video_uses_ratio_and_tier() {
        let state = AppState {
            operation: OperationChoice::Video,
            input: "clip.mov".to_string(),
            ratio: "9:16".to_string(),
            resolution: VideoResolution::P480,
            compression: Compression::High,
            ..AppState::default()
        };
        let Ok(ConversionRequest::Video(request)) = state.build_request() else {
            panic!("expected a video request");
        };
        assert_eq!(request.ratio, AspectRatio::new(9, 16).unwrap());
        assert_eq!(request.resolution, VideoResolution::P480);
        assert_eq!(request.compression, Compression::High);
    }

    #[test]
    fn bad_ratio_is_rejected() {
        let state = AppState {
            operation: OperationChoice::AspectRatio,
            input: "photo.png".to_string(),
            ratio: "wide".to_string(),
            ..AppState::default()
        };
        assert!(state.build_request().is_err());
    }

    #[test]
    fn crop_needs_both_sides() {
        let mut state = AppState {
            operation: OperationChoice::Crop,
            input: "photo.png".to_string(),
            width: "300".to_string(),
            format: OutputFormat::Png,
            ..AppState::default()
        };
        assert!(state.build_request().is_err());

        state.height = "200".to_string();
        assert_eq!(
            state.build_request(),
            Ok(ConversionRequest::Image {
                input: PathBuf::from("photo.png"),
                operation: ImageOperation::Crop {
                    width: 300,
                    height: 200,
                    format: OutputFormat::Png,
                },
            })
        );
    }

    #[test]
    fn dialog_filters_follow_operation() {
        assert_eq!(OperationChoice::Batch.input_filter(), None);
        let (name, extensions) = OperationChoice::Webp.input_filter().unwrap();
        assert_eq!(name, "Images");
        assert!(extensions.contains(&"jpeg"));
        let (name, extensions) = OperationChoice::Video.input_filter().unwrap();
        assert_eq!(name, "Videos");
        assert!(extensions.contains(&"mov"));
    }

    #[test]
    fn dropped_folder_selects_batch() {
        let td = tempfile::tempdir().unwrap();
        let folder = dunce::canonicalize(td.path()).unwrap();
        let mut state = AppState::default();
        state.accept_dropped(td.path().to_path_buf());
        assert_eq!(state.operation, OperationChoice::Batch);
        assert_eq!(
            state.build_request(),
            Ok(ConversionRequest::Folder(folder))
        );
    }
}
