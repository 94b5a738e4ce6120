//! Folder conversion to WebP
//!
//! Files are converted one at a time in the order the filesystem lists them. A failed
//! file is recorded and the batch moves on.

use crate::conversion::ConversionOutcome;
use crate::conversion::ConversionSettings;
use crate::error::ConversionError;
use crate::error::Result;
use crate::image_processing::ImageOperation;
use crate::image_processing::convert_image;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

const BATCH_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Result of converting a folder
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConversionOutcome>,
    pub failures: Vec<(PathBuf, ConversionError)>,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converted {} images to WebP", self.converted.len())?;
        if !self.failures.is_empty() {
            write!(f, ", {} failed", self.failures.len())?;
        }
        Ok(())
    }
}

/// Whether a batch picks this file up
#[must_use]
pub fn is_batch_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| BATCH_EXTENSIONS.iter().any(|b| e.eq_ignore_ascii_case(b)))
}

/// Convert every jpg/jpeg/png directly inside `folder` to WebP.
///
/// # Errors
///
/// Only fails if the folder itself cannot be read. Per-file failures land in the report.
pub async fn convert_folder_to_webp(
    folder: &Path,
    settings: &ConversionSettings,
) -> Result<BatchReport> {
    let io_err = |source| ConversionError::Io {
        path: folder.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    let mut entries = tokio::fs::read_dir(folder).await.map_err(io_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.is_file() && is_batch_candidate(&path) {
            candidates.push(path);
        }
    }
    info!(
        "Converting {} images in {} to WebP",
        candidates.len(),
        folder.display()
    );

    let mut report = BatchReport::default();
    for path in candidates {
        match convert_image(path.clone(), ImageOperation::Webp, settings.clone()).await {
            Ok(outcome) => report.converted.push(outcome),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                report.failures.push((path, e));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use image::RgbaImage;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn candidate_extensions() {
        assert!(is_batch_candidate(Path::new("a.jpg")));
        assert!(is_batch_candidate(Path::new("a.JPEG")));
        assert!(is_batch_candidate(Path::new("dir/a.Png")));
        assert!(!is_batch_candidate(Path::new("a.webp")));
        assert!(!is_batch_candidate(Path::new("png")));
    }

    #[tokio::test]
    async fn continues_past_failures() -> eyre::Result<()> {
        let td = tempdir()?;
        RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])).save(td.path().join("good.png"))?;
        fs::write(td.path().join("bad.jpg"), b"not a jpeg")?;
        fs::write(td.path().join("notes.txt"), b"ignored")?;
        fs::create_dir(td.path().join("nested.png"))?;

        let report = convert_folder_to_webp(td.path(), &ConversionSettings::default()).await?;
        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_success());
        assert!(td.path().join("good.webp").exists());
        assert_eq!(report.failures[0].0, td.path().join("bad.jpg"));
        assert_eq!(report.to_string(), "Converted 1 images to WebP, 1 failed");
        Ok(())
    }

    #[tokio::test]
    async fn missing_folder_fails() {
        let td = tempdir().unwrap();
        let err = convert_folder_to_webp(&td.path().join("absent"), &ConversionSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Io { .. }));
    }
}
