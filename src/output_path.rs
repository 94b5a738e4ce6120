//! Output file naming
//!
//! Outputs land next to their input. The name is the input's stem, an optional
//! `-<tag>`, and the output extension: `photo.jpg` becomes `photo-700.webp`,
//! `clip.mov` becomes `clip-406x720.mp4`.

use crate::error::ConversionError;
use crate::error::Result;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Derive the output path for `input`.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] if `input` has no file name and
/// [`ConversionError::OutputWouldOverwriteInput`] if the derived name is the input itself.
pub fn output_path(input: &Path, tag: Option<&str>, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ConversionError::InvalidInput(input.to_path_buf()))?;

    let mut name = OsString::from(stem);
    if let Some(tag) = tag {
        name.push("-");
        name.push(tag);
    }
    name.push(".");
    name.push(extension);

    let output = input.with_file_name(name);
    if names_collide(input, &output) {
        return Err(ConversionError::OutputWouldOverwriteInput(output));
    }
    Ok(output)
}

/// Windows and macOS volumes usually ignore case, so `photo.JPG` and `photo.jpg` are one file
fn names_collide(input: &Path, output: &Path) -> bool {
    match (input.file_name(), output.file_name()) {
        (Some(a), Some(b)) => {
            input.parent() == output.parent()
                && a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
        }
        _ => input == output,
    }
}

/// The input's extension as written, if it has one
#[must_use]
pub fn input_extension(input: &Path) -> Option<String> {
    input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_extension() {
        let out = output_path(Path::new("/pics/cat.jpg"), None, "webp").unwrap();
        assert_eq!(out, PathBuf::from("/pics/cat.webp"));
    }

    #[test]
    fn appends_tag() {
        let out = output_path(Path::new("/pics/cat.png"), Some("700"), "webp").unwrap();
        assert_eq!(out, PathBuf::from("/pics/cat-700.webp"));

        let out = output_path(Path::new("clip.mov"), Some("406x720"), "mp4").unwrap();
        assert_eq!(out, PathBuf::from("clip-406x720.mp4"));
    }

    #[test]
    fn only_last_extension_is_replaced() {
        let out = output_path(Path::new("/a.jpg/archive.tar.png"), Some("grayscale"), "png").unwrap();
        assert_eq!(out, PathBuf::from("/a.jpg/archive.tar-grayscale.png"));
    }

    #[test]
    fn file_without_extension() {
        let out = output_path(Path::new("scan"), None, "jpg").unwrap();
        assert_eq!(out, PathBuf::from("scan.jpg"));
    }

    #[test]
    fn refuses_to_overwrite_input() {
        assert!(matches!(
            output_path(Path::new("/pics/cat.webp"), None, "webp"),
            Err(ConversionError::OutputWouldOverwriteInput(_))
        ));
    }

    #[test]
    fn refuses_case_variants_of_input() {
        assert!(matches!(
            output_path(Path::new("/pics/photo.JPG"), None, "jpg"),
            Err(ConversionError::OutputWouldOverwriteInput(_))
        ));
        assert!(matches!(
            output_path(Path::new("a.WEBP"), None, "webp"),
            Err(ConversionError::OutputWouldOverwriteInput(_))
        ));
        // A tag keeps the names apart regardless of case
        assert_eq!(
            output_path(Path::new("photo.JPG"), Some("grayscale"), "jpg").unwrap(),
            PathBuf::from("photo-grayscale.jpg")
        );
    }

    #[test]
    fn rejects_paths_without_file_name() {
        assert!(matches!(
            output_path(Path::new("/"), None, "webp"),
            Err(ConversionError::InvalidInput(_))
        ));
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(input_extension(Path::new("a/b.JPEG")), Some("JPEG".to_string()));
        assert_eq!(input_extension(Path::new("a/b")), None);
    }
}
