//! Generators for fields whose arbitrary values must survive a trip through argv

use arbitrary::Unstructured;
use std::path::PathBuf;

const SEGMENTS: [&str; 6] = ["photos", "in", "clip", "logo", "scan_01", "with space"];
const EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "mp4", "mov"];
const LOG_FILTERS: [&str; 3] = ["info", "debug", "image_optimizer=trace"];

pub fn arbitrary_path(u: &mut Unstructured<'_>) -> arbitrary::Result<PathBuf> {
    let depth = u.int_in_range(1..=3)?;
    let mut path = PathBuf::new();
    for _ in 0..depth {
        path.push(u.choose(&SEGMENTS)?);
    }
    path.set_extension(u.choose(&EXTENSIONS)?);
    Ok(path)
}

pub fn arbitrary_dimension(u: &mut Unstructured<'_>) -> arbitrary::Result<u32> {
    u.int_in_range(1..=8192)
}

pub fn arbitrary_optional_dimension(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<u32>> {
    if u.arbitrary()? {
        Ok(Some(arbitrary_dimension(u)?))
    } else {
        Ok(None)
    }
}

pub fn arbitrary_jpeg_quality(u: &mut Unstructured<'_>) -> arbitrary::Result<u8> {
    u.int_in_range(1..=100)
}

pub fn arbitrary_log_filter(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<String>> {
    if u.arbitrary()? {
        Ok(Some((*u.choose(&LOG_FILTERS)?).to_string()))
    } else {
        Ok(None)
    }
}
