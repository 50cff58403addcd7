//! Where and how generated images are written.

use super::CanvasError;
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

/// `quote-2024-01-31T12-30-45.png`
pub fn timestamp_filename(now: DateTime<Utc>) -> String {
    format!("quote-{}.png", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Resolve the output file.
///
/// An explicit path with an extension is a file path; one without is a
/// directory that gets a timestamped file name. No path means `save_dir`.
pub fn save_path(explicit: Option<&Path>, save_dir: &Path, now: DateTime<Utc>) -> PathBuf {
    match explicit {
        Some(path) if path.extension().is_some() => path.to_path_buf(),
        Some(dir) => dir.join(timestamp_filename(now)),
        None => save_dir.join(timestamp_filename(now)),
    }
}

/// Encode `image` as PNG at `path`, creating parent directories.
///
/// # Errors
///
/// `CanvasError::Io` if the directory cannot be created, `CanvasError::Encode`
/// if writing the PNG fails.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), CanvasError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CanvasError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    image.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), "Saved quote image");
    Ok(())
}
