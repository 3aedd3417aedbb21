//! Local file intake and result persistence
//!
//! The CLI counterpart of the web uploader: reads user-selected files,
//! sniffs their media type from magic bytes, skips anything that is not an
//! image, silently drops files beyond the mode's upload cap, and preserves
//! selection order. Also writes results back out with the UI's timestamped
//! filename scheme.

use crate::models::{EditorMode, GeneratedImage, ImageInput};
use crate::{Error, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Sniff an image media type from the payload's magic bytes.
///
/// Returns `None` for anything that is not a recognized image format; such
/// files are rejected at intake rather than sent to the API.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Load the selected files into [`ImageInput`]s.
///
/// Non-image files are skipped with a warning; files beyond `max_files`
/// are silently dropped, matching the uploader's behavior. Input order is
/// preserved for every accepted file.
pub fn load_images(paths: &[PathBuf], max_files: usize) -> Result<Vec<ImageInput>> {
    let mut images = Vec::new();

    for path in paths {
        if images.len() >= max_files {
            tracing::debug!(
                "Upload cap of {} reached, dropping {}",
                max_files,
                path.display()
            );
            continue;
        }

        let data = fs::read(path)?;
        match detect_image_mime(&data) {
            Some(mime_type) => {
                tracing::debug!("Loaded {} as {}", path.display(), mime_type);
                images.push(ImageInput::new(data, mime_type));
            }
            None => {
                tracing::warn!("Skipping {}: not a recognized image file", path.display());
            }
        }
    }

    Ok(images)
}

/// Parse a `data:<mime>;base64,<payload>` URI back into an input image,
/// so a previous result can be chained into a follow-up edit.
pub fn image_from_data_uri(uri: &str) -> Result<ImageInput> {
    let stripped = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::Validation(format!("Not a data URI: {}", uri)))?;
    let (mime_type, payload) = stripped
        .split_once(";base64,")
        .ok_or_else(|| Error::Validation("Data URI is missing a base64 payload".to_string()))?;

    GeneratedImage::from_base64(payload)
        .decode()
        .map(|data| ImageInput::new(data, mime_type))
}

/// Write a result to `dir` as `<prefix>-<unix-millis>.png` and return the
/// path. Bulk results pass an index so the prefix becomes `gemini-bulk-<i+1>`.
pub fn save_result(
    dir: &Path,
    mode: EditorMode,
    index: Option<usize>,
    image: &GeneratedImage,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let prefix = match index {
        Some(i) => format!("{}-{}", mode.download_prefix(), i + 1),
        None => mode.download_prefix().to_string(),
    };
    let filename = format!("{}-{}.png", prefix, Utc::now().timestamp_millis());
    let path = dir.join(filename);

    fs::write(&path, image.decode()?)?;
    Ok(path)
}
