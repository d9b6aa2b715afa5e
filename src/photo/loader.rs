/// Photo loader
///
/// Reads the picked file, rejects anything that is not an image and decodes
/// the rest into an RGBA bitmap. Decoding is CPU-bound, so it runs on the
/// blocking pool and the result is delivered back to the UI as a message.

use image::ImageFormat;
use std::path::{Path, PathBuf};
use tokio::task;

use super::asset::ImageAsset;
use crate::error::{CropperError, Result};

/// Content type used when the extension is not a known image format
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// A file picked by the operator, with the content type it was declared as
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Whether the declared content type is `image/*`
    pub fn is_image(&self) -> bool {
        is_image_content_type(&self.content_type)
    }
}

/// Content type implied by a file's extension
pub fn content_type_for(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_CONTENT_TYPE.to_string())
}

/// Whether a content type is `image/*` (case and whitespace insensitive)
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Load a photo from disk.
///
/// The content type is checked before the file is read, so picking a large
/// non-image fails fast with `UnsupportedFileKind`.
pub async fn load_path(path: PathBuf, generation: u64) -> Result<ImageAsset> {
    let content_type = content_type_for(&path);
    if !is_image_content_type(&content_type) {
        return Err(CropperError::UnsupportedFileKind { content_type });
    }

    let bytes = tokio::fs::read(&path).await?;
    log::info!("Read {} ({} bytes)", path.display(), bytes.len());

    load_image(SelectedFile::new(file_name_of(&path), content_type, bytes), generation).await
}

/// Decode a selected file into an `ImageAsset`
pub async fn load_image(file: SelectedFile, generation: u64) -> Result<ImageAsset> {
    if !file.is_image() {
        return Err(CropperError::UnsupportedFileKind {
            content_type: file.content_type,
        });
    }

    // Spawn blocking because decoding is CPU-intensive
    task::spawn_blocking(move || decode_image(file, generation))
        .await
        .map_err(|e| CropperError::TaskJoin(e.to_string()))?
}

/// Blocking implementation of photo decoding
pub fn decode_image(file: SelectedFile, generation: u64) -> Result<ImageAsset> {
    let decoded = image::load_from_memory(&file.bytes).map_err(|e| CropperError::Decode {
        file_name: file.name.clone(),
        reason: e.to_string(),
    })?;

    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(CropperError::Decode {
            file_name: file.name,
            reason: "image has no pixels".to_string(),
        });
    }

    log::info!(
        "Decoded {}: {}x{} (load #{})",
        file.name,
        rgba.width(),
        rgba.height(),
        generation
    );

    Ok(ImageAsset::from_rgba(file.name, generation, rgba))
}
