/// Decoded source image
///
/// An asset is immutable once loaded. Picking another file replaces it
/// wholesale; nothing ever mutates the bitmap in place.

use iced::widget::image::Handle;

use crate::state::transform::ImageSize;

/// The photo currently being positioned
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// File name as picked by the operator
    pub file_name: String,
    /// Natural pixel dimensions (never zero)
    pub size: ImageSize,
    /// Load generation that produced this asset
    pub generation: u64,
    /// Display handle shared by the master view and every preview slot
    handle: Handle,
}

impl ImageAsset {
    /// Wrap a decoded RGBA bitmap
    pub fn from_rgba(file_name: String, generation: u64, rgba: image::RgbaImage) -> Self {
        let size = ImageSize::new(rgba.width(), rgba.height());
        let handle = Handle::from_rgba(size.width, size.height, rgba.into_raw());

        Self {
            file_name,
            size,
            generation,
            handle,
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}
