/// Photo input module
///
/// This module handles:
/// - Checking that the picked file is an image (by content type)
/// - Decoding it off the UI thread
/// - Wrapping the bitmap for display

pub mod asset;
pub mod loader;

pub use asset::ImageAsset;
pub use loader::{load_image, load_path, SelectedFile};
