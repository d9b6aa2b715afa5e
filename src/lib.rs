//! Staff photo positioning tool.
//!
//! Pick a photo, zoom and drag it inside the master preview, check how it
//! will look in the staff card, leadership tile and avatar slots, then
//! commit a JSON crop payload into the form's hidden `crop_data` field.

pub mod app;
pub mod config;
pub mod error;
pub mod photo;
pub mod state;
pub mod ui;

pub use app::{Message, PhotoCropper};
pub use error::{CropperError, Result};
