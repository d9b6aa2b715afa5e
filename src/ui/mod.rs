/// Canvas widgets for the positioning tool
///
/// - `canvas.rs` - interactive master preview (drag to pan)
/// - `surface.rs` - read-only display-slot previews

pub mod canvas;
pub mod surface;

pub use canvas::MasterCanvas;
pub use surface::SurfaceCanvas;
