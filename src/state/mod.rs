/// State management module
///
/// This module holds everything the positioning tool knows, independent of
/// how it is drawn:
/// - Layout intent and display-slot geometry (layout.rs)
/// - Zoom/offset transform and initial fitting (transform.rs)
/// - Drag gesture state machine (interaction.rs)
/// - Projection of the transform onto preview slots (preview.rs)
/// - Crop payload and the hidden form field (payload.rs)
/// - The tool tying them together (tool.rs)

pub mod interaction;
pub mod layout;
pub mod payload;
pub mod preview;
pub mod tool;
pub mod transform;

pub use tool::{LoadOutcome, LoadTicket, PositioningTool};
