/// Layout intent and display-slot geometry
///
/// The layout intent is the "position type" chosen on the staff form. It
/// decides which display slots get a live preview and, in fill-fit mode,
/// which aspect ratio the master frame is shaped to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of a preview frame in logical pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A frame is usable only if both sides are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<FrameSize> for iced::Size {
    fn from(frame: FrameSize) -> Self {
        iced::Size::new(frame.width, frame.height)
    }
}

/// Which kind of staff profile the photo is for
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutIntent {
    /// Teaching staff: shown in a 4:3 rectangle card
    #[default]
    Teaching,
    /// Leadership team: shown in square and circular avatars
    Leadership,
}

impl LayoutIntent {
    pub const ALL: [LayoutIntent; 2] = [LayoutIntent::Teaching, LayoutIntent::Leadership];

    /// Target aspect ratio (width / height) of the slots this intent renders into
    pub fn target_aspect(self) -> f32 {
        match self {
            LayoutIntent::Teaching => 4.0 / 3.0,
            LayoutIntent::Leadership => 1.0,
        }
    }

    /// Display slots relevant to this intent
    pub fn surfaces(self) -> &'static [SurfaceKind] {
        match self {
            LayoutIntent::Teaching => &[SurfaceKind::Rectangle],
            LayoutIntent::Leadership => &[SurfaceKind::Square, SurfaceKind::Circle],
        }
    }

    /// Form value, as posted in `positionType`
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutIntent::Teaching => "teaching",
            LayoutIntent::Leadership => "leadership",
        }
    }

    /// Parse a form value; anything unrecognised falls back to teaching
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "leadership" => LayoutIntent::Leadership,
            _ => LayoutIntent::Teaching,
        }
    }
}

impl fmt::Display for LayoutIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LayoutIntent::Teaching => "Teaching staff",
            LayoutIntent::Leadership => "Leadership team",
        };
        f.write_str(label)
    }
}

/// The secondary display slots a photo can appear in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Rectangle,
    Square,
    Circle,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::Rectangle, SurfaceKind::Square, SurfaceKind::Circle];

    /// Whether the surface is shown for the given intent
    pub fn is_relevant_to(self, intent: LayoutIntent) -> bool {
        intent.surfaces().contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::Rectangle => "Staff card",
            SurfaceKind::Square => "Leadership tile",
            SurfaceKind::Circle => "Avatar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surfaces_per_intent() {
        assert_eq!(LayoutIntent::Teaching.surfaces(), &[SurfaceKind::Rectangle]);
        assert!(SurfaceKind::Circle.is_relevant_to(LayoutIntent::Leadership));
        assert!(SurfaceKind::Square.is_relevant_to(LayoutIntent::Leadership));
        assert!(!SurfaceKind::Rectangle.is_relevant_to(LayoutIntent::Leadership));
    }

    #[test]
    fn test_form_value_parsing() {
        assert_eq!(LayoutIntent::from_form_value("leadership"), LayoutIntent::Leadership);
        assert_eq!(LayoutIntent::from_form_value(" Leadership "), LayoutIntent::Leadership);
        assert_eq!(LayoutIntent::from_form_value("teaching"), LayoutIntent::Teaching);
        assert_eq!(LayoutIntent::from_form_value("janitor"), LayoutIntent::Teaching);
    }

    #[test]
    fn test_intent_serializes_lowercase() {
        let json = serde_json::to_string(&LayoutIntent::Leadership).unwrap();
        assert_eq!(json, "\"leadership\"");
    }

    #[test]
    fn test_frame_validity() {
        assert!(FrameSize::new(400.0, 300.0).is_valid());
        assert!(!FrameSize::new(0.0, 300.0).is_valid());
        assert!(!FrameSize::new(f32::NAN, 300.0).is_valid());
    }
}
