/// Crop payload committed with the staff form
///
/// The cropper never touches pixels of the uploaded file. On commit it
/// writes this payload, as JSON, into a hidden form field that is posted
/// alongside the original file; the server applies it when producing the
/// derivative images.

use serde::{Deserialize, Serialize};

use super::layout::{FrameSize, LayoutIntent};
use super::transform::Transform;

/// Zoom, offset and master-frame geometry at the moment of commit
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    /// User zoom on top of the fitted size
    pub zoom: f32,
    /// Image left edge in master-frame pixels
    pub pos_x: f32,
    /// Image top edge in master-frame pixels
    pub pos_y: f32,
    /// Target aspect ratio; only sent when the tool fills the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f32>,
    /// Master frame width the offsets are relative to
    pub preview_width: f32,
    /// Master frame height the offsets are relative to
    pub preview_height: f32,
    /// Layout the photo is positioned for
    pub position_type: LayoutIntent,
}

impl CropPayload {
    /// Capture the current transform
    pub fn capture(
        transform: &Transform,
        master: FrameSize,
        intent: LayoutIntent,
        aspect_ratio: Option<f32>,
    ) -> Self {
        Self {
            zoom: transform.zoom,
            pos_x: transform.offset.x,
            pos_y: transform.offset.y,
            aspect_ratio,
            preview_width: master.width,
            preview_height: master.height,
            position_type: intent,
        }
    }

    /// Convert to JSON string for the hidden form field
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (as received by the server)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Hidden `crop_data` input: write-once per commit, overwritten by the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HiddenField {
    value: Option<String>,
}

impl HiddenField {
    pub fn set(&mut self, value: String) {
        self.value = Some(value);
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Minimal body the server falls back to when nothing was committed
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FallbackCropData {
    position_type: LayoutIntent,
}

/// The staff form fields the cropper contributes to
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    /// `position_type` select
    pub position_type: LayoutIntent,
    /// `crop_data` hidden input
    pub crop_data: HiddenField,
}

impl ProfileForm {
    /// Value posted as `crop_data`: the committed payload, or just the
    /// position type when the operator never applied a crop
    pub fn crop_data(&self) -> Result<String, serde_json::Error> {
        match self.crop_data.value() {
            Some(json) => Ok(json.to_string()),
            None => serde_json::to_string(&FallbackCropData {
                position_type: self.position_type,
            }),
        }
    }
}
