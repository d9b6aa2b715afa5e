/// Image transform: where the photo sits inside the master preview frame
///
/// The mapping is scale-then-translate, anchored at the image's top-left
/// corner. The natural image size is first multiplied by a policy base
/// scale (fit or fill), then by the user zoom, and finally shifted by the
/// offset, which is expressed in master-frame pixels.

use cgmath::Vector2;
use serde::{Deserialize, Serialize};

use super::layout::{FrameSize, LayoutIntent};

/// Tolerance when deciding whether the fitted zoom had to be adjusted
const ZOOM_EPSILON: f32 = 1.0e-4;

/// Natural pixel dimensions of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// How a freshly loaded image is fitted into the master frame
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FitPolicy {
    /// Whole image visible, letterboxed if the aspect ratios differ
    #[default]
    FreeFit,
    /// Frame fully covered, image cropped at the edges
    FillFit,
}

/// Bounds and granularity of the zoom slider
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 3.0,
            step: 0.1,
        }
    }
}

impl ZoomRange {
    /// The range must be positive and contain 1.0 (the fitted zoom)
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.min <= 1.0
            && self.max >= 1.0
            && self.step > 0.0
    }

    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

/// Current zoom and offset of the image in the master frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// User zoom on top of the base scale (1.0 = fitted)
    pub zoom: f32,
    /// Top-left of the image in master-frame pixels
    pub offset: Vector2<f32>,
    /// Scale that fits the natural image to the frame under the active policy
    pub base_scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vector2::new(0.0, 0.0),
            base_scale: 1.0,
        }
    }
}

impl Transform {
    /// Total scale from natural image pixels to master-frame pixels
    pub fn effective_scale(&self) -> f32 {
        self.base_scale * self.zoom
    }

    /// Size of the image as displayed in the master frame
    pub fn displayed_size(&self, image: ImageSize) -> FrameSize {
        let scale = self.effective_scale();
        FrameSize::new(image.width as f32 * scale, image.height as f32 * scale)
    }

    /// Set the zoom, clamped into `range`. The offset is left untouched so
    /// zooming happens around the current position.
    ///
    /// Returns whether the zoom changed.
    pub fn set_zoom(&mut self, value: f32, range: &ZoomRange) -> bool {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite zoom value {}", value);
            return false;
        }

        let zoom = range.clamp(value);
        let changed = (zoom - self.zoom).abs() > f32::EPSILON;
        self.zoom = zoom;
        changed
    }

    /// Pan by a delta in master-frame pixels. Not clamped: over-panning is allowed.
    pub fn translate_by(&mut self, delta: Vector2<f32>) {
        if !delta.x.is_finite() || !delta.y.is_finite() {
            log::warn!("Ignoring non-finite drag delta ({}, {})", delta.x, delta.y);
            return;
        }
        self.offset += delta;
    }
}

/// Result of fitting an image into the master frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    pub transform: Transform,
    /// Raw fill-fit zoom when it had to be moved into range or up to cover the frame
    pub adjusted_from: Option<f32>,
}

/// Compute the initial transform for an image in the master frame.
///
/// Free-fit keeps zoom at 1.0 and uses the contain scale. Fill-fit uses the
/// cover scale and derives the zoom from the axis picked by comparing the
/// image aspect to the intent's target aspect: wider images fit by height,
/// taller or equal ones by width. Either way the slack is split evenly.
pub fn init_transform(
    image: ImageSize,
    frame: FrameSize,
    intent: LayoutIntent,
    policy: FitPolicy,
    range: &ZoomRange,
) -> FitOutcome {
    if image.is_empty() || !frame.is_valid() {
        log::warn!(
            "Cannot fit {}x{} image into {}x{} frame, using identity transform",
            image.width, image.height, frame.width, frame.height
        );
        return FitOutcome {
            transform: Transform::default(),
            adjusted_from: None,
        };
    }

    let image_w = image.width as f32;
    let image_h = image.height as f32;
    let scale_x = frame.width / image_w;
    let scale_y = frame.height / image_h;

    let (base_scale, zoom, adjusted_from) = match policy {
        FitPolicy::FreeFit => (scale_x.min(scale_y), 1.0, None),
        FitPolicy::FillFit => {
            let scale = scale_x.max(scale_y);
            let raw_zoom = if image.aspect() > intent.target_aspect() {
                // Wider than the target: fill the height
                frame.height / (image_h * scale)
            } else {
                // Taller or equal: fill the width
                frame.width / (image_w * scale)
            };

            // Below 1.0 the cover scale no longer covers the frame
            let zoom = range.clamp(raw_zoom.max(1.0));
            let adjusted = if (zoom - raw_zoom).abs() > ZOOM_EPSILON {
                log::warn!(
                    "Fill-fit zoom {:.3} for {}x{} image ({}) adjusted to {:.3}",
                    raw_zoom, image.width, image.height, intent.as_str(), zoom
                );
                Some(raw_zoom)
            } else {
                None
            };
            (scale, zoom, adjusted)
        }
    };

    let displayed_w = image_w * base_scale * zoom;
    let displayed_h = image_h * base_scale * zoom;
    let offset = Vector2::new(
        (frame.width - displayed_w) / 2.0,
        (frame.height - displayed_h) / 2.0,
    );

    log::debug!(
        "Fitted {}x{} image ({:?}): base scale {:.4}, zoom {:.3}, offset ({:.1}, {:.1})",
        image.width, image.height, policy, base_scale, zoom, offset.x, offset.y
    );

    FitOutcome {
        transform: Transform {
            zoom,
            offset,
            base_scale,
        },
        adjusted_from,
    }
}

/// Slider caption, e.g. "150%"
pub fn zoom_label(zoom: f32) -> String {
    format!("{}%", (zoom * 100.0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1.0e-3;

    fn fit(image: ImageSize, frame: FrameSize, intent: LayoutIntent, policy: FitPolicy) -> FitOutcome {
        init_transform(image, frame, intent, policy, &ZoomRange::default())
    }

    #[test]
    fn test_free_fit_matching_aspect() {
        // 4000x3000 into 400x300: scale 0.1, no slack
        let outcome = fit(
            ImageSize::new(4000, 3000),
            FrameSize::new(400.0, 300.0),
            LayoutIntent::Teaching,
            FitPolicy::FreeFit,
        );
        let t = outcome.transform;
        assert_eq!(t.zoom, 1.0);
        assert!((t.base_scale - 0.1).abs() < TOLERANCE);
        assert!(t.offset.x.abs() < TOLERANCE);
        assert!(t.offset.y.abs() < TOLERANCE);
        assert_eq!(outcome.adjusted_from, None);
    }

    #[test]
    fn test_free_fit_contains_and_centers() {
        let frames = [
            FrameSize::new(400.0, 300.0),
            FrameSize::new(300.0, 300.0),
            FrameSize::new(120.0, 480.0),
        ];
        let images = [
            ImageSize::new(1000, 500),
            ImageSize::new(500, 1000),
            ImageSize::new(64, 64),
            ImageSize::new(4000, 3000),
        ];

        for frame in frames {
            for image in images {
                let t = fit(image, frame, LayoutIntent::Teaching, FitPolicy::FreeFit).transform;
                let shown = t.displayed_size(image);

                assert!(shown.width <= frame.width + TOLERANCE);
                assert!(shown.height <= frame.height + TOLERANCE);
                // Slack split evenly
                let right = frame.width - (t.offset.x + shown.width);
                let bottom = frame.height - (t.offset.y + shown.height);
                assert!((t.offset.x - right).abs() < TOLERANCE);
                assert!((t.offset.y - bottom).abs() < TOLERANCE);
                assert!(t.offset.x >= -TOLERANCE && t.offset.y >= -TOLERANCE);
            }
        }
    }

    #[test]
    fn test_fill_fit_covers_frame() {
        let images = [
            ImageSize::new(4000, 3000),
            ImageSize::new(3000, 4000),
            ImageSize::new(1000, 1000),
            ImageSize::new(2000, 500),
        ];

        for intent in LayoutIntent::ALL {
            let frame = FrameSize::new(400.0, 400.0 / intent.target_aspect());
            for image in images {
                let t = fit(image, frame, intent, FitPolicy::FillFit).transform;
                let shown = t.displayed_size(image);

                assert!(shown.width >= frame.width - TOLERANCE);
                assert!(shown.height >= frame.height - TOLERANCE);
                let exact_w = (shown.width - frame.width).abs() < TOLERANCE;
                let exact_h = (shown.height - frame.height).abs() < TOLERANCE;
                assert!(exact_w || exact_h, "no axis fills exactly for {:?}", image);
            }
        }
    }

    #[test]
    fn test_fill_fit_covers_mismatched_frame_and_reports_adjustment() {
        // Square frame but 4:3 target: the width-fit formula would leave a gap
        let image = ImageSize::new(4000, 3000);
        let frame = FrameSize::new(400.0, 400.0);
        let outcome = fit(image, frame, LayoutIntent::Teaching, FitPolicy::FillFit);
        let shown = outcome.transform.displayed_size(image);

        assert!(shown.width >= frame.width - TOLERANCE);
        assert!(shown.height >= frame.height - TOLERANCE);
        let raw = outcome.adjusted_from.expect("adjustment should be reported");
        assert!((raw - 0.75).abs() < TOLERANCE);
        assert_eq!(outcome.transform.zoom, 1.0);
    }

    #[test]
    fn test_translate_is_additive() {
        let mut stepwise = Transform::default();
        stepwise.translate_by(Vector2::new(10.0, -5.0));
        stepwise.translate_by(Vector2::new(-3.5, 12.0));

        let mut once = Transform::default();
        once.translate_by(Vector2::new(6.5, 7.0));

        assert_eq!(stepwise.offset, once.offset);
    }

    #[test]
    fn test_translate_ignores_non_finite() {
        let mut t = Transform::default();
        t.translate_by(Vector2::new(f32::NAN, 1.0));
        assert_eq!(t.offset, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_set_zoom_clamps_and_keeps_offset() {
        let range = ZoomRange::default();
        let mut t = Transform::default();
        t.translate_by(Vector2::new(20.0, 10.0));

        assert!(t.set_zoom(2.0, &range));
        assert_eq!(t.zoom, 2.0);
        assert_eq!(t.offset, Vector2::new(20.0, 10.0));

        t.set_zoom(10.0, &range);
        assert_eq!(t.zoom, 3.0);
        t.set_zoom(0.2, &range);
        assert_eq!(t.zoom, 1.0);
        assert!(!t.set_zoom(f32::INFINITY, &range));
        assert_eq!(t.zoom, 1.0);
    }

    #[test]
    fn test_degenerate_inputs_give_identity() {
        let outcome = fit(
            ImageSize::new(0, 300),
            FrameSize::new(400.0, 300.0),
            LayoutIntent::Teaching,
            FitPolicy::FillFit,
        );
        assert_eq!(outcome.transform, Transform::default());
    }

    #[test]
    fn test_zoom_range_validation() {
        assert!(ZoomRange::default().is_valid());
        assert!(!ZoomRange { min: 1.5, max: 3.0, step: 0.1 }.is_valid());
        assert!(!ZoomRange { min: 0.0, max: 3.0, step: 0.1 }.is_valid());
        assert!(!ZoomRange { min: 1.0, max: 3.0, step: 0.0 }.is_valid());
    }

    #[test]
    fn test_zoom_label() {
        assert_eq!(zoom_label(1.0), "100%");
        assert_eq!(zoom_label(1.5), "150%");
        assert_eq!(zoom_label(2.345), "235%");
    }
}
