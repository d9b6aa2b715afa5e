/// Preview synchronization
///
/// Every display slot mirrors the master transform. The zoom is shared as-is
/// because it is relative to the fitted size; the offset is in master-frame
/// pixels, so it is rescaled per axis by the slot/master frame ratio.
/// Slots fit the photo with their own cover scale, uniform on both axes, so
/// a square slot under a 4:3 master never stretches the photo.
/// Projections are recomputed from scratch on every change, never patched.

use cgmath::Vector2;
use iced::Rectangle;

use super::layout::{FrameSize, LayoutIntent, SurfaceKind};
use super::transform::{ImageSize, Transform};

/// A transform projected onto one frame, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRender {
    pub frame: FrameSize,
    pub zoom: f32,
    /// Image top-left in this frame's pixels
    pub offset: Vector2<f32>,
    /// Where the whole image lands in this frame (may extend past the edges)
    pub image_rect: Rectangle,
}

/// One secondary display slot
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSurface {
    pub kind: SurfaceKind,
    pub frame: FrameSize,
    pub visible: bool,
    /// Last projection; goes stale while the surface is hidden
    pub render: Option<SurfaceRender>,
}

impl PreviewSurface {
    pub fn new(kind: SurfaceKind, frame: FrameSize) -> Self {
        Self {
            kind,
            frame,
            visible: false,
            render: None,
        }
    }
}

/// Smallest uniform scale at which the image covers `frame`
fn cover_scale(image: ImageSize, frame: FrameSize) -> f32 {
    let scale_x = frame.width / image.width as f32;
    let scale_y = frame.height / image.height as f32;
    scale_x.max(scale_y)
}

fn place(image: ImageSize, frame: FrameSize, zoom: f32, scale: f32, offset: Vector2<f32>) -> SurfaceRender {
    SurfaceRender {
        frame,
        zoom,
        offset,
        image_rect: Rectangle {
            x: offset.x,
            y: offset.y,
            width: image.width as f32 * scale,
            height: image.height as f32 * scale,
        },
    }
}

/// Project the master transform onto a display slot
pub fn project(image: ImageSize, transform: &Transform, master: FrameSize, frame: FrameSize) -> SurfaceRender {
    let ratio_x = frame.width / master.width;
    let ratio_y = frame.height / master.height;

    let offset = Vector2::new(transform.offset.x * ratio_x, transform.offset.y * ratio_y);
    let scale = cover_scale(image, frame) * transform.zoom;

    place(image, frame, transform.zoom, scale, offset)
}

/// The master view draws the transform exactly as fitted
pub fn render_master(image: ImageSize, transform: &Transform, master: FrameSize) -> SurfaceRender {
    place(image, master, transform.zoom, transform.effective_scale(), transform.offset)
}

/// Re-render every visible surface. Hidden ones keep their stale render.
///
/// Returns how many surfaces were rendered.
pub fn render_all(
    image: ImageSize,
    transform: &Transform,
    master: FrameSize,
    surfaces: &mut [PreviewSurface],
) -> usize {
    let mut rendered = 0;
    for surface in surfaces.iter_mut().filter(|s| s.visible) {
        surface.render = Some(project(image, transform, master, surface.frame));
        rendered += 1;
    }
    rendered
}

/// Owns the fixed set of display slots and their visibility
#[derive(Debug, Clone)]
pub struct PreviewSynchronizer {
    surfaces: Vec<PreviewSurface>,
}

impl PreviewSynchronizer {
    pub fn new(surfaces: impl IntoIterator<Item = (SurfaceKind, FrameSize)>, intent: LayoutIntent) -> Self {
        let mut sync = Self {
            surfaces: surfaces
                .into_iter()
                .map(|(kind, frame)| PreviewSurface::new(kind, frame))
                .collect(),
        };
        sync.apply_intent(intent);
        sync
    }

    /// Show exactly the slots relevant to `intent`
    pub fn apply_intent(&mut self, intent: LayoutIntent) {
        for surface in &mut self.surfaces {
            surface.visible = surface.kind.is_relevant_to(intent);
        }
    }

    pub fn render_all(&mut self, image: ImageSize, transform: &Transform, master: FrameSize) -> usize {
        render_all(image, transform, master, &mut self.surfaces)
    }

    pub fn visible(&self) -> impl Iterator<Item = &PreviewSurface> {
        self.surfaces.iter().filter(|s| s.visible)
    }

    pub fn surface(&self, kind: SurfaceKind) -> Option<&PreviewSurface> {
        self.surfaces.iter().find(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_slots() -> Vec<(SurfaceKind, FrameSize)> {
        vec![
            (SurfaceKind::Rectangle, FrameSize::new(200.0, 150.0)),
            (SurfaceKind::Square, FrameSize::new(150.0, 150.0)),
            (SurfaceKind::Circle, FrameSize::new(120.0, 120.0)),
        ]
    }

    fn sample_transform() -> Transform {
        Transform {
            zoom: 1.5,
            offset: Vector2::new(20.0, -10.0),
            base_scale: 0.1,
        }
    }

    #[test]
    fn test_offset_scaled_by_frame_ratio() {
        let master = FrameSize::new(400.0, 300.0);
        let t = sample_transform();
        let sizes = [
            FrameSize::new(200.0, 150.0),
            FrameSize::new(150.0, 150.0),
            FrameSize::new(800.0, 90.0),
            FrameSize::new(400.0, 300.0),
        ];

        for frame in sizes {
            let render = project(ImageSize::new(4000, 3000), &t, master, frame);
            assert_eq!(render.zoom, t.zoom);
            assert_eq!(render.offset.x, t.offset.x * (frame.width / master.width));
            assert_eq!(render.offset.y, t.offset.y * (frame.height / master.height));
        }
    }

    #[test]
    fn test_slot_keeps_photo_aspect() {
        // Portrait photo fitted whole into the 4:3 master
        let image = ImageSize::new(3000, 4000);
        let master = FrameSize::new(400.0, 300.0);
        let t = Transform {
            zoom: 1.2,
            offset: Vector2::new(87.5, 0.0),
            base_scale: 0.075,
        };

        for frame in [FrameSize::new(150.0, 150.0), FrameSize::new(200.0, 150.0), FrameSize::new(120.0, 300.0)] {
            let rect = project(image, &t, master, frame).image_rect;
            assert!(
                (rect.width / rect.height - 0.75).abs() < 1.0e-4,
                "{}x{} slot drew {}x{}",
                frame.width,
                frame.height,
                rect.width,
                rect.height
            );
        }

        // Square slot: cover scale 150 / 3000, then the shared zoom
        let square = project(image, &t, master, FrameSize::new(150.0, 150.0)).image_rect;
        assert!((square.width - 180.0).abs() < 1.0e-3);
        assert!((square.height - 240.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_slot_covers_its_frame_at_zoom_one() {
        let image = ImageSize::new(4000, 3000);
        let master = FrameSize::new(400.0, 300.0);
        let t = Transform {
            zoom: 1.0,
            offset: Vector2::new(0.0, 0.0),
            base_scale: 0.1,
        };

        let rect = project(image, &t, master, FrameSize::new(150.0, 150.0)).image_rect;
        assert!((rect.height - 150.0).abs() < 1.0e-3);
        assert!(rect.width >= 150.0);
    }

    #[test]
    fn test_master_render_matches_transform() {
        let master = FrameSize::new(400.0, 300.0);
        let t = sample_transform();
        let render = render_master(ImageSize::new(4000, 3000), &t, master);

        assert_eq!(render.offset, t.offset);
        assert!((render.image_rect.width - 600.0).abs() < 1.0e-3);
        assert!((render.image_rect.height - 450.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_visibility_follows_intent() {
        let mut sync = PreviewSynchronizer::new(default_slots(), LayoutIntent::Teaching);
        let visible: Vec<_> = sync.visible().map(|s| s.kind).collect();
        assert_eq!(visible, vec![SurfaceKind::Rectangle]);

        sync.apply_intent(LayoutIntent::Leadership);
        let visible: Vec<_> = sync.visible().map(|s| s.kind).collect();
        assert_eq!(visible, vec![SurfaceKind::Square, SurfaceKind::Circle]);
    }

    #[test]
    fn test_hidden_surfaces_keep_stale_render() {
        let master = FrameSize::new(400.0, 300.0);
        let image = ImageSize::new(4000, 3000);
        let mut sync = PreviewSynchronizer::new(default_slots(), LayoutIntent::Teaching);

        let first = sample_transform();
        assert_eq!(sync.render_all(image, &first, master), 1);
        let stale = sync.surface(SurfaceKind::Rectangle).unwrap().render;

        sync.apply_intent(LayoutIntent::Leadership);
        let mut moved = first;
        moved.translate_by(Vector2::new(50.0, 50.0));
        assert_eq!(sync.render_all(image, &moved, master), 2);

        // Hidden rectangle was not touched, visible ones track the new offset
        assert_eq!(sync.surface(SurfaceKind::Rectangle).unwrap().render, stale);
        let square = sync.surface(SurfaceKind::Square).unwrap().render.unwrap();
        assert_eq!(square.offset.x, moved.offset.x * (150.0 / 400.0));
        assert!(!sync.surface(SurfaceKind::Rectangle).unwrap().visible);
    }
}
