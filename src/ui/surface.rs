/// Display-slot preview
/// Shows how the photo will look in a staff card, leadership tile or avatar
use iced::widget::canvas::{self, fill, Fill, Path, Stroke};
use iced::widget::image::Handle;
use iced::{Color, Point, Rectangle, Size};

use super::canvas::draw_photo;
use crate::app::Message;
use crate::state::layout::SurfaceKind;
use crate::state::preview::SurfaceRender;

/// Slot outline
const BORDER_COLOR: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.35,
};

/// Read-only preview of one display slot
#[derive(Debug, Clone)]
pub struct SurfaceCanvas {
    pub kind: SurfaceKind,
    pub handle: Handle,
    /// Latest projection of the master transform (`None` before the first render)
    pub render: Option<SurfaceRender>,
}

/// Region outside the avatar circle, filled to mask the square corners
fn circle_mask(size: Size) -> Path {
    let center = Point::new(size.width / 2.0, size.height / 2.0);
    let radius = size.width.min(size.height) / 2.0;

    Path::new(|builder| {
        builder.rectangle(Point::ORIGIN, size);
        builder.circle(center, radius);
    })
}

impl canvas::Program<Message> for SurfaceCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let size = bounds.size();

        let Some(render) = &self.render else {
            return vec![frame.into_geometry()];
        };

        draw_photo(&mut frame, &self.handle, render);

        let outline = match self.kind {
            SurfaceKind::Circle => {
                // Even-odd: rectangle minus circle
                frame.fill(
                    &circle_mask(size),
                    Fill {
                        style: canvas::Style::Solid(theme.palette().background),
                        rule: fill::Rule::EvenOdd,
                    },
                );
                Path::circle(
                    Point::new(size.width / 2.0, size.height / 2.0),
                    size.width.min(size.height) / 2.0,
                )
            }
            SurfaceKind::Rectangle | SurfaceKind::Square => Path::rectangle(Point::ORIGIN, size),
        };

        frame.stroke(
            &outline,
            Stroke::default().with_color(BORDER_COLOR).with_width(1.0),
        );

        vec![frame.into_geometry()]
    }
}
