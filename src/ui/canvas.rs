use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Program};
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Renderer, Theme};

use crate::app::Message;
use crate::state::preview::SurfaceRender;

/// Interactive master preview
/// Draws the photo with the current transform and turns mouse/touch drags
/// into pointer messages for the positioning tool
pub struct MasterCanvas {
    /// Decoded photo
    pub handle: Handle,
    /// Transform projected onto the master frame
    pub render: SurfaceRender,
    /// Whether the tool is mid-drag (decides which events we capture)
    pub dragging: bool,
}

/// Pointer input after mouse and touch have been unified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Point),
    Moved(Point),
    Released,
}

impl From<PointerEvent> for Message {
    fn from(event: PointerEvent) -> Self {
        match event {
            PointerEvent::Pressed(position) => Message::PointerPressed(position),
            PointerEvent::Moved(position) => Message::PointerMoved(position),
            PointerEvent::Released => Message::PointerReleased,
        }
    }
}

/// Map a raw canvas event to a pointer event.
///
/// Presses only count inside `bounds`; moves and releases are tracked
/// anywhere in the window while a drag is in progress, and the cursor
/// leaving the window ends the drag.
pub fn translate_event(
    event: &canvas::Event,
    bounds: Rectangle,
    cursor: Cursor,
    dragging: bool,
) -> Option<PointerEvent> {
    match event {
        // Mouse button press - start dragging
        canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            cursor.position_over(bounds).map(PointerEvent::Pressed)
        }

        // Mouse move - pan if dragging
        canvas::Event::Mouse(mouse::Event::CursorMoved { position }) if dragging => {
            Some(PointerEvent::Moved(*position))
        }

        // Mouse button release or cursor gone - stop dragging
        canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
        | canvas::Event::Mouse(mouse::Event::CursorLeft)
            if dragging =>
        {
            Some(PointerEvent::Released)
        }

        canvas::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            bounds.contains(*position).then_some(PointerEvent::Pressed(*position))
        }

        canvas::Event::Touch(touch::Event::FingerMoved { position, .. }) if dragging => {
            Some(PointerEvent::Moved(*position))
        }

        canvas::Event::Touch(touch::Event::FingerLifted { .. })
        | canvas::Event::Touch(touch::Event::FingerLost { .. })
            if dragging =>
        {
            Some(PointerEvent::Released)
        }

        _ => None,
    }
}

/// Draw the photo at its projected rectangle.
/// Parts outside the frame are clipped by the canvas layer.
pub fn draw_photo(frame: &mut canvas::Frame, handle: &Handle, render: &SurfaceRender) {
    frame.draw_image(render.image_rect, canvas::Image::new(handle.clone()));
}

impl Program<Message> for MasterCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        draw_photo(&mut frame, &self.handle, &self.render);
        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match translate_event(&event, bounds, cursor, self.dragging) {
            // Captured: no page scroll or drag ghost while positioning
            Some(pointer) => (canvas::event::Status::Captured, Some(pointer.into())),
            None => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
