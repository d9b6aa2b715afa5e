/// Drag gesture state machine for the master preview
///
/// Mouse and touch input both end up here as plain points in window
/// coordinates. Deltas are incremental: each move is measured against the
/// previous sample, not against where the gesture started.

use cgmath::Vector2;
use iced::Point;

/// State of the pointer over the master preview
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Last sampled pointer position
        last: Point,
    },
}

/// Turns pointer down/move/up into translation deltas
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed over the master preview.
    ///
    /// Only starts a drag when there is an image to move.
    pub fn press(&mut self, position: Point, has_image: bool) -> bool {
        if !has_image {
            return false;
        }
        self.state = DragState::Dragging { last: position };
        true
    }

    /// Pointer moved. Returns the delta since the last sample while dragging.
    pub fn move_to(&mut self, position: Point) -> Option<Vector2<f32>> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { last } => {
                let delta = Vector2::new(position.x - last.x, position.y - last.y);
                self.state = DragState::Dragging { last: position };
                Some(delta)
            }
        }
    }

    /// Pointer released, finger lifted or cursor left the window
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }
}
