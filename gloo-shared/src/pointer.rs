use glam::DVec2;

use crate::button::ButtonState;

/// A raw mouse or touch event, already reduced to canvas-space coordinates.
///
/// Mouse and touch drive the same single pointer; there is no per-button or
/// per-finger distinction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseMoved(DVec2),
    MouseDown,
    MouseUp,
    TouchStarted(DVec2),
    TouchMoved(DVec2),
    TouchEnded,
}

/// Pointer half of the input store.
#[derive(Debug, Default)]
pub struct PointerState {
    position: DVec2,
    button: ButtonState,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::MouseMoved(pos) | PointerEvent::TouchMoved(pos) => {
                self.position = pos;
            }
            PointerEvent::TouchStarted(pos) => {
                self.position = pos;
                self.button = ButtonState::Pressed;
            }
            PointerEvent::MouseDown => self.button = ButtonState::Pressed,
            PointerEvent::MouseUp | PointerEvent::TouchEnded => self.button = ButtonState::Released,
        }
    }

    /// Frame boundary.
    pub fn end_frame(&mut self) {
        self.button = self.button.decay();
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn button(&self) -> ButtonState {
        self.button
    }
}
