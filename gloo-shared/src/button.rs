/// Polled state of a button-like input (the mouse button or a single key).
///
/// Raw events move a button into `Pressed`, `RPressed` or `Released` at any
/// time; [`ButtonState::decay`] runs once at every frame boundary and settles
/// those into `Down` / `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    /// Went down since the last frame boundary.
    Pressed,
    /// Keyboard auto-repeat since the last frame boundary.
    RPressed,
    Down,
    /// Went up since the last frame boundary.
    Released,
    Up,
}

impl ButtonState {
    /// State after a frame boundary.
    #[must_use]
    pub fn decay(self) -> Self {
        match self {
            Self::Pressed | Self::RPressed => Self::Down,
            Self::Released => Self::Up,
            other => other,
        }
    }

    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    pub fn is_pressed_repeat(self) -> bool {
        matches!(self, Self::Pressed | Self::RPressed)
    }

    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::RPressed | Self::Down)
    }

    pub fn is_released(self) -> bool {
        matches!(self, Self::Released)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressed => "pressed",
            Self::RPressed => "rpressed",
            Self::Down => "down",
            Self::Released => "released",
            Self::Up => "up",
        }
    }
}
