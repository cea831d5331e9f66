use std::collections::HashMap;

use crate::button::ButtonState;
use crate::keymap;

/// Result of handling a raw keydown, returned to the DOM listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The gloo key name the event was recorded under.
    pub name: String,
    /// Whether the listener should call `preventDefault` on the event.
    pub prevent_default: bool,
}

/// Keyboard half of the input store: per-key button state and this frame's text input.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<String, ButtonState>,
    chars: Vec<char>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw keydown. `repeat` is the DOM auto-repeat flag.
    pub fn key_down(&mut self, raw: &str, repeat: bool) -> KeyOutcome {
        let name = keymap::key_name(raw);
        if let Some(c) = keymap::char_input(&name) {
            self.chars.push(c);
        }
        let state = if repeat { ButtonState::RPressed } else { ButtonState::Pressed };
        log::trace!("key {name}: {}", state.label());
        self.keys.insert(name.clone(), state);
        KeyOutcome {
            prevent_default: keymap::prevents_default(&name),
            name,
        }
    }

    /// Record a raw keyup.
    pub fn key_up(&mut self, raw: &str) {
        let name = keymap::key_name(raw);
        log::trace!("key {name}: released");
        self.keys.insert(name, ButtonState::Released);
    }

    /// Frame boundary: settle every key and drop this frame's text input.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            *state = state.decay();
        }
        self.chars.clear();
    }

    /// Current state of a key by gloo name. Keys never seen are `Idle`.
    pub fn state(&self, name: &str) -> ButtonState {
        self.keys.get(name).copied().unwrap_or_default()
    }

    pub fn pressed(&self, name: &str) -> bool {
        self.state(name).is_pressed()
    }

    pub fn pressed_repeat(&self, name: &str) -> bool {
        self.state(name).is_pressed_repeat()
    }

    pub fn down(&self, name: &str) -> bool {
        self.state(name).is_down()
    }

    pub fn released(&self, name: &str) -> bool {
        self.state(name).is_released()
    }

    /// Characters typed since the last frame boundary, in order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_hold_sequence() {
        let mut kb = KeyboardState::new();
        kb.key_down("a", false);
        assert_eq!(kb.state("a"), ButtonState::Pressed);
        assert!(kb.pressed("a"));
        assert!(kb.down("a"));

        for _ in 0..5 {
            kb.end_frame();
            assert_eq!(kb.state("a"), ButtonState::Down);
            assert!(!kb.pressed("a"));
            assert!(kb.down("a"));
        }
    }

    #[test]
    fn test_release_reports_exactly_one_frame() {
        let mut kb = KeyboardState::new();
        kb.key_down("a", false);
        kb.end_frame();
        kb.key_up("a");
        assert!(kb.released("a"));
        assert!(!kb.down("a"));

        kb.end_frame();
        assert_eq!(kb.state("a"), ButtonState::Up);
        for _ in 0..3 {
            kb.end_frame();
            assert_eq!(kb.state("a"), ButtonState::Up);
            assert!(!kb.released("a"));
        }

        kb.key_down("a", false);
        assert!(kb.pressed("a"));
    }

    #[test]
    fn test_auto_repeat() {
        let mut kb = KeyboardState::new();
        kb.key_down("ArrowLeft", false);
        kb.end_frame();
        kb.key_down("ArrowLeft", true);
        assert_eq!(kb.state("left"), ButtonState::RPressed);
        assert!(!kb.pressed("left"));
        assert!(kb.pressed_repeat("left"));
        assert!(kb.down("left"));

        kb.end_frame();
        assert_eq!(kb.state("left"), ButtonState::Down);
        assert!(!kb.pressed_repeat("left"));
    }

    #[test]
    fn test_unknown_key_is_idle() {
        let kb = KeyboardState::new();
        assert_eq!(kb.state("q"), ButtonState::Idle);
        assert!(!kb.pressed("q"));
        assert!(!kb.pressed_repeat("q"));
        assert!(!kb.down("q"));
        assert!(!kb.released("q"));
    }

    #[test]
    fn test_space_sets_state_and_char() {
        let mut kb = KeyboardState::new();
        let outcome = kb.key_down(" ", false);
        assert_eq!(outcome.name, "space");
        assert!(outcome.prevent_default);
        assert!(kb.pressed("space"));
        assert_eq!(kb.chars(), &[' ']);
    }

    #[test]
    fn test_chars_accumulate_within_frame_and_clear_at_boundary() {
        let mut kb = KeyboardState::new();
        kb.key_down("H", false);
        kb.key_down("i", false);
        kb.key_down("Shift", false);
        kb.key_down("!", false);
        assert_eq!(kb.chars(), &['h', 'i', '!']);

        kb.end_frame();
        assert!(kb.chars().is_empty());
        kb.end_frame();
        assert!(kb.chars().is_empty());
    }

    #[test]
    fn test_repeat_also_appends_char() {
        let mut kb = KeyboardState::new();
        kb.key_down("x", false);
        kb.key_down("x", true);
        assert_eq!(kb.chars(), &['x', 'x']);
    }

    #[test]
    fn test_prevent_default_outcomes() {
        let mut kb = KeyboardState::new();
        assert!(kb.key_down("Tab", false).prevent_default);
        assert!(kb.key_down("ArrowUp", false).prevent_default);
        assert!(!kb.key_down("Escape", false).prevent_default);
        assert!(!kb.key_down("w", false).prevent_default);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut kb = KeyboardState::new();
        kb.key_down("a", false);
        kb.end_frame();
        kb.key_down("b", false);
        kb.key_up("a");
        assert!(kb.released("a"));
        assert!(kb.pressed("b"));
    }
}
