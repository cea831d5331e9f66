//! Fixed translation from DOM `KeyboardEvent.key` values to gloo key names.

/// DOM key values with a dedicated name. Everything else is lower-cased.
const REMAP: [(&str, &str); 6] = [
    ("ArrowLeft", "left"),
    ("ArrowRight", "right"),
    ("ArrowUp", "up"),
    ("ArrowDown", "down"),
    ("Escape", "esc"),
    (" ", "space"),
];

/// Key names whose browser default action (scrolling, focus traversal) is suppressed.
pub const PREVENT_DEFAULT_KEYS: [&str; 6] = ["space", "left", "right", "up", "down", "tab"];

/// Map a raw DOM key value to its gloo name.
pub fn key_name(raw: &str) -> String {
    REMAP
        .iter()
        .find(|(dom, _)| *dom == raw)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| raw.to_lowercase())
}

pub fn prevents_default(name: &str) -> bool {
    PREVENT_DEFAULT_KEYS.contains(&name)
}

/// The character a key name contributes to the per-frame text buffer, if any.
///
/// Single-character names contribute themselves (already lower-cased by
/// [`key_name`]); `space` contributes `' '`.
pub fn char_input(name: &str) -> Option<char> {
    if name == "space" {
        return Some(' ');
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
