//! Shared input model for the gloo web runtime.
//!
//! Everything in this crate is free of browser types so it can be exercised by
//! host tests. The `gloo-web` crate feeds DOM events into these stores and
//! drives the frame boundary from `requestAnimationFrame`.

pub mod button;
pub mod clock;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod keymap;
pub mod pointer;

pub use button::ButtonState;
pub use clock::FrameClock;
pub use config::{GlAttributes, Settings, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{AssetKind, LoadError};
pub use keyboard::{KeyOutcome, KeyboardState};
pub use pointer::{PointerEvent, PointerState};
