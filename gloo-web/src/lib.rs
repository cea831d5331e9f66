//! gloo WASM web runtime
//!
//! Sets up a canvas and WebGL context, turns DOM mouse/touch/keyboard events
//! into polled per-frame input, and calls a user callback on every
//! `requestAnimationFrame`. Also provides async loaders for text, bytes,
//! images and audio. Drawing is left entirely to the caller.
//!
//! The input model itself lives in `gloo-shared`; this crate is the browser glue.

#[cfg(target_arch = "wasm32")]
mod assets;
#[cfg(target_arch = "wasm32")]
mod binder;
#[cfg(all(target_arch = "wasm32", feature = "js"))]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod context;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod listener;

pub use gloo_shared::{AssetKind, ButtonState, GlAttributes, LoadError, Settings};

#[cfg(target_arch = "wasm32")]
pub use assets::{load_image, read_bytes, read_text, Assets};
#[cfg(target_arch = "wasm32")]
pub use context::{Config, Context};

#[cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// Route `log` output and panics to the browser console. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Set up the canvas, bind input and start the frame loop.
///
/// The `init` callback, if any, has run by the time this returns. Errors
/// only come from the DOM setup itself (no window, no body to attach to).
#[cfg(target_arch = "wasm32")]
pub fn run(config: Config) -> Result<Context, JsValue> {
    let Config {
        canvas,
        root,
        settings,
        init,
        frame,
    } = config;

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let created = canvas.is_none();
    let canvas = canvas::prepare_canvas(&window, &document, canvas, root.as_ref(), &settings)?;
    let gl = canvas::create_gl_context(&canvas, &settings.gl_attributes());

    let pointer = Rc::new(RefCell::new(gloo_shared::PointerState::new()));
    let keyboard = Rc::new(RefCell::new(gloo_shared::KeyboardState::new()));
    let resync = Rc::new(Cell::new(false));
    let bindings = canvas::discard_on_error(
        &canvas,
        created,
        binder::bind(&canvas, &document, &pointer, &keyboard, &resync),
    )?;

    let ctx = Context {
        is_touch: canvas::is_touch_device(&window),
        frame_loop: frame::FrameLoop::new(window, bindings),
        canvas,
        gl,
        pointer,
        keyboard,
        clock: Rc::new(Cell::new(gloo_shared::FrameClock::new())),
        assets: Rc::new(Assets::new()),
    };

    ctx.frame_loop
        .start(frame::FrameDriver::new(ctx.clone(), resync, frame));

    if let Some(init) = init {
        init(&ctx);
    }
    Ok(ctx)
}
