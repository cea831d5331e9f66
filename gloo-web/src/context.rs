use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use web_sys::{Element, HtmlCanvasElement, WebGlRenderingContext};

use gloo_shared::{FrameClock, GlAttributes, KeyboardState, PointerState, Settings};

use crate::assets::Assets;
use crate::frame::FrameLoop;

pub(crate) type InitFn = Box<dyn FnOnce(&Context)>;
pub(crate) type FrameFn = Box<dyn FnMut(&Context)>;

/// Everything [`crate::run`] needs. Built with chained setters:
///
/// ```ignore
/// let ctx = gloo_web::run(
///     Config::new()
///         .size(320, 240)
///         .crisp(true)
///         .on_frame(|ctx| if ctx.key_pressed("esc") { ctx.quit() }),
/// )?;
/// ```
#[derive(Default)]
pub struct Config {
    pub(crate) canvas: Option<HtmlCanvasElement>,
    pub(crate) root: Option<Element>,
    pub(crate) settings: Settings,
    pub(crate) init: Option<InitFn>,
    pub(crate) frame: Option<FrameFn>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing canvas instead of creating one.
    pub fn canvas(mut self, canvas: HtmlCanvasElement) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Element a newly created canvas is appended to. Defaults to `document.body`.
    pub fn root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.settings.width = width;
        self.settings.height = height;
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.settings.fullscreen = fullscreen;
        self
    }

    pub fn crisp(mut self, crisp: bool) -> Self {
        self.settings.crisp = crisp;
        self
    }

    pub fn gl_attributes(mut self, attrs: GlAttributes) -> Self {
        self.settings.gl = Some(attrs);
        self
    }

    /// Called once, synchronously, before `run` returns.
    pub fn on_init(mut self, init: impl FnOnce(&Context) + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Called once per display refresh, before input states are decayed.
    pub fn on_frame(mut self, frame: impl FnMut(&Context) + 'static) -> Self {
        self.frame = Some(Box::new(frame));
        self
    }
}

/// Handle to a running gloo instance.
///
/// Cloning is cheap; all clones observe the same state. Input is read-only
/// here: the event listeners and the frame loop are the only writers.
#[derive(Clone)]
pub struct Context {
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) gl: Option<WebGlRenderingContext>,
    pub(crate) pointer: Rc<RefCell<PointerState>>,
    pub(crate) keyboard: Rc<RefCell<KeyboardState>>,
    pub(crate) clock: Rc<Cell<FrameClock>>,
    pub(crate) assets: Rc<Assets>,
    pub(crate) frame_loop: Rc<FrameLoop>,
    pub(crate) is_touch: bool,
}

impl Context {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The WebGL context, if the browser provided one.
    pub fn gl(&self) -> Option<&WebGlRenderingContext> {
        self.gl.as_ref()
    }

    // --- Keyboard ---

    /// Went down this frame (auto-repeat excluded).
    pub fn key_pressed(&self, key: &str) -> bool {
        self.keyboard.borrow().pressed(key)
    }

    /// Went down or auto-repeated this frame.
    pub fn key_pressed_repeat(&self, key: &str) -> bool {
        self.keyboard.borrow().pressed_repeat(key)
    }

    pub fn key_down(&self, key: &str) -> bool {
        self.keyboard.borrow().down(key)
    }

    pub fn key_released(&self, key: &str) -> bool {
        self.keyboard.borrow().released(key)
    }

    /// Characters typed this frame, in order.
    pub fn char_input(&self) -> Vec<char> {
        self.keyboard.borrow().chars().to_vec()
    }

    // --- Pointer ---

    pub fn mouse_pressed(&self) -> bool {
        self.pointer.borrow().button().is_pressed()
    }

    pub fn mouse_down(&self) -> bool {
        self.pointer.borrow().button().is_down()
    }

    pub fn mouse_released(&self) -> bool {
        self.pointer.borrow().button().is_released()
    }

    pub fn mouse_pos(&self) -> DVec2 {
        self.pointer.borrow().position()
    }

    pub fn mouse_x(&self) -> f64 {
        self.mouse_pos().x
    }

    pub fn mouse_y(&self) -> f64 {
        self.mouse_pos().y
    }

    // --- Time ---

    /// Seconds since the first frame.
    pub fn time(&self) -> f64 {
        self.clock.get().time()
    }

    /// Seconds since the previous frame.
    pub fn dt(&self) -> f64 {
        self.clock.get().dt()
    }

    // --- Misc ---

    pub fn is_touch(&self) -> bool {
        self.is_touch
    }

    /// Asset loaders, including the lazily created audio context.
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Stop the frame loop and detach the input listeners. A frame that is
    /// currently running finishes; no further frames run. Cannot be restarted.
    pub fn quit(&self) {
        self.frame_loop.stop();
    }
}
