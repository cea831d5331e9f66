use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::binder::Bindings;
use crate::context::{Context, FrameFn};

/// Work done once per display refresh: clock, user callback, then the frame boundary.
pub(crate) struct FrameDriver {
    ctx: Context,
    resync: Rc<Cell<bool>>,
    frame: Option<FrameFn>,
}

impl FrameDriver {
    pub(crate) fn new(ctx: Context, resync: Rc<Cell<bool>>, frame: Option<FrameFn>) -> Self {
        Self { ctx, resync, frame }
    }

    fn step(&mut self, now_ms: f64) {
        let mut clock = self.ctx.clock.get();
        clock.tick(now_ms, self.resync.replace(false));
        self.ctx.clock.set(clock);

        if let Some(frame) = self.frame.as_mut() {
            frame(&self.ctx);
        }

        self.ctx.pointer.borrow_mut().end_frame();
        self.ctx.keyboard.borrow_mut().end_frame();
    }
}

/// The `requestAnimationFrame` loop.
///
/// The scheduled closure holds an `Rc` back to the loop, so the loop lives
/// until [`FrameLoop::stop`] breaks the cycle.
pub(crate) struct FrameLoop {
    window: Window,
    pending: Cell<Option<i32>>,
    stopped: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    bindings: RefCell<Option<Bindings>>,
}

impl FrameLoop {
    pub(crate) fn new(window: Window, bindings: Bindings) -> Rc<Self> {
        Rc::new(Self {
            window,
            pending: Cell::new(None),
            stopped: Cell::new(false),
            callback: RefCell::new(None),
            bindings: RefCell::new(Some(bindings)),
        })
    }

    pub(crate) fn start(self: &Rc<Self>, mut driver: FrameDriver) {
        let this = Rc::clone(self);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            this.pending.set(None);
            if this.stopped.get() {
                return;
            }
            driver.step(now);
            // The callback may have quit; the frame still completes but is not rescheduled.
            if !this.stopped.get() {
                this.schedule();
            }
        }) as Box<dyn FnMut(f64)>);

        *self.callback.borrow_mut() = Some(callback);
        self.schedule();
        log::debug!("Frame loop started");
    }

    fn schedule(&self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    /// Cancel the pending frame and release the closure and listeners. Idempotent.
    pub(crate) fn stop(&self) {
        if self.stopped.replace(true) {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::debug!("cancelAnimationFrame({id}) failed: {e:?}");
            }
        }

        // `stop` may be running inside the frame closure itself, so the drop
        // is deferred until the current task has unwound.
        let callback = self.callback.borrow_mut().take();
        let bindings = self.bindings.borrow_mut().take();
        wasm_bindgen_futures::spawn_local(async move {
            drop(bindings);
            drop(callback);
        });
        log::debug!("Frame loop stopped");
    }
}
