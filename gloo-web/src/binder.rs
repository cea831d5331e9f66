//! DOM event wiring.
//!
//! Each channel (pointer, keyboard, visibility) gets its own listeners, and
//! each listener captures only the piece of state that channel owns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, VisibilityState};

use gloo_shared::{KeyboardState, PointerEvent, PointerState};

use crate::listener::Listener;

/// Live listeners for one running context. Dropping this unsubscribes them all.
pub(crate) struct Bindings {
    _listeners: Vec<Listener>,
}

pub(crate) fn bind(
    canvas: &HtmlCanvasElement,
    document: &Document,
    pointer: &Rc<RefCell<PointerState>>,
    keyboard: &Rc<RefCell<KeyboardState>>,
    resync: &Rc<Cell<bool>>,
) -> Result<Bindings, JsValue> {
    let mut listeners = bind_pointer(canvas, pointer)?;
    listeners.extend(bind_keyboard(canvas, keyboard)?);
    listeners.push(bind_visibility(document, resync)?);
    log::debug!("Bound {} input listeners", listeners.len());
    Ok(Bindings { _listeners: listeners })
}

fn bind_pointer(canvas: &HtmlCanvasElement, state: &Rc<RefCell<PointerState>>) -> Result<Vec<Listener>, JsValue> {
    let mouse = |kind: &'static str, map: fn(&MouseEvent) -> PointerEvent| {
        let state = Rc::clone(state);
        Listener::new(canvas, kind, move |e: MouseEvent| state.borrow_mut().handle(map(&e)))
    };
    let touch = |kind: &'static str, map: fn(&TouchEvent) -> Option<PointerEvent>| {
        let state = Rc::clone(state);
        Listener::new(canvas, kind, move |e: TouchEvent| {
            if let Some(event) = map(&e) {
                state.borrow_mut().handle(event);
            }
        })
    };

    Ok(vec![
        mouse("mousemove", |e| PointerEvent::MouseMoved(offset(e)))?,
        mouse("mousedown", |_| PointerEvent::MouseDown)?,
        mouse("mouseup", |_| PointerEvent::MouseUp)?,
        touch("touchstart", |e| first_touch(e).map(PointerEvent::TouchStarted))?,
        touch("touchmove", |e| first_touch(e).map(PointerEvent::TouchMoved))?,
        touch("touchend", |_| Some(PointerEvent::TouchEnded))?,
        touch("touchcancel", |_| Some(PointerEvent::TouchEnded))?,
    ])
}

fn offset(e: &MouseEvent) -> DVec2 {
    DVec2::new(f64::from(e.offset_x()), f64::from(e.offset_y()))
}

fn first_touch(e: &TouchEvent) -> Option<DVec2> {
    let touch = e.touches().get(0)?;
    Some(DVec2::new(f64::from(touch.page_x()), f64::from(touch.page_y())))
}

fn bind_keyboard(canvas: &HtmlCanvasElement, state: &Rc<RefCell<KeyboardState>>) -> Result<Vec<Listener>, JsValue> {
    let down_state = Rc::clone(state);
    let keydown = Listener::new(canvas, "keydown", move |e: KeyboardEvent| {
        let outcome = down_state.borrow_mut().key_down(&e.key(), e.repeat());
        if outcome.prevent_default {
            e.prevent_default();
        }
    })?;

    let up_state = Rc::clone(state);
    let keyup = Listener::new(canvas, "keyup", move |e: KeyboardEvent| {
        up_state.borrow_mut().key_up(&e.key());
    })?;

    Ok(vec![keydown, keyup])
}

fn bind_visibility(document: &Document, resync: &Rc<Cell<bool>>) -> Result<Listener, JsValue> {
    let resync = Rc::clone(resync);
    let doc = document.clone();
    Listener::new(document, "visibilitychange", move |_: web_sys::Event| {
        if doc.visibility_state() == VisibilityState::Visible {
            log::debug!("Page visible again, resyncing frame clock");
            resync.set(true);
        }
    })
}
