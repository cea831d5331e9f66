use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// A DOM event listener that is removed when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Subscribe `handler` to `kind` events on `target`. Events that are not
    /// of type `E` are ignored.
    pub(crate) fn new<E, F>(target: &EventTarget, kind: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("Failed to remove {} listener: {e:?}", self.kind);
        }
    }
}
