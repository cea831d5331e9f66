use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, WebGlContextAttributes, WebGlRenderingContext, Window};

use gloo_shared::{GlAttributes, Settings};

/// Adopt `canvas`, or create one inside `root` (default `document.body`), then
/// size, style and focus it.
pub(crate) fn prepare_canvas(
    window: &Window,
    document: &Document,
    canvas: Option<HtmlCanvasElement>,
    root: Option<&Element>,
    settings: &Settings,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = match canvas {
        Some(canvas) => canvas,
        None => {
            let canvas = document
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| "Element is not a canvas")?;
            match root {
                Some(root) => root.append_child(&canvas)?,
                None => document.body().ok_or("No document body")?.append_child(&canvas)?,
            };
            canvas
        }
    };

    let (width, height) = settings.canvas_size(inner_size(window));
    canvas.set_width(width);
    canvas.set_height(height);
    canvas.set_attribute("style", &settings.canvas_style())?;
    // Focusable, so keyboard events land on the canvas.
    canvas.set_tab_index(0);
    canvas.focus()?;

    log::info!(
        "Canvas ready: {width}x{height}{}{}",
        if settings.fullscreen { " (fullscreen)" } else { "" },
        if settings.crisp { " (crisp)" } else { "" },
    );
    Ok(canvas)
}

/// Pass `result` through, detaching `canvas` from the DOM on error if setup
/// created it.
pub(crate) fn discard_on_error<T>(
    canvas: &HtmlCanvasElement,
    created: bool,
    result: Result<T, JsValue>,
) -> Result<T, JsValue> {
    if result.is_err() && created {
        log::debug!("Removing canvas after failed setup");
        canvas.remove();
    }
    result
}

fn inner_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Request a WebGL 1 context. A missing context is logged, not reported.
pub(crate) fn create_gl_context(
    canvas: &HtmlCanvasElement,
    attrs: &GlAttributes,
) -> Option<WebGlRenderingContext> {
    let options = WebGlContextAttributes::new();
    if let Some(v) = attrs.alpha {
        options.set_alpha(v);
    }
    if let Some(v) = attrs.depth {
        options.set_depth(v);
    }
    if let Some(v) = attrs.stencil {
        options.set_stencil(v);
    }
    if let Some(v) = attrs.antialias {
        options.set_antialias(v);
    }
    if let Some(v) = attrs.premultiplied_alpha {
        options.set_premultiplied_alpha(v);
    }
    if let Some(v) = attrs.preserve_drawing_buffer {
        options.set_preserve_drawing_buffer(v);
    }

    let gl = canvas
        .get_context_with_context_options("webgl", &options)
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<WebGlRenderingContext>().ok());
    if gl.is_none() {
        log::warn!("WebGL context unavailable");
    }
    gl
}

/// Whether the device reports touch support.
pub(crate) fn is_touch_device(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn attached_canvas() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn test_created_canvas_removed_on_error() {
        let canvas = attached_canvas();
        let result: Result<(), JsValue> = Err("bind failed".into());
        assert!(discard_on_error(&canvas, true, result).is_err());
        assert!(canvas.parent_node().is_none());
    }

    #[wasm_bindgen_test]
    fn test_given_canvas_kept_on_error() {
        let canvas = attached_canvas();
        let result: Result<(), JsValue> = Err("bind failed".into());
        assert!(discard_on_error(&canvas, false, result).is_err());
        assert!(canvas.parent_node().is_some());
        canvas.remove();
    }

    #[wasm_bindgen_test]
    fn test_created_canvas_kept_on_success() {
        let canvas = attached_canvas();
        assert_eq!(discard_on_error(&canvas, true, Ok(7)).unwrap(), 7);
        assert!(canvas.parent_node().is_some());
        canvas.remove();
    }
}
