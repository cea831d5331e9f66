//! JavaScript surface: `run(options)`, `readText`, `readBytes`, `loadImg`, and
//! the `Context` object passed to `init`/`frame` callbacks.

use std::cell::OnceCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Element, HtmlCanvasElement};

use gloo_shared::{LoadError, Settings};

use crate::context::{Config, Context};

/// Module start hook: logging and panic reporting.
#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging(log::Level::Info);
    log::info!("gloo web runtime initialized");
}

/// JS view of a running [`Context`].
#[wasm_bindgen(js_name = Context)]
pub struct JsContext {
    ctx: Context,
}

#[wasm_bindgen(js_class = Context)]
impl JsContext {
    /// The `WebGLRenderingContext`, or `null`.
    #[wasm_bindgen(getter)]
    pub fn gl(&self) -> JsValue {
        self.ctx.gl().map_or(JsValue::NULL, |gl| gl.clone().into())
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.ctx.canvas().clone()
    }

    #[wasm_bindgen(js_name = keyPressed)]
    pub fn key_pressed(&self, key: &str) -> bool {
        self.ctx.key_pressed(key)
    }

    #[wasm_bindgen(js_name = keyPressedRep)]
    pub fn key_pressed_rep(&self, key: &str) -> bool {
        self.ctx.key_pressed_repeat(key)
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> bool {
        self.ctx.key_down(key)
    }

    #[wasm_bindgen(js_name = keyReleased)]
    pub fn key_released(&self, key: &str) -> bool {
        self.ctx.key_released(key)
    }

    #[wasm_bindgen(js_name = mousePressed)]
    pub fn mouse_pressed(&self) -> bool {
        self.ctx.mouse_pressed()
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&self) -> bool {
        self.ctx.mouse_down()
    }

    #[wasm_bindgen(js_name = mouseReleased)]
    pub fn mouse_released(&self) -> bool {
        self.ctx.mouse_released()
    }

    #[wasm_bindgen(js_name = mouseX)]
    pub fn mouse_x(&self) -> f64 {
        self.ctx.mouse_x()
    }

    #[wasm_bindgen(js_name = mouseY)]
    pub fn mouse_y(&self) -> f64 {
        self.ctx.mouse_y()
    }

    pub fn time(&self) -> f64 {
        self.ctx.time()
    }

    pub fn dt(&self) -> f64 {
        self.ctx.dt()
    }

    /// This frame's typed characters as an array of one-character strings.
    #[wasm_bindgen(js_name = charInputted)]
    pub fn char_inputted(&self) -> Array {
        self.ctx
            .char_input()
            .into_iter()
            .map(|c| JsValue::from_str(c.encode_utf8(&mut [0; 4])))
            .collect()
    }

    #[wasm_bindgen(js_name = isTouch)]
    pub fn is_touch(&self) -> bool {
        self.ctx.is_touch()
    }

    /// Resolves to an `AudioBuffer` decoded with this context's audio context.
    #[wasm_bindgen(js_name = loadAudio)]
    pub fn load_audio(&self, src: String) -> Promise {
        let assets = Rc::clone(&self.ctx.assets);
        future_to_promise(async move {
            assets
                .load_audio(&src)
                .await
                .map(JsValue::from)
                .map_err(to_js_error)
        })
    }

    pub fn quit(&self) {
        self.ctx.quit();
    }
}

/// Start gloo from a JS options object:
/// `{ canvas, root, width, height, fullscreen, crisp, glConf, init, frame }`.
#[wasm_bindgen(js_name = run)]
pub fn run_js(options: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(&options)?;
    let mut config = Config::new().settings(settings);

    if let Some(canvas) = field::<HtmlCanvasElement>(&options, "canvas") {
        config = config.canvas(canvas);
    }
    if let Some(root) = field::<Element>(&options, "root") {
        config = config.root(root);
    }

    // `init`, `frame` and the return value all see the same JS object.
    let handle: Rc<OnceCell<JsValue>> = Rc::new(OnceCell::new());
    if let Some(init) = field::<Function>(&options, "init") {
        let handle = Rc::clone(&handle);
        config = config.on_init(move |ctx| call(&init, js_handle(&handle, ctx)));
    }
    if let Some(frame) = field::<Function>(&options, "frame") {
        let handle = Rc::clone(&handle);
        config = config.on_frame(move |ctx| call(&frame, js_handle(&handle, ctx)));
    }

    let ctx = crate::run(config)?;
    Ok(js_handle(&handle, &ctx).clone())
}

#[wasm_bindgen(js_name = readText)]
pub async fn read_text_js(src: String) -> Result<JsValue, JsValue> {
    crate::assets::read_text(&src)
        .await
        .map(JsValue::from)
        .map_err(to_js_error)
}

/// Resolves to an `ArrayBuffer`-backed `Uint8Array`.
#[wasm_bindgen(js_name = readBytes)]
pub async fn read_bytes_js(src: String) -> Result<JsValue, JsValue> {
    crate::assets::read_bytes(&src)
        .await
        .map(|bytes| js_sys::Uint8Array::from(bytes.as_slice()).into())
        .map_err(to_js_error)
}

#[wasm_bindgen(js_name = loadImg)]
pub async fn load_img_js(src: String) -> Result<JsValue, JsValue> {
    crate::assets::load_image(&src)
        .await
        .map(JsValue::from)
        .map_err(to_js_error)
}

fn settings_from_js(options: &JsValue) -> Result<Settings, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Settings::default());
    }
    // Functions and DOM elements drop out of (or stringify to `{}` in) the JSON.
    let json = String::from(js_sys::JSON::stringify(options)?);
    serde_json::from_str(&json).map_err(|e| JsValue::from_str(&format!("Invalid gloo options: {e}")))
}

fn field<T: JsCast>(options: &JsValue, name: &str) -> Option<T> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.dyn_into::<T>().ok())
}

fn js_handle<'a>(cell: &'a OnceCell<JsValue>, ctx: &Context) -> &'a JsValue {
    cell.get_or_init(|| JsContext { ctx: ctx.clone() }.into())
}

fn call(callback: &Function, ctx: &JsValue) {
    if let Err(e) = callback.call1(&JsValue::NULL, ctx) {
        log::error!("gloo callback threw: {e:?}");
    }
}

fn to_js_error(err: LoadError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_sys::Object;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::{KeyboardEvent, KeyboardEventInit};

    fn options(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = Object::new();
        for (name, value) in entries {
            Reflect::set(&obj, &JsValue::from_str(name), value).unwrap();
        }
        obj.into()
    }

    fn method(ctx: &JsValue, name: &str, args: &Array) -> JsValue {
        let f: Function = Reflect::get(ctx, &JsValue::from_str(name))
            .unwrap()
            .dyn_into()
            .unwrap();
        Reflect::apply(&f, ctx, args).unwrap()
    }

    fn canvas_of(ctx: &JsValue) -> HtmlCanvasElement {
        Reflect::get(ctx, &JsValue::from_str("canvas"))
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn quit(ctx: &JsValue) {
        method(ctx, "quit", &Array::new());
    }

    fn element(tag: &str, id: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document.create_element(tag).unwrap();
        el.set_id(id);
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    fn key_down(canvas: &HtmlCanvasElement, key: &str) {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        canvas.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_run_without_options() {
        let ctx = run_js(JsValue::UNDEFINED).unwrap();
        assert_eq!(canvas_of(&ctx).width(), 640);
        assert_eq!(canvas_of(&ctx).height(), 480);
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_run_reads_loose_options() {
        let opts = options(&[
            ("width", JsValue::from_f64(683.5)),
            ("height", JsValue::NULL),
            ("crisp", JsValue::from_f64(1.0)),
            ("fullscreen", JsValue::from_f64(0.0)),
        ]);
        let ctx = run_js(opts).unwrap();
        let canvas = canvas_of(&ctx);
        assert_eq!(canvas.width(), 683);
        assert_eq!(canvas.height(), 480);
        assert!(canvas.get_attribute("style").unwrap().contains("pixelated"));
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_settings_ignore_elements_and_callbacks() {
        let canvas = element("canvas", "settings-canvas");
        let opts = options(&[
            ("canvas", canvas.clone().into()),
            ("frame", Function::new_no_args("").into()),
            ("width", JsValue::from_f64(320.0)),
        ]);
        let settings = settings_from_js(&opts).unwrap();
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 480);
        assert_eq!(settings_from_js(&JsValue::NULL).unwrap(), Settings::default());
        canvas.remove();
    }

    #[wasm_bindgen_test]
    fn test_run_adopts_canvas_option() {
        let canvas = element("canvas", "js-given-canvas");
        let opts = options(&[("canvas", canvas.into()), ("width", JsValue::from_f64(100.0))]);
        let ctx = run_js(opts).unwrap();
        assert_eq!(canvas_of(&ctx).id(), "js-given-canvas");
        assert_eq!(canvas_of(&ctx).width(), 100);
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_run_appends_to_root_option() {
        let root = element("div", "js-root");
        let ctx = run_js(options(&[("root", root.clone().into())])).unwrap();
        let parent = canvas_of(&ctx).parent_element().unwrap();
        assert_eq!(parent.id(), "js-root");
        assert_eq!(root.child_element_count(), 1);
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_init_sees_returned_context() {
        let init = Function::new_with_args("ctx", "globalThis.glooInitCtx = ctx;");
        let ctx = run_js(options(&[("init", init.into())])).unwrap();
        let seen = Reflect::get(&js_sys::global(), &JsValue::from_str("glooInitCtx")).unwrap();
        assert!(Object::is(&ctx, &seen));
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_throwing_init_still_runs() {
        let init = Function::new_with_args("ctx", "throw new Error('boom');");
        let ctx = run_js(options(&[("init", init.into())])).unwrap();
        assert_eq!(canvas_of(&ctx).width(), 640);
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    fn test_char_inputted_and_key_queries() {
        let ctx = run_js(JsValue::UNDEFINED).unwrap();
        let canvas = canvas_of(&ctx);
        key_down(&canvas, "a");
        key_down(&canvas, " ");

        let chars: Array = method(&ctx, "charInputted", &Array::new()).dyn_into().unwrap();
        assert_eq!(chars.length(), 2);
        assert_eq!(chars.get(0).as_string().as_deref(), Some("a"));
        assert_eq!(chars.get(1).as_string().as_deref(), Some(" "));

        let pressed = method(&ctx, "keyPressed", &Array::of1(&JsValue::from_str("space")));
        assert_eq!(pressed.as_bool(), Some(true));
        let released = method(&ctx, "keyReleased", &Array::of1(&JsValue::from_str("a")));
        assert_eq!(released.as_bool(), Some(false));
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    async fn test_load_audio_rejects_missing_file() {
        let ctx = run_js(JsValue::UNDEFINED).unwrap();
        let promise: Promise = method(&ctx, "loadAudio", &Array::of1(&JsValue::from_str("missing.ogg")))
            .dyn_into()
            .unwrap();
        let err: js_sys::Error = JsFuture::from(promise).await.unwrap_err().dyn_into().unwrap();
        assert!(String::from(err.message()).contains("missing.ogg"));
        quit(&ctx);
    }

    #[wasm_bindgen_test]
    async fn test_read_text_rejects_missing_file() {
        let err: js_sys::Error = read_text_js("nope.txt".into()).await.unwrap_err().dyn_into().unwrap();
        assert!(String::from(err.message()).contains("nope.txt"));
    }
}
