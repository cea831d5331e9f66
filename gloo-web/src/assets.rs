//! Asset loaders over `gloo-net` HTTP, `HtmlImageElement` and Web Audio.
//!
//! Each load is an independent future. Nothing is cached, deduplicated or retried.

use std::cell::OnceCell;

use gloo_net::http::{Request, Response};
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioContext, HtmlImageElement};

use gloo_shared::{AssetKind, LoadError};

/// Fetch `src` as UTF-8 text.
pub async fn read_text(src: &str) -> Result<String, LoadError> {
    let kind = AssetKind::Text;
    let response = fetch(src, kind).await?;
    response.text().await.map_err(|e| http_failure(kind, src, &e))
}

/// Fetch `src` as raw bytes.
pub async fn read_bytes(src: &str) -> Result<Vec<u8>, LoadError> {
    read_bytes_as(src, AssetKind::Bytes).await
}

/// Load and decode an image. Resolves once the browser has decoded it.
pub async fn load_image(src: &str) -> Result<HtmlImageElement, LoadError> {
    let image = HtmlImageElement::new().map_err(|e| failure(AssetKind::Image, src, &e))?;
    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);

    let result = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);

    match result {
        Ok(_) => Ok(image),
        Err(_) => {
            log::warn!("Failed to load image {src}");
            Err(LoadError::new(AssetKind::Image, src, "image could not be loaded or decoded"))
        }
    }
}

/// Loader state that outlives a single call: the Web Audio context.
///
/// The context is created on the first audio load and reused for every load
/// through the same `Assets`.
#[derive(Default)]
pub struct Assets {
    audio: OnceCell<AudioContext>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audio_context(&self) -> Result<&AudioContext, JsValue> {
        if let Some(ctx) = self.audio.get() {
            return Ok(ctx);
        }
        let ctx = AudioContext::new()?;
        log::debug!("Created audio context ({} Hz)", ctx.sample_rate());
        Ok(self.audio.get_or_init(|| ctx))
    }

    pub fn has_audio_context(&self) -> bool {
        self.audio.get().is_some()
    }

    /// Fetch `src` and decode it with the shared audio context.
    pub async fn load_audio(&self, src: &str) -> Result<AudioBuffer, LoadError> {
        let kind = AssetKind::Audio;
        let bytes = read_bytes_as(src, kind).await?;
        let ctx = self.audio_context().map_err(|e| failure(kind, src, &e))?;
        let buffer = Uint8Array::from(bytes.as_slice()).buffer();
        let decoding = ctx.decode_audio_data(&buffer).map_err(|e| failure(kind, src, &e))?;
        JsFuture::from(decoding)
            .await
            .map_err(|e| failure(kind, src, &e))?
            .dyn_into::<AudioBuffer>()
            .map_err(|e| failure(kind, src, &e))
    }
}

async fn read_bytes_as(src: &str, kind: AssetKind) -> Result<Vec<u8>, LoadError> {
    let response = fetch(src, kind).await?;
    response.binary().await.map_err(|e| http_failure(kind, src, &e))
}

/// GET `src`, failing on network errors and non-2xx statuses.
async fn fetch(src: &str, kind: AssetKind) -> Result<Response, LoadError> {
    let response = Request::get(src)
        .send()
        .await
        .map_err(|e| http_failure(kind, src, &e))?;
    if !response.ok() {
        let reason = format!("HTTP {} {}", response.status(), response.status_text());
        log::warn!("Failed to load {kind} {src}: {reason}");
        return Err(LoadError::new(kind, src, reason));
    }
    Ok(response)
}

fn http_failure(kind: AssetKind, src: &str, err: &gloo_net::Error) -> LoadError {
    log::warn!("Failed to load {kind} {src}: {err}");
    LoadError::new(kind, src, err.to_string())
}

fn failure(kind: AssetKind, src: &str, err: &JsValue) -> LoadError {
    let reason = describe(err);
    log::warn!("Failed to load {kind} {src}: {reason}");
    LoadError::new(kind, src, reason)
}

fn describe(err: &JsValue) -> String {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
