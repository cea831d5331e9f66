use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Serializable part of the runtime configuration.
///
/// Field names follow the JavaScript options object (`width`, `height`,
/// `fullscreen`, `crisp`, `glConf`). Missing fields take their defaults.
/// Sizes accept any number and flags accept any value, read the way a
/// browser would read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Canvas width in pixels. 0 means [`DEFAULT_WIDTH`].
    #[serde(deserialize_with = "loose_size")]
    pub width: u32,
    /// Canvas height in pixels. 0 means [`DEFAULT_HEIGHT`].
    #[serde(deserialize_with = "loose_size")]
    pub height: u32,
    /// Size the canvas to the window instead of `width` × `height`.
    #[serde(deserialize_with = "truthy")]
    pub fullscreen: bool,
    /// Ask the browser for nearest-neighbour scaling.
    #[serde(deserialize_with = "truthy")]
    pub crisp: bool,
    /// WebGL context attributes. `None` uses [`GlAttributes::default`].
    #[serde(rename = "glConf", skip_serializing_if = "Option::is_none")]
    pub gl: Option<GlAttributes>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fullscreen: false,
            crisp: false,
            gl: None,
        }
    }
}

impl Settings {
    /// Canvas size given the window's inner size.
    pub fn canvas_size(&self, window: (u32, u32)) -> (u32, u32) {
        if self.fullscreen {
            return window;
        }
        let width = if self.width == 0 { DEFAULT_WIDTH } else { self.width };
        let height = if self.height == 0 { DEFAULT_HEIGHT } else { self.height };
        (width, height)
    }

    /// Inline `style` attribute for the canvas.
    pub fn canvas_style(&self) -> String {
        let mut styles = vec!["outline: none"];
        if self.crisp {
            styles.push("image-rendering: pixelated");
            styles.push("image-rendering: crisp-edges");
        }
        styles.join(";")
    }

    /// Attributes to request the WebGL context with.
    pub fn gl_attributes(&self) -> GlAttributes {
        self.gl.clone().unwrap_or_default()
    }
}

/// Any JSON value, as far as the options object cares.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl Loose {
    /// JavaScript truthiness. Objects and arrays are truthy.
    fn truthy(&self) -> bool {
        match self {
            Loose::Null => false,
            Loose::Bool(b) => *b,
            Loose::Number(n) => *n != 0.0 && !n.is_nan(),
            Loose::Text(s) => !s.is_empty(),
            Loose::Other(_) => true,
        }
    }

    /// A pixel size, truncated. Anything that is not a finite positive
    /// number (or a string holding one) is 0, i.e. unset.
    fn size(&self) -> u32 {
        let n = match self {
            Loose::Number(n) => *n,
            Loose::Text(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        if n.is_finite() && n > 0.0 {
            n as u32
        } else {
            0
        }
    }
}

fn loose_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Loose::deserialize(deserializer).map(|v| v.size())
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Loose::deserialize(deserializer).map(|v| v.truthy())
}

/// WebGL context creation attributes.
///
/// A caller-supplied value replaces the defaults entirely; fields left as
/// `None` fall through to the browser's own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stencil: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antialias: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premultiplied_alpha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_drawing_buffer: Option<bool>,
}

impl Default for GlAttributes {
    fn default() -> Self {
        Self {
            alpha: Some(true),
            depth: Some(true),
            stencil: Some(true),
            antialias: Some(true),
            premultiplied_alpha: None,
            preserve_drawing_buffer: Some(true),
        }
    }
}
