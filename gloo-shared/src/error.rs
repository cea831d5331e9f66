use std::fmt;

use thiserror::Error;

/// What an asset loader was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Text,
    Bytes,
    Image,
    Audio,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The one failure an asset loader can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {kind} from {src}: {reason}")]
pub struct LoadError {
    /// The path or URL that was requested.
    pub src: String,
    pub kind: AssetKind,
    /// Browser-provided detail, if any.
    pub reason: String,
}

impl LoadError {
    pub fn new(kind: AssetKind, src: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind,
            reason: reason.into(),
        }
    }
}
