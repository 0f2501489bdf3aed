//! Error type for the effects layer
//!
//! Missing page elements are never errors; they are `Option`s that turn a
//! component into a no-op. Errors are reserved for bad configuration and
//! failed browser calls.

use std::fmt;

/// Errors raised while configuring or wiring effects
#[derive(Debug)]
pub enum FxError {
    /// Typewriter was given no phrases to cycle through
    EmptyPhrases,
    /// Settings failed validation
    InvalidSettings(String),
    /// In-page JSON config could not be parsed
    Config(serde_json::Error),
    /// A browser API call failed (stringified `JsValue`)
    Js(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::EmptyPhrases => write!(f, "typewriter phrase list is empty"),
            FxError::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
            FxError::Config(e) => write!(f, "failed to parse config: {}", e),
            FxError::Js(msg) => write!(f, "browser call failed: {}", msg),
        }
    }
}

impl std::error::Error for FxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FxError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        FxError::Config(e)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        FxError::Js(format!("{:?}", v))
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
