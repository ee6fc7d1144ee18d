// Error types for the particle network canvas

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while setting up or drawing the network canvas
#[derive(Debug, Error)]
pub enum Error {
    /// A browser global (window, document) is missing
    #[error("no global `{0}` exists")]
    MissingGlobal(&'static str),

    /// No canvas element with the given id
    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),

    /// The canvas refused to hand out a 2d context
    #[error("2d rendering context unavailable")]
    ContextUnavailable,

    /// A draw call on the surface failed
    #[error("draw call failed: {0}")]
    Draw(String),

    /// Color string is not `#rrggbb` or `#rrggbbaa`
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Config JSON could not be parsed
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config parsed but holds unusable values
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for JsValue {
    fn from(err: Error) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}
