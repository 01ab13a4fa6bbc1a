use solidlab_core::{GeometryError, StorageError};
use std::fmt::Display;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown parameter: {0}")]
    UnknownParam(String),
}

pub type WebResult<T> = Result<T, WebError>;

/// Error message as a JS string, thrown on the JS side
pub fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
