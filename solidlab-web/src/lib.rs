/// SolidLab Web - WASM bindings for the browser front end
///
/// The page owns the canvas, the animation frame loop and the DOM; this crate
/// provides the solid's mesh buffers, camera matrices, input handling and the
/// `localStorage` backed progress store.
use serde::de::{Error as _, Unexpected};
use serde_json::Value;
use solidlab_core::{GeometryParams, Properties};
use tracing::info;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod logging;
pub mod progress;
pub mod storage;
pub mod viewer;

pub use error::{WebError, WebResult};
pub use progress::WebProgress;
pub use storage::{LocalStorageBackend, WebBackend};
pub use viewer::WebViewer;

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebProperties {
    pub surface_area: f64,
    pub volume: f64,
}

impl From<Properties> for WebProperties {
    fn from(properties: Properties) -> Self {
        Self {
            surface_area: properties.surface_area,
            volume: properties.volume,
        }
    }
}

/// Parse a parameter object; arrays and scalars are rejected
fn parse_params(params_json: &str) -> WebResult<GeometryParams> {
    let value: Value = serde_json::from_str(params_json)?;
    if value.is_object() {
        return Ok(serde_json::from_value(value)?);
    }
    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Array(_) => Unexpected::Seq,
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
    };
    Err(serde_json::Error::invalid_type(unexpected, &"a parameter object").into())
}

/// Properties for a type name and a JSON parameter object; blank JSON means defaults
pub fn properties_for(kind: &str, params_json: &str) -> WebResult<WebProperties> {
    let params = if params_json.trim().is_empty() {
        GeometryParams::default()
    } else {
        parse_params(params_json)?
    };
    Ok(solidlab_core::compute_properties(kind, &params)?.into())
}

#[wasm_bindgen]
pub fn compute_properties(kind: &str, params_json: &str) -> Result<WebProperties, JsValue> {
    properties_for(kind, params_json).map_err(error::js_error)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    logging::init_console_tracing(logging::DEFAULT_LOG_LEVEL);
    info!(version = env!("CARGO_PKG_VERSION"), "solidlab web module loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidlab_core::GeometryError;
    use std::f64::consts::PI;

    #[test]
    fn test_properties_from_json() {
        let cube = properties_for("cube", r#"{"width":2}"#).unwrap();
        assert_eq!(cube, WebProperties { surface_area: 24.0, volume: 8.0 });

        let sphere = properties_for("sphere", "").unwrap();
        assert!((sphere.surface_area - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_properties_errors() {
        assert!(matches!(
            properties_for("dodecahedron", "{}"),
            Err(WebError::Geometry(GeometryError::UnsupportedGeometry(_)))
        ));
        assert!(matches!(
            properties_for("cone", r#"{"radius":-1}"#),
            Err(WebError::Geometry(GeometryError::InvalidParameter { .. }))
        ));
        assert!(matches!(properties_for("cone", "[1, 2]"), Err(WebError::Json(_))));
    }

    #[test]
    fn test_params_must_be_an_object() {
        for json in ["[1, 2]", "3", "null", "true", r#""radius""#] {
            assert!(
                matches!(properties_for("sphere", json), Err(WebError::Json(_))),
                "{json} accepted"
            );
        }
        let cone = properties_for("cone", r#"{"radius": 1, "height": 2}"#).unwrap();
        assert!((cone.volume - 2.0 * PI / 3.0).abs() < 1e-9);
    }
}
