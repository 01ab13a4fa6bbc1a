/// Learning progress and practice log for the page, as JSON strings
use serde::Serialize;
use solidlab_core::store::{current_export_file_name, NewPracticeRecord};
use solidlab_core::{AppConfigPatch, ProgressStore, ShapeKind};
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::error::{js_error, WebResult};
use crate::storage::WebBackend;
use crate::viewer::WebViewer;

fn to_json<T: Serialize + ?Sized>(value: &T) -> WebResult<String> {
    Ok(serde_json::to_string(value)?)
}

#[wasm_bindgen]
pub struct WebProgress {
    store: ProgressStore<WebBackend>,
}

impl WebProgress {
    pub fn with_backend(backend: WebBackend) -> Self {
        Self {
            store: ProgressStore::new(backend),
        }
    }

    pub(crate) fn visit(&mut self, kind: &str) -> WebResult<String> {
        let kind: ShapeKind = kind.parse()?;
        to_json(&self.store.record_visit(kind)?)
    }

    pub(crate) fn add_record(
        &mut self,
        kind: &str,
        question: String,
        answer: f64,
        user_answer: f64,
        is_correct: bool,
    ) -> WebResult<String> {
        let record = self.store.add_practice_record(NewPracticeRecord {
            geometry_type: kind.parse()?,
            question,
            answer,
            user_answer,
            is_correct,
        })?;
        to_json(&record)
    }

    pub(crate) fn apply_config(&mut self, patch_json: &str) -> WebResult<String> {
        let patch: AppConfigPatch = serde_json::from_str(patch_json)?;
        to_json(&self.store.save_app_config(patch)?)
    }

    /// Count a visit, remember the shape and open it with the stored preferences.
    ///
    /// Failing writes are logged; the viewer still opens.
    pub(crate) fn open(&mut self, kind: &str) -> WebResult<WebViewer> {
        let viewer = WebViewer::open(kind, &self.store.app_config())?;
        let kind = viewer.state().kind();
        if let Err(e) = self.store.record_visit(kind) {
            warn!(shape = %kind, error = %e, "failed to record visit");
        }
        if let Err(e) = self.store.set_current_geometry(kind) {
            warn!(shape = %kind, error = %e, "failed to remember current shape");
        }
        Ok(viewer)
    }

    pub fn store(&self) -> &ProgressStore<WebBackend> {
        &self.store
    }
}

#[wasm_bindgen]
impl WebProgress {
    /// Store backed by `localStorage`, or by memory when that is unavailable
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebProgress {
        Self::with_backend(WebBackend::detect())
    }

    pub fn is_persistent(&self) -> bool {
        self.store.backend().is_persistent()
    }

    /// Returns the updated progress entry as JSON
    pub fn record_visit(&mut self, kind: &str) -> Result<String, JsValue> {
        self.visit(kind).map_err(js_error)
    }

    /// Returns the stored record as JSON
    pub fn add_practice_record(
        &mut self,
        kind: &str,
        question: String,
        answer: f64,
        user_answer: f64,
        is_correct: bool,
    ) -> Result<String, JsValue> {
        self.add_record(kind, question, answer, user_answer, is_correct)
            .map_err(js_error)
    }

    pub fn learning_progress(&self) -> Result<String, JsValue> {
        to_json(&self.store.learning_progress()).map_err(js_error)
    }

    pub fn practice_records(&self) -> Result<String, JsValue> {
        to_json(&self.store.practice_records()).map_err(js_error)
    }

    pub fn learning_stats(&self) -> Result<String, JsValue> {
        to_json(&self.store.learning_stats()).map_err(js_error)
    }

    pub fn app_config(&self) -> Result<String, JsValue> {
        to_json(&self.store.app_config()).map_err(js_error)
    }

    /// Merge a partial config such as `{"theme":"dark"}`; returns the full config
    pub fn save_app_config(&mut self, patch_json: &str) -> Result<String, JsValue> {
        self.apply_config(patch_json).map_err(js_error)
    }

    pub fn current_geometry(&self) -> String {
        self.store.current_geometry().to_string()
    }

    pub fn set_current_geometry(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: ShapeKind = kind.parse().map_err(js_error)?;
        self.store.set_current_geometry(kind).map_err(js_error)
    }

    pub fn open_viewer(&mut self, kind: &str) -> Result<WebViewer, JsValue> {
        self.open(kind).map_err(js_error)
    }

    pub fn export_json(&self) -> Result<String, JsValue> {
        self.store.export_json().map_err(js_error)
    }

    /// Suggested download name for an export made today
    pub fn export_file_name(&self) -> String {
        current_export_file_name()
    }

    pub fn import_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.store.import_json(json).map(|_| ()).map_err(js_error)
    }

    pub fn clear_all(&mut self) -> Result<(), JsValue> {
        self.store.clear_all().map_err(js_error)
    }
}

impl Default for WebProgress {
    fn default() -> Self {
        Self::new()
    }
}
