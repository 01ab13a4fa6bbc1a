/// Browser-side viewer state: the page owns the canvas and input events
use nalgebra::Matrix4;
use solidlab_core::catalog;
use solidlab_core::{AppConfig, ParamField, ShapeKind, Transform, ViewState};
use wasm_bindgen::prelude::*;

use crate::error::{js_error, WebError, WebResult};

fn param_field(name: &str) -> WebResult<ParamField> {
    ParamField::from_name(name).ok_or_else(|| WebError::UnknownParam(name.to_string()))
}

fn flatten(matrix: &Matrix4<f32>) -> Vec<f32> {
    matrix.as_slice().to_vec()
}

/// One solid with its mesh, camera and pointer state
#[wasm_bindgen]
pub struct WebViewer {
    state: ViewState,
}

impl WebViewer {
    pub(crate) fn open(kind: &str, config: &AppConfig) -> WebResult<WebViewer> {
        let kind: ShapeKind = kind.parse()?;
        Ok(Self {
            state: ViewState::new(kind, config)?,
        })
    }

    pub(crate) fn update_param(&mut self, name: &str, value: f64) -> WebResult<()> {
        self.state.set_param(param_field(name)?, value)?;
        Ok(())
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<WebViewer, JsValue> {
        Self::open(kind, &AppConfig::default()).map_err(js_error)
    }

    pub fn kind(&self) -> String {
        self.state.kind().to_string()
    }

    /// Set `radius`, `width`, `height`, `depth` or `tube`; clamped to the slider range
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.update_param(name, value).map_err(js_error)
    }

    /// Current value of a parameter, `undefined` when the shape has none
    pub fn param(&self, name: &str) -> Option<f64> {
        let field = ParamField::from_name(name)?;
        catalog::param_specs(self.state.kind())
            .iter()
            .any(|spec| spec.field == field)
            .then(|| self.state.params().get(field))
            .flatten()
    }

    pub fn surface_area(&self) -> f64 {
        self.state.properties().surface_area
    }

    pub fn volume(&self) -> f64 {
        self.state.properties().volume
    }

    /// Flattened xyz positions, three vertices per triangle
    pub fn positions(&self) -> Vec<f32> {
        self.state.mesh().positions()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.state.mesh().normals()
    }

    pub fn triangle_count(&self) -> usize {
        self.state.mesh().triangles.len()
    }

    /// Grid line endpoints as xyz pairs, empty while the grid is hidden
    pub fn grid_lines(&self) -> Vec<f32> {
        if !self.state.show_grid {
            return Vec::new();
        }
        self.state
            .grid
            .lines()
            .iter()
            .flat_map(|(start, end)| [start.x, start.y, start.z, end.x, end.y, end.z])
            .collect()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.state.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.state.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.state.wheel(delta_y);
    }

    /// Distance between two touches while pinching
    pub fn pinch(&mut self, distance: f32) {
        self.state.pinch(distance);
    }

    pub fn double_click(&mut self) {
        self.state.reset_view();
    }

    /// Advance one animation frame
    pub fn tick(&mut self) {
        self.state.tick();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.state.camera.aspect = aspect;
        }
    }

    pub fn auto_rotate(&self) -> bool {
        self.state.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.state.auto_rotate = on;
    }

    pub fn show_grid(&self) -> bool {
        self.state.show_grid
    }

    pub fn set_show_grid(&mut self, on: bool) {
        self.state.show_grid = on;
    }

    /// Rotation angles `[x, y, z]` in radians
    pub fn rotation(&self) -> Vec<f32> {
        let rotation = self.state.rotation;
        vec![rotation.x, rotation.y, rotation.z]
    }

    pub fn camera_position(&self) -> Vec<f32> {
        let position = self.state.camera.position;
        vec![position.x, position.y, position.z]
    }

    /// Column-major model matrix
    pub fn model_matrix(&self) -> Vec<f32> {
        flatten(&self.state.model_matrix())
    }

    /// Column-major model-view-projection matrix
    pub fn mvp_matrix(&self) -> Vec<f32> {
        let camera = &self.state.camera;
        flatten(&Transform::mvp_matrix(
            &self.state.model_matrix(),
            &camera.view_matrix(),
            &camera.projection_matrix(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidlab_core::GeometryError;

    fn viewer(kind: &str) -> WebViewer {
        WebViewer::open(kind, &AppConfig::default()).unwrap()
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(matches!(
            WebViewer::open("prism", &AppConfig::default()),
            Err(WebError::Geometry(GeometryError::UnsupportedGeometry(_)))
        ));
    }

    #[test]
    fn test_buffers_match_mesh() {
        let viewer = viewer("cube");
        assert_eq!(viewer.kind(), "cube");
        assert_eq!(viewer.triangle_count(), 12);
        assert_eq!(viewer.positions().len(), 12 * 9);
        assert_eq!(viewer.normals().len(), viewer.positions().len());
        assert_eq!(viewer.grid_lines().len(), 22 * 6);
        assert_eq!(viewer.mvp_matrix().len(), 16);
    }

    #[test]
    fn test_param_update_changes_properties() {
        let mut viewer = viewer("sphere");
        viewer.update_param("radius", 2.0).unwrap();
        assert_eq!(viewer.param("radius"), Some(2.0));
        assert!((viewer.volume() - 32.0 / 3.0 * std::f64::consts::PI).abs() < 1e-9);
        assert!(matches!(
            viewer.update_param("edge", 2.0),
            Err(WebError::UnknownParam(_))
        ));
        assert_eq!(viewer.param("width"), None);
    }

    #[test]
    fn test_param_only_reports_shape_fields() {
        let torus = viewer("torus");
        assert_eq!(torus.param("tube"), Some(0.3));
        assert_eq!(torus.param("height"), None);

        let cube = viewer("cube");
        assert!(cube.param("depth").is_some());
        assert_eq!(cube.param("radius"), None);
        assert_eq!(cube.param("edge"), None);
    }

    #[test]
    fn test_input_drives_camera_and_rotation() {
        let mut viewer = viewer("cube");
        viewer.pointer_down(0.0, 0.0);
        viewer.pointer_move(10.0, 0.0);
        viewer.pointer_up();
        assert!((viewer.rotation()[1] - 0.1).abs() < 1e-6);

        viewer.wheel(1.0);
        let distance = nalgebra::Vector3::from_vec(viewer.camera_position()).norm();
        assert!((distance - 27f32.sqrt() * 1.1).abs() < 1e-4);

        viewer.double_click();
        assert_eq!(viewer.rotation(), vec![0.0, 0.0, 0.0]);
        assert_eq!(viewer.camera_position(), vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_hidden_grid_has_no_lines() {
        let mut viewer = viewer("torus");
        viewer.set_show_grid(false);
        assert!(viewer.grid_lines().is_empty());
    }
}
