/// Interactive view of one solid: parameters, mesh, properties, camera and input
use nalgebra::Matrix4;

use crate::catalog;
use crate::config::AppConfig;
use crate::error::GeometryResult;
use crate::geometry::Mesh;
use crate::lighting::{GridHelper, Lighting};
use crate::mesh::MeshDescriptor;
use crate::projection::Camera;
use crate::properties::Properties;
use crate::shape::{GeometryParams, ParamField, ShapeKind, Solid};
use crate::transform::{RotationProfile, RotationState};

const WHEEL_OUT: f32 = 1.1;
const WHEEL_IN: f32 = 0.9;
const PINCH_OUT: f32 = 0.95;
const PINCH_IN: f32 = 1.05;

/// Everything the render loop needs to draw one solid
#[derive(Debug, Clone)]
pub struct ViewState {
    kind: ShapeKind,
    params: GeometryParams,
    descriptor: MeshDescriptor,
    mesh: Mesh,
    properties: Properties,
    profile: RotationProfile,
    pub rotation: RotationState,
    pub camera: Camera,
    pub lighting: Lighting,
    pub grid: GridHelper,
    pub auto_rotate: bool,
    pub show_grid: bool,
    pointer: Option<(f32, f32)>,
    last_pinch: Option<f32>,
}

impl ViewState {
    /// Open `kind` with the viewer's starting parameters
    pub fn new(kind: ShapeKind, config: &AppConfig) -> GeometryResult<Self> {
        Self::with_params(kind, catalog::viewer_params(kind), config)
    }

    pub fn with_params(
        kind: ShapeKind,
        params: GeometryParams,
        config: &AppConfig,
    ) -> GeometryResult<Self> {
        let descriptor = MeshDescriptor::new(Solid::from_params(kind, &params)?);
        Ok(Self {
            kind,
            params,
            mesh: descriptor.build(),
            properties: descriptor.solid.properties(),
            descriptor,
            profile: RotationProfile::for_shape(kind),
            rotation: RotationState::zero(),
            camera: Camera::default(),
            lighting: Lighting::default(),
            grid: GridHelper::default(),
            auto_rotate: config.auto_rotate,
            show_grid: config.show_grid,
            pointer: None,
            last_pinch: None,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn descriptor(&self) -> &MeshDescriptor {
        &self.descriptor
    }

    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Change one parameter, rebuilding the mesh and recomputing properties.
    ///
    /// Values are clamped to the slider bounds of the current shape. On error
    /// the previous state is kept.
    pub fn set_param(&mut self, field: ParamField, value: f64) -> GeometryResult<Properties> {
        let value = catalog::param_specs(self.kind)
            .iter()
            .find(|spec| spec.field == field)
            .map_or(value, |spec| spec.clamp(value));

        let mut params = self.params;
        params.set(field, value);
        let descriptor = MeshDescriptor::new(Solid::from_params(self.kind, &params)?);

        self.params = params;
        self.mesh = descriptor.build();
        self.properties = descriptor.solid.properties();
        self.descriptor = descriptor;
        Ok(self.properties)
    }

    /// Move a parameter by whole slider steps
    pub fn step_param(&mut self, field: ParamField, steps: i32) -> GeometryResult<Properties> {
        let step = catalog::param_specs(self.kind)
            .iter()
            .find(|spec| spec.field == field)
            .map_or(0.1, |spec| spec.step);
        let current = self.params.get(field).unwrap_or_default();
        // Round to the step grid so repeated stepping does not drift.
        let next = ((current + step * steps as f64) / step).round() * step;
        self.set_param(field, next)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    /// Rotate the mesh by the drag since the last pointer position
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.pointer {
            self.profile.drag(&mut self.rotation, x - last_x, y - last_y);
            self.pointer = Some((x, y));
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer = None;
        self.last_pinch = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// Scroll away from the viewer zooms out, towards it zooms in
    pub fn wheel(&mut self, delta_y: f32) {
        self.camera.zoom(if delta_y > 0.0 { WHEEL_OUT } else { WHEEL_IN });
    }

    /// Two-finger pinch with the current distance between the touches
    pub fn pinch(&mut self, distance: f32) {
        if let Some(last) = self.last_pinch {
            self.camera.zoom(if distance - last > 0.0 { PINCH_OUT } else { PINCH_IN });
        }
        self.last_pinch = Some(distance);
    }

    /// Double click or tap: default camera and no rotation
    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.rotation.reset();
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.auto_rotate {
            self.profile.spin(&mut self.rotation);
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.rotation.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn view(kind: ShapeKind) -> ViewState {
        ViewState::new(kind, &AppConfig::default()).unwrap()
    }

    #[test]
    fn test_opens_with_catalog_defaults() {
        let cube = view(ShapeKind::Cube);
        assert_eq!(cube.properties(), Properties { surface_area: 24.0, volume: 8.0 });
        assert!(cube.auto_rotate && cube.show_grid);
        assert_eq!(cube.mesh().triangles.len(), 12);
    }

    #[test]
    fn test_param_change_rebuilds_mesh_and_properties() {
        let mut sphere = view(ShapeKind::Sphere);
        let before = sphere.mesh().bounding_radius();
        let props = sphere.set_param(ParamField::Radius, 2.0).unwrap();
        assert_relative_eq!(props.surface_area, 16.0 * std::f64::consts::PI);
        assert!(sphere.mesh().bounding_radius() > before);
    }

    #[test]
    fn test_params_clamp_to_slider_bounds() {
        let mut torus = view(ShapeKind::Torus);
        torus.set_param(ParamField::Tube, 5.0).unwrap();
        assert_eq!(torus.params().tube, Some(0.8));
        torus.step_param(ParamField::Tube, -1).unwrap();
        assert_relative_eq!(torus.params().tube.unwrap(), 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_drag_only_rotates_while_pointer_down() {
        let mut cube = view(ShapeKind::Cube);
        cube.pointer_move(50.0, 50.0);
        assert_eq!(cube.rotation, RotationState::zero());

        cube.pointer_down(0.0, 0.0);
        cube.pointer_move(10.0, 0.0);
        assert_relative_eq!(cube.rotation.y, 0.1, epsilon = 1e-6);
        cube.pointer_up();
        cube.pointer_move(100.0, 0.0);
        assert_relative_eq!(cube.rotation.y, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_wheel_and_pinch_zoom() {
        let mut cone = view(ShapeKind::Cone);
        let start = cone.camera.distance();
        cone.wheel(120.0);
        assert_relative_eq!(cone.camera.distance(), start * 1.1, epsilon = 1e-4);
        cone.wheel(-120.0);
        assert_relative_eq!(cone.camera.distance(), start * 0.99, epsilon = 1e-4);

        cone.reset_view();
        cone.pinch(100.0);
        assert_relative_eq!(cone.camera.distance(), start, epsilon = 1e-4);
        cone.pinch(120.0);
        assert_relative_eq!(cone.camera.distance(), start * 0.95, epsilon = 1e-4);
    }

    #[test]
    fn test_reset_restores_camera_and_rotation() {
        let mut tetra = view(ShapeKind::Tetrahedron);
        tetra.tick();
        tetra.wheel(1.0);
        tetra.reset_view();
        assert_eq!(tetra.rotation, RotationState::zero());
        assert_eq!(tetra.camera, Camera::default());
    }

    #[test]
    fn test_tick_respects_auto_rotate() {
        let mut cylinder = view(ShapeKind::Cylinder);
        cylinder.auto_rotate = false;
        cylinder.tick();
        assert_eq!(cylinder.rotation, RotationState::zero());
        cylinder.auto_rotate = true;
        cylinder.tick();
        assert_relative_eq!(cylinder.rotation.y, 0.005, epsilon = 1e-7);
    }
}
