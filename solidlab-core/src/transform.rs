/// Mesh rotation state and how pointer input turns into rotation
use nalgebra::{Matrix4, Vector3};

use crate::shape::ShapeKind;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(self)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Per-shape scaling of drag deltas and auto-rotation increments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationProfile {
    /// Radians per pixel of drag around x and y
    pub drag: f32,
    /// Roll contributed per pixel of drag
    pub roll: f32,
    /// Roll follows `dx + dy` when set, `dx - dy` otherwise
    pub roll_sums: bool,
    /// Per-frame (x, y, z) increments while auto-rotating
    pub spin: (f32, f32, f32),
}

impl RotationProfile {
    pub fn for_shape(kind: ShapeKind) -> Self {
        match kind {
            // Rolling with the sum of both deltas keeps the sphere from looking locked.
            ShapeKind::Sphere => Self {
                drag: 0.01,
                roll: 0.005,
                roll_sums: true,
                spin: (0.002, 0.005, 0.001),
            },
            _ => Self {
                drag: 0.01,
                roll: 0.003,
                roll_sums: false,
                spin: (0.001, 0.005, 0.0005),
            },
        }
    }

    /// Apply a pointer drag of (dx, dy) pixels
    pub fn drag(&self, rotation: &mut RotationState, dx: f32, dy: f32) {
        let roll = if self.roll_sums { dx + dy } else { dx - dy };
        rotation.rotate(dy * self.drag, dx * self.drag, roll * self.roll);
    }

    /// Apply one frame of auto-rotation
    pub fn spin(&self, rotation: &mut RotationState) {
        let (x, y, z) = self.spin;
        rotation.rotate(x, y, z);
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        state.rotate(0.1, 0.2, 0.3);
        assert_relative_eq!(state.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(state.y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(state.z, 0.3, epsilon = 1e-6);

        state.reset();
        assert_eq!(state, RotationState::zero());
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = RotationState::zero().matrix();
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_drag_on_sphere_rolls_with_sum() {
        let mut state = RotationState::zero();
        RotationProfile::for_shape(ShapeKind::Sphere).drag(&mut state, 10.0, 20.0);
        assert_relative_eq!(state.y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(state.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(state.z, 0.15, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_on_other_shapes_rolls_with_difference() {
        let mut state = RotationState::zero();
        RotationProfile::for_shape(ShapeKind::Torus).drag(&mut state, 10.0, 20.0);
        assert_relative_eq!(state.y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(state.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(state.z, -0.03, epsilon = 1e-6);
    }

    #[test]
    fn test_spin_is_independent_of_input() {
        let mut state = RotationState::zero();
        let profile = RotationProfile::for_shape(ShapeKind::Cube);
        profile.spin(&mut state);
        profile.spin(&mut state);
        assert_relative_eq!(state.x, 0.002, epsilon = 1e-6);
        assert_relative_eq!(state.y, 0.01, epsilon = 1e-6);
        assert_relative_eq!(state.z, 0.001, epsilon = 1e-6);
    }
}
