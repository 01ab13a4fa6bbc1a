/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Where the camera sits before any zooming, and after a reset
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [3.0, 3.0, 3.0];

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_aspect(width as f32 / height.max(1) as f32)
    }

    pub fn with_aspect(aspect: f32) -> Self {
        let [x, y, z] = DEFAULT_CAMERA_POSITION;
        Self {
            position: Point3::new(x, y, z),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Scale the camera's distance from its target
    pub fn zoom(&mut self, factor: f32) {
        self.position = self.target + (self.position - self.target) * factor;
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Back to the default position, looking at the origin
    pub fn reset(&mut self) {
        let [x, y, z] = DEFAULT_CAMERA_POSITION;
        self.position = Point3::new(x, y, z);
        self.target = Point3::origin();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or `None`
    /// when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        // Behind the camera or on the eye plane
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 384)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_relative_eq!(camera.aspect, 800.0 / 600.0, epsilon = 1e-6);
        assert_relative_eq!(camera.distance(), 27f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_zoom_scales_distance_and_reset_restores() {
        let mut camera = Camera::default();
        let start = camera.distance();
        camera.zoom(1.1);
        camera.zoom(1.1);
        assert_relative_eq!(camera.distance(), start * 1.21, epsilon = 1e-4);

        camera.reset();
        assert_eq!(camera.position, Point3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert_relative_eq!(x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(y, 300.0, epsilon = 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let behind = Point3::new(6.0, 6.0, 6.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 384)
            .is_none());
    }
}
