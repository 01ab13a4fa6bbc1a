/// Scene lights and the ground grid helper
use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Position the light shines from, towards the origin
    pub position: Point3<f32>,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub intensity: f32,
    /// Distance at which the light has faded out completely
    pub range: f32,
}

/// Ambient, directional and point lighting of the viewer scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Ambient intensity already scaled by the ambient colour
    pub ambient: f32,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            // 0x404040 at intensity 0.6
            ambient: 0.6 * (0x40 as f32 / 255.0),
            directional: DirectionalLight {
                position: Point3::new(5.0, 5.0, 5.0),
                intensity: 0.8,
            },
            point: PointLight {
                position: Point3::new(10.0, 10.0, 10.0),
                intensity: 0.5,
                range: 100.0,
            },
        }
    }
}

impl Lighting {
    /// Brightness in [0, 1] of a surface point with a world-space normal
    pub fn shade(&self, position: &Point3<f32>, normal: &Vector3<f32>) -> f32 {
        let normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);

        let sun = self.directional.position.coords.normalize();
        let direct = self.directional.intensity * normal.dot(&sun).max(0.0);

        let to_point = self.point.position - *position;
        let distance = to_point.norm();
        let falloff = (1.0 - distance / self.point.range).max(0.0);
        let point = if distance > f32::EPSILON {
            self.point.intensity * falloff * normal.dot(&(to_point / distance)).max(0.0)
        } else {
            0.0
        };

        (self.ambient + direct + point).clamp(0.0, 1.0)
    }
}

/// Square grid of lines on the XZ plane, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
}

impl Default for GridHelper {
    fn default() -> Self {
        Self {
            size: 10.0,
            divisions: 10,
        }
    }
}

impl GridHelper {
    /// Line segments making up the grid
    pub fn lines(&self) -> Vec<(Point3<f32>, Point3<f32>)> {
        let half = self.size / 2.0;
        let step = self.size / self.divisions.max(1) as f32;
        (0..=self.divisions)
            .flat_map(|i| {
                let k = -half + i as f32 * step;
                [
                    (Point3::new(-half, 0.0, k), Point3::new(half, 0.0, k)),
                    (Point3::new(k, 0.0, -half), Point3::new(k, 0.0, half)),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_side_is_brighter_than_shadow_side() {
        let lighting = Lighting::default();
        let p = Point3::origin();
        let lit = lighting.shade(&p, &Vector3::new(1.0, 1.0, 1.0));
        let dark = lighting.shade(&p, &Vector3::new(-1.0, -1.0, -1.0));
        assert!(lit > dark);
        assert!((dark - lighting.ambient).abs() < 1e-6);
        assert!(lit <= 1.0);
    }

    #[test]
    fn test_grid_has_two_lines_per_division_boundary() {
        let lines = GridHelper::default().lines();
        assert_eq!(lines.len(), 22);
        assert!(lines.iter().all(|(a, b)| a.y == 0.0 && b.y == 0.0));
    }
}
