/// Triangle mesh primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// Triangles with a smaller doubled area than this are dropped as degenerate
const DEGENERATE_AREA: f32 = 1e-10;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    pub fn from_parts(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unnormalized face normal; its length is twice the triangle's area
    pub fn cross(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        self.cross().normalize()
    }

    pub fn area(&self) -> f32 {
        self.cross().norm() * 0.5
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a triangle wound so its face normal agrees with the vertex normals.
    ///
    /// Degenerate triangles (poles, apexes) are skipped.
    pub fn add_oriented(&mut self, v0: Vertex, v1: Vertex, v2: Vertex) {
        let triangle = Triangle::new(v0, v1, v2);
        let cross = triangle.cross();
        if cross.norm() < DEGENERATE_AREA {
            return;
        }
        let expected = v0.normal + v1.normal + v2.normal;
        if cross.dot(&expected) < 0.0 {
            self.triangles.push(Triangle::new(v0, v2, v1));
        } else {
            self.triangles.push(triangle);
        }
    }

    /// Axis-aligned box centred on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(12);

        // (normal axis, first in-plane axis, second in-plane axis)
        let faces = [(0, 1, 2), (1, 2, 0), (2, 0, 1)];
        for (n, u, v) in faces {
            for sign in [1.0f32, -1.0] {
                let mut normal = Vector3::zeros();
                normal[n] = sign;
                let corner = |su: f32, sv: f32| {
                    let mut p = Point3::origin();
                    p[n] = sign * half[n];
                    p[u] = su * half[u];
                    p[v] = sv * half[v];
                    Vertex::from_parts(p, normal)
                };
                let (a, b, c, d) = (
                    corner(-1.0, -1.0),
                    corner(1.0, -1.0),
                    corner(1.0, 1.0),
                    corner(-1.0, 1.0),
                );
                mesh.add_oriented(a, b, c);
                mesh.add_oriented(a, c, d);
            }
        }

        mesh
    }

    /// Total area of all faces
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(|t| t.area() as f64).sum()
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Only meaningful for closed meshes with outward winding.
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices.map(|v| v.position.coords.cast::<f64>());
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }

    /// Largest distance of any vertex from the origin
    pub fn bounding_radius(&self) -> f32 {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.position.coords.norm())
            .fold(0.0, f32::max)
    }

    /// Flattened xyz positions, three vertices per triangle
    pub fn positions(&self) -> Vec<f32> {
        self.flatten(|v| v.position.coords)
    }

    /// Flattened xyz vertex normals, matching [`Mesh::positions`]
    pub fn normals(&self) -> Vec<f32> {
        self.flatten(|v| v.normal)
    }

    fn flatten(&self, pick: impl Fn(&Vertex) -> Vector3<f32>) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.triangles.len() * 9);
        for vertex in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            out.extend_from_slice(pick(vertex).as_slice());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_is_closed_and_exact() {
        let mesh = Mesh::cuboid(2.0, 3.0, 4.0);
        assert_eq!(mesh.triangles.len(), 12);
        assert_relative_eq!(mesh.surface_area(), 2.0 * (6.0 + 8.0 + 12.0), epsilon = 1e-4);
        assert_relative_eq!(mesh.volume(), 24.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let mesh = Mesh::cuboid(2.0, 2.0, 2.0);
        for triangle in &mesh.triangles {
            let normal = triangle.calculate_normal();
            assert!((normal - triangle.vertices[0].normal).norm() < 1e-6);
        }
    }

    #[test]
    fn test_add_oriented_flips_and_skips() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let a = Vertex::from_parts(Point3::new(0.0, 0.0, 0.0), up);
        let b = Vertex::from_parts(Point3::new(1.0, 0.0, 0.0), up);
        let c = Vertex::from_parts(Point3::new(0.0, 1.0, 0.0), up);

        let mut mesh = Mesh::new();
        mesh.add_oriented(a, c, b);
        assert!(mesh.triangles[0].calculate_normal().z > 0.0);

        mesh.add_oriented(a, a, b);
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn test_positions_are_flattened_per_vertex() {
        let mesh = Mesh::cuboid(1.0, 1.0, 1.0);
        assert_eq!(mesh.positions().len(), 12 * 9);
        assert_eq!(mesh.normals().len(), mesh.positions().len());
        assert_relative_eq!(mesh.bounding_radius(), 0.75f32.sqrt(), epsilon = 1e-6);
    }
}
