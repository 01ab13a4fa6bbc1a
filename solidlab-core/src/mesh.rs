/// Mesh descriptors: the tessellation recipe for each solid
use nalgebra::{Point3, Vector3};
use std::f32::consts::{PI, TAU};

use crate::error::GeometryResult;
use crate::geometry::{Mesh, Vertex};
use crate::shape::{GeometryParams, Solid};

pub const SPHERE_SEGMENTS: (u32, u32) = (32, 32);
pub const RADIAL_SEGMENTS: u32 = 32;
/// (radial, tubular) segments of the torus
pub const TORUS_SEGMENTS: (u32, u32) = (16, 100);

/// A solid together with how finely it is tessellated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDescriptor {
    pub solid: Solid,
    pub segments: (u32, u32),
}

impl MeshDescriptor {
    pub fn new(solid: Solid) -> Self {
        let segments = match solid {
            Solid::Cube { .. } | Solid::Tetrahedron { .. } => (1, 1),
            Solid::Sphere { .. } => SPHERE_SEGMENTS,
            Solid::Cylinder { .. } | Solid::Cone { .. } => (RADIAL_SEGMENTS, 1),
            Solid::Torus { .. } => TORUS_SEGMENTS,
        };
        Self { solid, segments }
    }

    /// Override the tessellation; values below 3 are raised to 3 for curved solids
    pub fn with_segments(mut self, first: u32, second: u32) -> Self {
        self.segments = (first.max(3), second.max(3));
        self
    }

    pub fn build(&self) -> Mesh {
        let (s0, s1) = self.segments;
        match self.solid {
            Solid::Cube {
                width,
                height,
                depth,
            } => Mesh::cuboid(width as f32, height as f32, depth as f32),
            Solid::Sphere { radius } => sphere(radius as f32, s0, s1),
            Solid::Cylinder { radius, height } => frustum(radius as f32, radius as f32, height as f32, s0),
            Solid::Cone { radius, height } => frustum(radius as f32, 0.0, height as f32, s0),
            Solid::Torus { radius, tube } => torus(radius as f32, tube as f32, s0, s1),
            Solid::Tetrahedron { radius } => tetrahedron(radius as f32),
        }
    }
}

/// Describe the mesh for the shape named `kind`.
///
/// Unknown names fail with `UnsupportedGeometry`.
pub fn build_mesh_descriptor(kind: &str, params: &GeometryParams) -> GeometryResult<MeshDescriptor> {
    Ok(MeshDescriptor::new(Solid::parse(kind, params)?))
}

/// Sample a parametric surface on a (u, v) grid, both in [0, 1]
fn parametric<F>(mesh: &mut Mesh, u_segments: u32, v_segments: u32, surface: F)
where
    F: Fn(f32, f32) -> Vertex,
{
    let at = |i: u32, j: u32| surface(i as f32 / u_segments as f32, j as f32 / v_segments as f32);
    for j in 0..v_segments {
        for i in 0..u_segments {
            let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i, j + 1), at(i + 1, j + 1));
            mesh.add_oriented(a, b, d);
            mesh.add_oriented(a, d, c);
        }
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity((width_segments * height_segments * 2) as usize);
    parametric(&mut mesh, width_segments, height_segments, |u, v| {
        let (phi, theta) = (u * TAU, v * PI);
        let normal = Vector3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
        Vertex::from_parts(Point3::from(normal * radius), normal)
    });
    mesh
}

/// Cylinder when both radii match, cone when the top radius is zero
fn frustum(bottom: f32, top: f32, height: f32, radial_segments: u32) -> Mesh {
    let half = height / 2.0;
    let mut mesh = Mesh::with_capacity((radial_segments * 4) as usize);

    // Side normal tilts by the radius difference over the height.
    parametric(&mut mesh, radial_segments, 1, |u, v| {
        let phi = u * TAU;
        let (sin, cos) = phi.sin_cos();
        let r = bottom + (top - bottom) * v;
        let normal = Vector3::new(height * sin, bottom - top, height * cos).normalize();
        Vertex::from_parts(Point3::new(r * sin, -half + height * v, r * cos), normal)
    });

    for (y, r, ny) in [(half, top, 1.0), (-half, bottom, -1.0)] {
        if r <= 0.0 {
            continue;
        }
        let normal = Vector3::new(0.0, ny, 0.0);
        let center = Vertex::from_parts(Point3::new(0.0, y, 0.0), normal);
        let rim = |i: u32| {
            let phi = i as f32 / radial_segments as f32 * TAU;
            Vertex::from_parts(Point3::new(r * phi.sin(), y, r * phi.cos()), normal)
        };
        for i in 0..radial_segments {
            mesh.add_oriented(center, rim(i), rim(i + 1));
        }
    }

    mesh
}

/// Torus around the z axis, lying in the XY plane
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity((radial_segments * tubular_segments * 2) as usize);
    parametric(&mut mesh, tubular_segments, radial_segments, |u, v| {
        let (around, across) = (u * TAU, v * TAU);
        let ring = radius + tube * across.cos();
        let position = Point3::new(ring * around.cos(), ring * around.sin(), tube * across.sin());
        let center = Point3::new(radius * around.cos(), radius * around.sin(), 0.0);
        let normal = (position - center)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vector3::new(around.cos(), around.sin(), 0.0));
        Vertex::from_parts(position, normal)
    });
    mesh
}

/// Regular tetrahedron with circumradius `radius`
fn tetrahedron(radius: f32) -> Mesh {
    let corners = [
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(-1.0, -1.0, 1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(1.0, -1.0, -1.0),
    ]
    .map(|c: Vector3<f32>| Point3::from(c.normalize() * radius));

    let mut mesh = Mesh::with_capacity(4);
    for skip in 0..4 {
        let face: Vec<Point3<f32>> = (0..4).filter(|i| *i != skip).map(|i| corners[i]).collect();
        // Each face points away from the corner it leaves out.
        let normal = -corners[skip].coords.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y);
        let [a, b, c] = [face[0], face[1], face[2]].map(|p| Vertex::from_parts(p, normal));
        mesh.add_oriented(a, b, c);
    }
    mesh
}
