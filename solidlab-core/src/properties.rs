/// Closed-form surface area and volume of each solid
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::GeometryResult;
use crate::shape::{GeometryParams, Solid};

/// Surface area and volume of a solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    pub surface_area: f64,
    pub volume: f64,
}

/// Slant height of a right circular cone
pub fn cone_slant(radius: f64, height: f64) -> f64 {
    (radius * radius + height * height).sqrt()
}

/// Edge length of a regular tetrahedron with the given circumradius
pub fn tetrahedron_edge(radius: f64) -> f64 {
    radius * (8.0f64 / 3.0).sqrt()
}

impl Solid {
    pub fn properties(&self) -> Properties {
        match *self {
            // Only the width counts as the cube edge.
            Solid::Cube { width: a, .. } => Properties {
                surface_area: 6.0 * a * a,
                volume: a * a * a,
            },
            Solid::Sphere { radius: r } => Properties {
                surface_area: 4.0 * PI * r * r,
                volume: (4.0 / 3.0) * PI * r * r * r,
            },
            Solid::Cylinder { radius: r, height: h } => Properties {
                surface_area: 2.0 * PI * r * r + 2.0 * PI * r * h,
                volume: PI * r * r * h,
            },
            Solid::Cone { radius: r, height: h } => Properties {
                surface_area: PI * r * r + PI * r * cone_slant(r, h),
                volume: (1.0 / 3.0) * PI * r * r * h,
            },
            Solid::Torus { radius, tube } => Properties {
                surface_area: 4.0 * PI * PI * radius * tube,
                volume: 2.0 * PI * PI * radius * tube * tube,
            },
            Solid::Tetrahedron { radius } => {
                let edge = tetrahedron_edge(radius);
                Properties {
                    surface_area: 3.0f64.sqrt() * edge * edge,
                    volume: edge * edge * edge * 2.0f64.sqrt() / 12.0,
                }
            }
        }
    }
}

/// Compute the properties of the shape named `kind`.
///
/// Fails with `UnsupportedGeometry` for names outside the catalog, the same
/// way mesh building does.
pub fn compute_properties(kind: &str, params: &GeometryParams) -> GeometryResult<Properties> {
    Ok(Solid::parse(kind, params)?.properties())
}
