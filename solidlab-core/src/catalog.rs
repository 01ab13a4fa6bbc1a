/// Static catalog of the solids: display text, formulas, defaults and slider bounds
use serde::Serialize;

use crate::shape::{GeometryParams, ParamField, ShapeKind};

/// Display strings for the two formulas of a solid
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub surface_area: &'static str,
    pub volume: &'static str,
}

/// Descriptive metadata for one solid
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub name: &'static str,
    pub description: &'static str,
    pub default_params: GeometryParams,
    pub formula: Formula,
    pub properties: &'static [&'static str],
    pub learning_tips: &'static [&'static str],
}

/// Adjustable range of one parameter in the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub field: ParamField,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// A group of solids shown together on the home view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub shapes: &'static [ShapeKind],
}

const fn params(
    radius: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    depth: Option<f64>,
    tube: Option<f64>,
) -> GeometryParams {
    GeometryParams {
        radius,
        width,
        height,
        depth,
        tube,
    }
}

static CATALOG: [GeometryConfig; 6] = [
    GeometryConfig {
        kind: ShapeKind::Cube,
        name: "Cube",
        description: "A solid bounded by six squares; one of the most basic solids",
        default_params: params(None, Some(2.0), Some(2.0), Some(2.0), None),
        formula: Formula {
            surface_area: "S = 6a²",
            volume: "V = a³",
        },
        properties: &[
            "All six faces are squares",
            "All twelve edges have equal length",
            "Eight vertices",
            "The space diagonal is a√3",
            "Highly symmetric",
        ],
        learning_tips: &[
            "Study the net of the cube to see how the faces connect",
            "Measure edges to relate edge length to area and volume",
            "Imagine the shapes of different cross-sections",
        ],
    },
    GeometryConfig {
        kind: ShapeKind::Sphere,
        name: "Sphere",
        description: "Every point is the same distance from the centre; the most common shape in nature",
        default_params: params(Some(1.0), None, None, None, None),
        formula: Formula {
            surface_area: "S = 4πr²",
            volume: "V = (4/3)πr³",
        },
        properties: &[
            "All points are equidistant from the centre",
            "Every cross-section is a circle",
            "Perfectly symmetric",
            "Surface area grows with the square of the radius",
            "Volume grows with the cube of the radius",
        ],
        learning_tips: &[
            "Watch how the cross-sections change",
            "Relate the sphere to the circle",
            "Verify the area and volume formulas experimentally",
        ],
    },
    GeometryConfig {
        kind: ShapeKind::Cylinder,
        name: "Cylinder",
        description: "Two parallel circular bases joined by a curved surface",
        default_params: params(Some(1.0), None, Some(2.0), None, None),
        formula: Formula {
            surface_area: "S = 2πr² + 2πrh",
            volume: "V = πr²h",
        },
        properties: &[
            "Both bases are congruent circles",
            "The lateral surface unrolls into a rectangle",
            "The axis is perpendicular to the bases",
            "Rotationally symmetric",
            "Many different cross-sections",
        ],
        learning_tips: &[
            "Study the net of the cylinder",
            "Relate the cylinder to the circle",
            "Find cylinders among everyday objects",
        ],
    },
    GeometryConfig {
        kind: ShapeKind::Cone,
        name: "Cone",
        description: "A circular base joined to a single apex",
        default_params: params(Some(1.0), None, Some(2.0), None, None),
        formula: Formula {
            surface_area: "S = πr² + πrl",
            volume: "V = (1/3)πr²h",
        },
        properties: &[
            "The base is a circle",
            "The line from apex to base centre is perpendicular to the base",
            "The lateral surface unrolls into a sector",
            "Rotationally symmetric",
            "Its volume is a third of the cylinder with the same base and height",
        ],
        learning_tips: &[
            "Study the net of the cone",
            "Compare the cone with the cylinder",
            "Verify the volume formula experimentally",
        ],
    },
    GeometryConfig {
        kind: ShapeKind::Torus,
        name: "Torus",
        description: "A circle swept around an axis, shaped like a doughnut",
        default_params: params(Some(1.0), None, None, None, Some(0.3)),
        formula: Formula {
            surface_area: "S = 4π²Rr",
            volume: "V = 2π²Rr²",
        },
        properties: &[
            "Formed by revolving a circle about an axis",
            "Ring shaped",
            "Complex cross-sections",
            "Highly symmetric",
            "Common in nature and engineering",
        ],
        learning_tips: &[
            "Picture how the torus is swept out",
            "Watch how the cross-sections change",
            "Understand solids of revolution",
        ],
    },
    GeometryConfig {
        kind: ShapeKind::Tetrahedron,
        name: "Tetrahedron",
        description: "A polyhedron with four triangular faces; the simplest polyhedron",
        default_params: params(Some(2.0), None, None, None, None),
        formula: Formula {
            surface_area: "S = √3a²",
            volume: "V = (a³√2)/12",
        },
        properties: &[
            "All four faces are triangles",
            "Six edges",
            "Four vertices",
            "The simplest polyhedron",
            "Highly symmetric",
        ],
        learning_tips: &[
            "Study the net of the tetrahedron",
            "Learn the basic ideas of polyhedra",
            "Build a paper model to understand its structure",
        ],
    },
];

static CATEGORIES: [Category; 2] = [
    Category {
        id: "basic",
        name: "Basic solids",
        description: "The most common solids",
        shapes: &[ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder],
    },
    Category {
        id: "advanced",
        name: "Advanced solids",
        description: "Slightly more involved solids",
        shapes: &[ShapeKind::Cone, ShapeKind::Torus, ShapeKind::Tetrahedron],
    },
];

const RADIUS: ParamSpec = ParamSpec {
    field: ParamField::Radius,
    label: "Radius",
    min: 0.5,
    max: 3.0,
    step: 0.1,
};
const HEIGHT: ParamSpec = ParamSpec {
    field: ParamField::Height,
    label: "Height",
    min: 0.5,
    max: 4.0,
    step: 0.1,
};

static CUBE_PARAMS: [ParamSpec; 3] = [
    ParamSpec {
        field: ParamField::Width,
        label: "Width",
        min: 0.5,
        max: 4.0,
        step: 0.1,
    },
    HEIGHT,
    ParamSpec {
        field: ParamField::Depth,
        label: "Depth",
        min: 0.5,
        max: 4.0,
        step: 0.1,
    },
];
static ROUND_PARAMS: [ParamSpec; 1] = [RADIUS];
static EXTRUDED_PARAMS: [ParamSpec; 2] = [RADIUS, HEIGHT];
static TORUS_PARAMS: [ParamSpec; 2] = [
    ParamSpec {
        field: ParamField::Radius,
        label: "Major radius",
        min: 0.8,
        max: 3.0,
        step: 0.1,
    },
    ParamSpec {
        field: ParamField::Tube,
        label: "Tube radius",
        min: 0.1,
        max: 0.8,
        step: 0.05,
    },
];

/// Starting parameters of the viewer before a shape's own defaults are applied
pub const VIEWER_BASE_PARAMS: GeometryParams =
    params(Some(2.0), Some(2.0), Some(2.0), Some(2.0), Some(0.3));

pub fn config(kind: ShapeKind) -> &'static GeometryConfig {
    let index = match kind {
        ShapeKind::Cube => 0,
        ShapeKind::Sphere => 1,
        ShapeKind::Cylinder => 2,
        ShapeKind::Cone => 3,
        ShapeKind::Torus => 4,
        ShapeKind::Tetrahedron => 5,
    };
    &CATALOG[index]
}

/// Look up a configuration by type name
pub fn find(name: &str) -> Option<&'static GeometryConfig> {
    CATALOG.iter().find(|c| c.kind.as_str() == name)
}

pub fn all() -> &'static [GeometryConfig] {
    &CATALOG
}

pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn shapes_in_category(id: &str) -> &'static [ShapeKind] {
    CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.shapes)
        .unwrap_or(&[])
}

/// Parameters the viewer exposes for `kind`, in display order
pub fn param_specs(kind: ShapeKind) -> &'static [ParamSpec] {
    match kind {
        ShapeKind::Cube => &CUBE_PARAMS,
        ShapeKind::Sphere | ShapeKind::Tetrahedron => &ROUND_PARAMS,
        ShapeKind::Cylinder | ShapeKind::Cone => &EXTRUDED_PARAMS,
        ShapeKind::Torus => &TORUS_PARAMS,
    }
}

/// Parameters a freshly opened viewer starts with
pub fn viewer_params(kind: ShapeKind) -> GeometryParams {
    config(kind).default_params.or(&VIEWER_BASE_PARAMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_kinds() {
        for kind in ShapeKind::ALL {
            assert_eq!(config(kind).kind, kind);
        }
        assert_eq!(all().len(), ShapeKind::ALL.len());
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find("torus").map(|c| c.name), Some("Torus"));
        assert!(find("dodecahedron").is_none());
    }

    #[test]
    fn test_categories_cover_every_shape_once() {
        let mut seen: Vec<ShapeKind> = categories().iter().flat_map(|c| c.shapes.iter().copied()).collect();
        seen.sort_by_key(|k| k.as_str());
        let mut all = ShapeKind::ALL.to_vec();
        all.sort_by_key(|k| k.as_str());
        assert_eq!(seen, all);
        assert_eq!(shapes_in_category("advanced")[1], ShapeKind::Torus);
        assert!(shapes_in_category("missing").is_empty());
    }

    #[test]
    fn test_viewer_params_layer_defaults_over_base() {
        let torus = viewer_params(ShapeKind::Torus);
        assert_eq!(torus.radius, Some(1.0));
        assert_eq!(torus.tube, Some(0.3));

        let tetra = viewer_params(ShapeKind::Tetrahedron);
        assert_eq!(tetra.radius, Some(2.0));
        assert_eq!(tetra.width, Some(2.0));
    }

    #[test]
    fn test_defaults_lie_within_slider_bounds() {
        for kind in ShapeKind::ALL {
            let params = viewer_params(kind);
            for spec in param_specs(kind) {
                let value = params.get(spec.field).unwrap();
                assert_eq!(spec.clamp(value), value, "{kind} {}", spec.label);
            }
        }
    }
}
