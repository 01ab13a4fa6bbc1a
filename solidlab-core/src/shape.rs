/// Shape kinds, their parameter sets and resolved solids
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeometryError, GeometryResult};

/// The closed set of solids the viewer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Tetrahedron,
}

impl ShapeKind {
    /// All kinds in catalog order
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cube,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Torus,
        ShapeKind::Tetrahedron,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Torus => "torus",
            ShapeKind::Tetrahedron => "tetrahedron",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GeometryError::UnsupportedGeometry(s.to_string()))
    }
}

/// Names a single field of [`GeometryParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Radius,
    Width,
    Height,
    Depth,
    Tube,
}

impl ParamField {
    pub const ALL: [ParamField; 5] = [
        ParamField::Radius,
        ParamField::Width,
        ParamField::Height,
        ParamField::Depth,
        ParamField::Tube,
    ];

    pub fn from_name(name: &str) -> Option<ParamField> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamField::Radius => "radius",
            ParamField::Width => "width",
            ParamField::Height => "height",
            ParamField::Depth => "depth",
            ParamField::Tube => "tube",
        }
    }
}

/// Loose parameter bag; which fields matter depends on the shape kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube: Option<f64>,
}

impl GeometryParams {
    pub fn radius(mut self, value: f64) -> Self {
        self.radius = Some(value);
        self
    }

    pub fn width(mut self, value: f64) -> Self {
        self.width = Some(value);
        self
    }

    pub fn height(mut self, value: f64) -> Self {
        self.height = Some(value);
        self
    }

    pub fn depth(mut self, value: f64) -> Self {
        self.depth = Some(value);
        self
    }

    pub fn tube(mut self, value: f64) -> Self {
        self.tube = Some(value);
        self
    }

    pub fn get(&self, field: ParamField) -> Option<f64> {
        match field {
            ParamField::Radius => self.radius,
            ParamField::Width => self.width,
            ParamField::Height => self.height,
            ParamField::Depth => self.depth,
            ParamField::Tube => self.tube,
        }
    }

    pub fn set(&mut self, field: ParamField, value: f64) {
        let slot = match field {
            ParamField::Radius => &mut self.radius,
            ParamField::Width => &mut self.width,
            ParamField::Height => &mut self.height,
            ParamField::Depth => &mut self.depth,
            ParamField::Tube => &mut self.tube,
        };
        *slot = Some(value);
    }

    /// Fields set on `self` win; anything missing is taken from `base`
    pub fn or(self, base: &GeometryParams) -> Self {
        Self {
            radius: self.radius.or(base.radius),
            width: self.width.or(base.width),
            height: self.height.or(base.height),
            depth: self.depth.or(base.depth),
            tube: self.tube.or(base.tube),
        }
    }
}

const DEFAULT_EXTENT: f64 = 1.0;
const DEFAULT_TUBE: f64 = 0.3;

/// A shape with every dimension resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    Cube { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Cone { radius: f64, height: f64 },
    Torus { radius: f64, tube: f64 },
    Tetrahedron { radius: f64 },
}

impl Solid {
    /// Resolve `params` for `kind`, filling unset dimensions with defaults.
    ///
    /// Negative and non-finite values are rejected.
    pub fn from_params(kind: ShapeKind, params: &GeometryParams) -> GeometryResult<Self> {
        let solid = match kind {
            ShapeKind::Cube => Solid::Cube {
                width: dimension(ParamField::Width, params, DEFAULT_EXTENT)?,
                height: dimension(ParamField::Height, params, DEFAULT_EXTENT)?,
                depth: dimension(ParamField::Depth, params, DEFAULT_EXTENT)?,
            },
            ShapeKind::Sphere => Solid::Sphere {
                radius: dimension(ParamField::Radius, params, DEFAULT_EXTENT)?,
            },
            ShapeKind::Cylinder => Solid::Cylinder {
                radius: dimension(ParamField::Radius, params, DEFAULT_EXTENT)?,
                height: dimension(ParamField::Height, params, DEFAULT_EXTENT)?,
            },
            ShapeKind::Cone => Solid::Cone {
                radius: dimension(ParamField::Radius, params, DEFAULT_EXTENT)?,
                height: dimension(ParamField::Height, params, DEFAULT_EXTENT)?,
            },
            ShapeKind::Torus => Solid::Torus {
                radius: dimension(ParamField::Radius, params, DEFAULT_EXTENT)?,
                tube: dimension(ParamField::Tube, params, DEFAULT_TUBE)?,
            },
            ShapeKind::Tetrahedron => Solid::Tetrahedron {
                radius: dimension(ParamField::Radius, params, DEFAULT_EXTENT)?,
            },
        };
        Ok(solid)
    }

    /// Parse the kind name, then resolve
    pub fn parse(kind: &str, params: &GeometryParams) -> GeometryResult<Self> {
        Self::from_params(kind.parse()?, params)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Solid::Cube { .. } => ShapeKind::Cube,
            Solid::Sphere { .. } => ShapeKind::Sphere,
            Solid::Cylinder { .. } => ShapeKind::Cylinder,
            Solid::Cone { .. } => ShapeKind::Cone,
            Solid::Torus { .. } => ShapeKind::Torus,
            Solid::Tetrahedron { .. } => ShapeKind::Tetrahedron,
        }
    }
}

fn dimension(field: ParamField, params: &GeometryParams, default: f64) -> GeometryResult<f64> {
    let value = params.get(field).unwrap_or(default);
    if !value.is_finite() || value < 0.0 {
        return Err(GeometryError::InvalidParameter {
            name: field.name(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.as_str().parse::<ShapeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "dodecahedron".parse::<ShapeKind>().unwrap_err();
        assert_eq!(err, GeometryError::UnsupportedGeometry("dodecahedron".into()));
    }

    #[test]
    fn test_missing_dimensions_use_defaults() {
        let solid = Solid::from_params(ShapeKind::Torus, &GeometryParams::default()).unwrap();
        assert_eq!(solid, Solid::Torus { radius: 1.0, tube: 0.3 });

        let cube = Solid::from_params(ShapeKind::Cube, &GeometryParams::default().width(2.0)).unwrap();
        assert_eq!(cube, Solid::Cube { width: 2.0, height: 1.0, depth: 1.0 });
    }

    #[test]
    fn test_negative_dimension_is_rejected() {
        let err = Solid::from_params(ShapeKind::Sphere, &GeometryParams::default().radius(-1.0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter { name: "radius", .. }));
    }

    #[test]
    fn test_param_field_names() {
        for field in ParamField::ALL {
            assert_eq!(ParamField::from_name(field.name()), Some(field));
        }
        assert_eq!(ParamField::from_name("edge"), None);
    }

    #[test]
    fn test_params_fallback_merge() {
        let base = GeometryParams::default().radius(2.0).tube(0.3);
        let merged = GeometryParams::default().radius(1.0).or(&base);
        assert_eq!(merged.radius, Some(1.0));
        assert_eq!(merged.tube, Some(0.3));
        assert_eq!(merged.width, None);
    }

    #[test]
    fn test_params_serialize_camel_case_without_nulls() {
        let json = serde_json::to_string(&GeometryParams::default().radius(1.0)).unwrap();
        assert_eq!(json, r#"{"radius":1.0}"#);
    }
}
