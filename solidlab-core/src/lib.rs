/// SolidLab Core Library - parametric solids, their properties and learning progress
///
/// This library provides the front-end independent parts of the viewer:
/// shape formulas and meshes, camera and rotation state, the frame ticker,
/// the shape catalog, routes, and the progress store with its backends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod mesh;
pub mod practice;
pub mod projection;
pub mod properties;
pub mod route;
pub mod shape;
pub mod store;
pub mod tick;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use config::{AppConfig, AppConfigPatch, Theme};
pub use error::{GeometryError, GeometryResult, StorageError, StorageResult};
pub use geometry::{Mesh, Triangle, Vertex};
pub use mesh::{build_mesh_descriptor, MeshDescriptor};
pub use practice::{PracticeSession, Question};
pub use projection::Camera;
pub use properties::{compute_properties, Properties};
pub use route::Route;
pub use shape::{GeometryParams, ParamField, ShapeKind, Solid};
pub use store::{FileBackend, MemoryBackend, ProgressStore, StorageBackend};
pub use tick::{TickHandle, Ticker};
pub use transform::{RotationProfile, RotationState, Transform};
pub use viewer::ViewState;
