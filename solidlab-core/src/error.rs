/// Error types shared across the core crate
use thiserror::Error;

/// Errors raised at the geometry boundary (formulas and mesh building)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Errors raised by storage backends and (de)serialization of persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
pub type StorageResult<T> = Result<T, StorageError>;
