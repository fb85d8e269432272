//! Errors returned by shape operations.

use crate::doc::ShapeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// Width or height was zero, negative, or not a finite number.
    #[error("invalid dimensions: {width} x {height} (both must be positive)")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid position: ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
    #[error("duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    #[error("no shape selected")]
    NoSelection,
}
