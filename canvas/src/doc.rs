//! Document model: shape records, sparse updates, and the in-memory store.
//!
//! This module defines the data that describes what is on the canvas
//! (`Shape`, `ShapeKind`), a sparse-update type for incremental edits
//! (`PartialShape`), the id allocator, and the runtime store that owns all
//! live shapes (`ShapeStore`).
//!
//! The store is an ordered list. Insertion order is the only ordering there
//! is: the renderer draws front-to-back in that order and hit-testing walks it
//! in reverse so the most recently generated shape wins.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::geometry::Bounds;

/// Unique identifier for a shape, e.g. `shape-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub String);

impl ShapeId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle filling the bounding box.
    #[default]
    Rectangle,
    /// Ellipse inscribed within the bounding box.
    Circle,
    /// Upward isosceles triangle: apex at top-centre, base along the bottom edge.
    Triangle,
}

impl ShapeKind {
    /// Every kind, in control-panel order.
    pub const ALL: [Self; 3] = [Self::Rectangle, Self::Circle, Self::Triangle];

    /// Lowercase name for CSS class names and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }
}

/// A shape as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Rectangle, circle or triangle.
    pub kind: ShapeKind,
    /// Left edge of the unrotated bounding box in world pixels.
    pub x: f64,
    /// Top edge of the unrotated bounding box in world pixels.
    pub y: f64,
    /// Width of the bounding box in world pixels.
    pub width: f64,
    /// Height of the bounding box in world pixels.
    pub height: f64,
    /// Clockwise rotation in degrees around the bounding-box center.
    #[serde(default)]
    pub rotation: f64,
    /// Display color as a CSS color string; the theme default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Shape {
    /// The unrotated bounding box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Overwrite position and size from `bounds`.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New display color, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PartialShape {
    /// Position and size taken from `bounds`.
    #[must_use]
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Default::default()
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
            && self.color.is_none()
    }
}

/// Hands out `shape-1`, `shape-2`, … and never repeats a number, so ids stay
/// unique after deletes.
#[derive(Debug, Clone, Default)]
pub struct ShapeIdAllocator {
    issued: u64,
}

impl ShapeIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> ShapeId {
        self.issued += 1;
        ShapeId(format!("shape-{}", self.issued))
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Ordered in-memory store of shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DuplicateId`] if a shape with the same id is
    /// already present; the store is left unchanged.
    pub fn insert(&mut self, shape: Shape) -> Result<(), ShapeError> {
        if self.position(&shape.id).is_some() {
            return Err(ShapeError::DuplicateId(shape.id));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove a shape by id, returning it if it was present. The relative order
    /// of the remaining shapes is preserved.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let idx = self.position(id)?;
        Some(self.shapes.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| &s.id == id)
    }

    /// Apply a partial update to an existing shape. Returns false if the shape doesn't exist.
    pub fn apply_partial(&mut self, id: &ShapeId, partial: &PartialShape) -> bool {
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            shape.x = x;
        }
        if let Some(y) = partial.y {
            shape.y = y;
        }
        if let Some(w) = partial.width {
            shape.width = w;
        }
        if let Some(h) = partial.height {
            shape.height = h;
        }
        if let Some(r) = partial.rotation {
            shape.rotation = r;
        }
        if let Some(ref color) = partial.color {
            shape.color = Some(color.clone());
        }
        true
    }

    /// Shapes in insertion (draw) order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes from the most recently inserted to the oldest (hit order).
    pub fn iter_topmost(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().rev()
    }

    /// The backing slice, in insertion order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| &s.id == id)
    }
}
