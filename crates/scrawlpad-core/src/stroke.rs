//! Stroke data for the shared canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique stroke identifier, assigned by the shared document on creation.
pub type StrokeId = Uuid;

/// A single drawn stroke: an ordered series of canvas-local points.
///
/// Insertion order is drawing order. A stroke with fewer than two points
/// produces no segments and is never visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Points in the stroke path.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke with an already-assigned identifier.
    pub fn new(id: StrokeId) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    /// Create a stroke from existing points.
    pub fn from_points(id: StrokeId, points: Vec<Point>) -> Self {
        Self { id, points }
    }

    /// The document-assigned identifier.
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Append a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of points in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
