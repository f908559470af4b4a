//! Bounding box types for geometric entities

use super::{Axis, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D axis-aligned bounding box
///
/// The default value is the degenerate rect at the origin, which is what
/// extent queries return when nothing contributes a finite extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// Minimum point (left/top corner)
    pub min: Vector2,
    /// Maximum point (right/bottom corner)
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Vector2) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box that contains all given finite points
    ///
    /// Non-finite points are skipped; `None` when nothing is left.
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite());
        let first = *finite.next()?;
        let mut bbox = BoundingBox2D::from_point(first);
        for point in finite {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Left edge
    pub fn left(&self) -> f64 {
        self.min.x
    }

    /// Top edge (smallest y)
    pub fn top(&self) -> f64 {
        self.min.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.max.x
    }

    /// Bottom edge (largest y)
    pub fn bottom(&self) -> f64 {
        self.max.y
    }

    /// Leading edge along an axis (left for x, top for y)
    pub fn start_along(&self, axis: Axis) -> f64 {
        self.min.component(axis)
    }

    /// Extent along an axis (width for x, height for y)
    pub fn size_along(&self, axis: Axis) -> f64 {
        self.max.component(axis) - self.min.component(axis)
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// A rect with no area in either direction
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Merge two optional extents
    pub fn union(a: Option<BoundingBox2D>, b: Option<BoundingBox2D>) -> Option<BoundingBox2D> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.merge(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}
