//! Affine transforms for 2D drawing geometry
//!
//! A [`Transform`] wraps a homogeneous 3x3 matrix. Only the affine part is
//! ever populated: the bottom row stays `[0, 0, 1]`.

use crate::types::Vector2;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// 2D affine transform
///
/// Serialized as the six coefficients `[a, b, c, d, e, f]` where
/// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Transform {
    /// The homogeneous transformation matrix
    pub matrix: Matrix3<f64>,
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Create transform from matrix
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Create transform from `[a, b, c, d, e, f]` coefficients
    pub fn from_coefficients(c: [f64; 6]) -> Self {
        Self {
            matrix: Matrix3::new(
                c[0], c[2], c[4], //
                c[1], c[3], c[5], //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// The `[a, b, c, d, e, f]` coefficients
    pub fn coefficients(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)]]
    }

    /// Create translation transform
    pub fn from_translation(offset: Vector2) -> Self {
        Self::from_coefficients([1.0, 0.0, 0.0, 1.0, offset.x, offset.y])
    }

    /// Create translation transform from components
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_translation(Vector2::new(dx, dy))
    }

    /// Create rotation transform around the origin (radians, counter-clockwise)
    pub fn from_rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_coefficients([cos, sin, -sin, cos, 0.0, 0.0])
    }

    /// Create rotation transform around a center point
    pub fn from_rotation_about(center: Vector2, angle: f64) -> Self {
        Self::from_translation(-center)
            .then(&Self::from_rotation(angle))
            .then(&Self::from_translation(center))
    }

    /// Create uniform scaling transform
    pub fn from_scale(scale: f64) -> Self {
        Self::from_scaling(scale, scale)
    }

    /// Create non-uniform scaling transform
    pub fn from_scaling(sx: f64, sy: f64) -> Self {
        Self::from_coefficients([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Create scaling transform with origin
    pub fn from_scaling_with_origin(sx: f64, sy: f64, origin: Vector2) -> Self {
        Self::from_translation(-origin)
            .then(&Self::from_scaling(sx, sy))
            .then(&Self::from_translation(origin))
    }

    /// Horizontal flip (x -> -x)
    pub fn mirror_x() -> Self {
        Self::from_scaling(-1.0, 1.0)
    }

    /// Vertical flip (y -> -y)
    pub fn mirror_y() -> Self {
        Self::from_scaling(1.0, -1.0)
    }

    /// Apply transform to a point
    pub fn apply(&self, point: Vector2) -> Vector2 {
        let m = &self.matrix;
        Vector2::new(
            m[(0, 0)] * point.x + m[(0, 1)] * point.y + m[(0, 2)],
            m[(1, 0)] * point.x + m[(1, 1)] * point.y + m[(1, 2)],
        )
    }

    /// Apply only the linear portion (ignores translation)
    pub fn apply_direction(&self, direction: Vector2) -> Vector2 {
        let m = &self.matrix;
        Vector2::new(
            m[(0, 0)] * direction.x + m[(0, 1)] * direction.y,
            m[(1, 0)] * direction.x + m[(1, 1)] * direction.y,
        )
    }

    /// Translation portion
    pub fn translation_part(&self) -> Vector2 {
        Vector2::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    /// Determinant of the linear portion
    pub fn linear_determinant(&self) -> f64 {
        let m = &self.matrix;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
    }

    /// Odd reflection parity: exactly one of the two axes is flipped
    pub fn is_reflection(&self) -> bool {
        self.linear_determinant() < 0.0
    }

    /// Combine with another transform (this transform applied first)
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Combine with another transform (other transform applied first)
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if transform is identity
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl From<[f64; 6]> for Transform {
    fn from(c: [f64; 6]) -> Self {
        Transform::from_coefficients(c)
    }
}

impl From<Transform> for [f64; 6] {
    fn from(t: Transform) -> Self {
        t.coefficients()
    }
}
