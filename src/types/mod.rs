//! Core geometric and style types shared by entities and documents

pub mod axis;
pub mod bounds;
pub mod color;
pub mod line_weight;
pub mod transform;
pub mod vector;

pub use axis::{Axis, AxisMask};
pub use bounds::BoundingBox2D;
pub use color::Color;
pub use line_weight::LineWeight;
pub use transform::Transform;
pub use vector::Vector2;
