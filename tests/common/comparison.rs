//! Approximate comparisons for geometry assertions.

#![allow(dead_code)]

use panelcad::{BoundingBox2D, DocumentNode, Vector2};

pub const EPS: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_point_close(actual: Vector2, expected: Vector2) {
    assert!(
        (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// Top-left corner of a bounding rect
pub fn corner(rect: &BoundingBox2D) -> Vector2 {
    Vector2::new(rect.left(), rect.top())
}

/// Top-left corner of a direct component
pub fn component_corner(doc: &DocumentNode, id: &str) -> Vector2 {
    let component = doc
        .components
        .get(id)
        .unwrap_or_else(|| panic!("no component `{id}` in `{}`", doc.id));
    corner(&component.bounding_rect())
}
