//! Property tests for affine transforms over documents.

mod common;

use common::builders::panel;
use panelcad::entities::{Arc, EntityType};
use panelcad::{Transform, Vector2};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    -1.0e4..1.0e4f64
}

proptest! {
    #[test]
    fn identity_leaves_document_unchanged(x in coordinate(), y in coordinate(), w in 1.0..500.0f64) {
        let mut doc = panel("p", x, y, w, w);
        let before = doc.clone();
        doc.transform(&Transform::identity());
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn translation_round_trips(x in coordinate(), y in coordinate(), dx in coordinate(), dy in coordinate()) {
        let mut doc = panel("p", x, y, 10.0, 20.0);
        doc.translate(Vector2::new(dx, dy));
        doc.translate(Vector2::new(-dx, -dy));
        let rect = doc.bounding_rect();
        prop_assert!((rect.left() - x).abs() < 1e-6);
        prop_assert!((rect.top() - y).abs() < 1e-6);
    }

    #[test]
    fn reflection_parity_flips_arc_direction(
        sx in prop_oneof![Just(-1.0f64), Just(1.0f64)],
        sy in prop_oneof![Just(-1.0f64), Just(1.0f64)],
        angle in 0.0..std::f64::consts::TAU,
    ) {
        let mut doc = panel("p", 0.0, 0.0, 10.0, 10.0);
        doc.add_entity(EntityType::from(Arc::new(Vector2::new(3.0, 4.0), 2.0, 10.0, 80.0)).with_id("arc"));

        let transform = Transform::from_scaling(sx, sy).then(&Transform::from_rotation(angle));
        doc.transform(&transform);

        let clockwise = match doc.find_entity("arc") {
            Some(EntityType::Arc(arc)) => arc.clockwise,
            _ => unreachable!(),
        };
        prop_assert_eq!(clockwise, sx * sy < 0.0);
    }

    #[test]
    fn composition_matches_sequential_application(
        angle in 0.0..std::f64::consts::TAU,
        dx in coordinate(),
        px in coordinate(),
        py in coordinate(),
    ) {
        let rotate = Transform::from_rotation(angle);
        let shift = Transform::translation(dx, 0.0);
        let point = Vector2::new(px, py);
        let sequential = shift.apply(rotate.apply(point));
        let combined = rotate.then(&shift).apply(point);
        prop_assert!((sequential - combined).length() < 1e-6);
    }
}
