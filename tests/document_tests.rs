//! Document tree operations: merge, separate, layout, duplication and
//! whole-tree transforms.

mod common;

use common::builders::{create_all_entities_document, frame_with, panel};
use common::comparison::{assert_close, assert_point_close, component_corner, corner};
use common::entity_kind_histogram;
use panelcad::entities::{Arc, EntityType, Insert, Line};
use panelcad::{
    Color, Connection, DocumentNode, EntityKind, JointPoint, LayoutConfig, Transform, Vector2,
};

#[test]
fn all_entities_document_covers_every_variant() {
    let doc = create_all_entities_document();
    let histogram = entity_kind_histogram(&doc);
    for kind in EntityKind::ALL {
        assert_eq!(histogram.get(kind.as_str()), Some(&1), "missing {kind}");
    }
    // nested children are reachable but not counted as top-level entities
    assert!(doc.find_entity("insert-line").is_some());
}

#[test]
fn merge_then_separate_restores_document() {
    let original = frame_with(vec![panel("A", 0.0, 0.0, 100.0, 100.0)]);

    let mut addition = DocumentNode::with_id("frame", "frame");
    addition.add_entity(EntityType::from(Line::from_coords(5.0, 5.0, 50.0, 5.0)).with_id("rail"));
    addition.components.data.push(panel("B", 200.0, 0.0, 100.0, 100.0));
    addition
        .components
        .connections
        .push(Connection::absolute(["A", "B"], ["A-right", "B-left"], "0"));
    addition.options.insert("glazing".to_string(), "double".to_string());

    let mut merged = original.clone();
    merged.merge(&addition);
    assert!(merged.find_entity("rail").is_some());
    assert!(merged.components.get("B").is_some());
    assert_eq!(merged.components.connections.len(), 1);

    merged.separate(&addition);
    assert_eq!(merged, original);
}

#[test]
fn merged_components_can_be_assembled() {
    let mut doc = frame_with(vec![panel("A", 0.0, 0.0, 100.0, 100.0)]);
    let mut incoming = DocumentNode::with_id("frame", "frame");
    incoming.components.data.push(panel("B", 500.0, 0.0, 100.0, 100.0));
    doc.merge(&incoming);

    doc.assemble_components(&Connection::absolute(["A", "B"], ["A-right", "B-left"], "5"))
        .unwrap();
    assert_close(component_corner(&doc, "B").x, 105.0);
}

#[test]
fn partners_dock_on_joint_points_or_beside() {
    let mut door = panel("door", 0.0, 0.0, 800.0, 2000.0);
    door.joint_points.push(JointPoint::new("hinge", 800.0, 100.0));

    let mut leaf = panel("leaf", 0.0, 0.0, 400.0, 2000.0);
    leaf.joint_points.push(JointPoint::new("hinge", 0.0, 100.0));
    door.add_partner(leaf);
    assert_point_close(corner(&door.partners[0].bounding_rect()), Vector2::new(800.0, 0.0));

    door.add_partner(panel("handle", -50.0, -50.0, 20.0, 100.0));
    let handle = door
        .partners
        .iter()
        .find(|p| p.id == "handle")
        .unwrap()
        .bounding_rect();
    // beside the door and the leaf, centered vertically on both
    assert_close(handle.left(), 1200.0 + 15.0);
    assert_close(handle.center().y, 1000.0);
}

#[test]
fn components_snap_with_configured_threshold() {
    let mut frame = panel("frame", 0.0, 0.0, 100.0, 100.0);
    let config = LayoutConfig {
        component_snap_threshold: 50.0,
        partner_margin: 0.0,
        ..Default::default()
    };
    frame.add_component_with(panel("near", 200.0, 0.0, 10.0, 100.0), &config);
    assert_close(component_corner(&frame, "near").x, 100.0);

    frame.add_component(panel("kept", 150.0, 0.0, 10.0, 100.0));
    assert_close(component_corner(&frame, "kept").x, 150.0);
}

#[test]
fn duplicate_with_new_ids_keeps_connections_usable() {
    let mut frame = frame_with(vec![
        panel("A", 0.0, 0.0, 100.0, 100.0),
        panel("B", 300.0, 0.0, 100.0, 100.0),
    ]);
    frame
        .assemble_components(&Connection::absolute(["A", "B"], ["A-right", "B-left"], "0"))
        .unwrap();

    let mut copy = frame.duplicate(true);
    assert_ne!(copy.id, frame.id);
    assert!(copy.components.get("A").is_none());
    assert!(copy.find_entity("A-right").is_none());

    let connection = copy.components.connections[0].clone();
    assert_eq!(connection.ids[0], copy.components.data[0].id);
    assert_eq!(connection.ids[1], copy.components.data[1].id);

    // move the first component away and replay the recorded connection
    let first = connection.ids[0].clone();
    copy.move_component(&first, Vector2::new(-50.0, 0.0), Some(&connection.ids[1]))
        .unwrap();
    let failures = copy.update_components();
    assert!(failures.is_empty());
    let second = copy.components.get(&connection.ids[1]).unwrap().bounding_rect();
    assert_close(second.left(), 50.0);

    // the original tree is untouched
    assert_close(component_corner(&frame, "B").x, 100.0);
}

#[test]
fn mirror_transforms_whole_tree() {
    let mut doc = create_all_entities_document();
    doc.components.data.push(panel("child", 10.0, 10.0, 10.0, 10.0));
    doc.joint_points.push(JointPoint::new("hinge", 3.0, 4.0));

    doc.transform(&Transform::mirror_x());

    assert_eq!(doc.joint_points[0].position(), Vector2::new(-3.0, 4.0));
    assert_close(component_corner(&doc, "child").x, -20.0);

    match doc.find_entity("arc").unwrap() {
        EntityType::Arc(Arc { clockwise, .. }) => assert!(!clockwise),
        other => panic!("unexpected {other:?}"),
    }
    match doc.find_entity("insert").unwrap() {
        EntityType::Insert(Insert { block_transform, .. }) => assert!(block_transform.is_reflection()),
        other => panic!("unexpected {other:?}"),
    }
    let nested = doc.find_entity("insert-line").unwrap().endpoints().unwrap();
    assert_close(nested.0.x, -50.0);

    doc.transform(&Transform::mirror_x());
    assert_eq!(doc.joint_points[0].position(), Vector2::new(3.0, 4.0));
}

#[test]
fn deferred_transform_is_applied_on_demand() {
    let mut doc = panel("p", 0.0, 0.0, 10.0, 10.0);
    let shift = Transform::translation(100.0, 0.0);
    doc.entities.transform(&shift, false);
    doc.entities.transform(&shift, false);
    // geometry untouched until baked
    assert_close(doc.bounding_rect().left(), 0.0);

    doc.entities.apply_pending();
    assert_close(doc.bounding_rect().left(), 200.0);
}

#[test]
fn style_resolution_goes_through_layers() {
    let doc = create_all_entities_document();
    let line = doc.find_entity("line").unwrap();
    // explicit color wins over the layer
    assert_eq!(doc.effective_color(line), Color::GREEN);
    assert_eq!(
        doc.effective_line_weight(line),
        doc.layer_by_name("frame").unwrap().line_weight
    );
}
