//! JSON exchange: round trips and the persisted document shape.

mod common;

use common::builders::{create_all_entities_document, frame_with, panel};
use common::{read_json, read_json_failsafe, roundtrip, test_output_path};
use panelcad::io::json::{write_json, JsonReader, JsonWriter};
use panelcad::{BaseLine, Color, Connection, EntityKind, LineWeight};
use serde_json::{json, Value};

#[test]
fn all_entities_roundtrip() {
    let doc = create_all_entities_document();
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn assembled_tree_roundtrip() {
    let mut frame = frame_with(vec![
        panel("A", 0.0, 0.0, 100.0, 100.0),
        panel("B", 300.0, 0.0, 100.0, 100.0),
    ]);
    frame
        .assemble_components(&Connection::absolute(["A", "B"], ["A-right", "B-left"], "12.5"))
        .unwrap();
    frame.partners.push(panel("side", 2000.0, 0.0, 50.0, 50.0));
    frame.base_lines.push(BaseLine::new("origin", "frame-left", "frame-top"));
    frame.conditions.push("tilt".to_string());

    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn persisted_shape() {
    let mut frame = frame_with(vec![panel("A", 0.0, 0.0, 100.0, 100.0)]);
    frame
        .assemble_components(&Connection::absolute(["frame", "A"], ["frame-left", "A-left"], "7"))
        .unwrap();
    let mut doc = create_all_entities_document();
    doc.merge(&frame);

    let text = JsonWriter::new(&doc).write_to_string().unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["entities"]["line"]["line"]["type"], "line");
    assert_eq!(value["entities"]["line"]["line"]["color"], "3");
    assert_eq!(value["entities"]["line"]["line"]["lineweight"], -1);
    assert_eq!(value["entities"]["circle"]["circle"]["radius"], 10.0);
    assert_eq!(value["entities"]["arc"]["arc"]["clockwise"], true);

    let layers = value["layers"].as_object().unwrap();
    let (id, layer) = layers.iter().next().unwrap();
    assert_eq!(&layer["id"], id);
    assert_eq!(layer["name"], "frame");
    assert_eq!(layer["color"], "1");
    assert_eq!(layer["lineweight"], 50);

    let connection = &value["components"]["connections"][0];
    assert_eq!(connection["ids"], json!(["frame", "A"]));
    assert_eq!(connection["lines"], json!(["frame-left", "A-left"]));
    assert_eq!(connection["space"], "7");
    assert_eq!(connection["position"], "absolute");
    assert_eq!(connection["axis"], "x");
    assert_eq!(connection["value"], 7.0);

    assert_eq!(value["entities"]["insert"]["insert"]["blockTransform"], json!([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]));
}

#[test]
fn minimal_external_document() {
    let doc = read_json(
        &json!({
            "id": "door-1",
            "name": "Door",
            "type": "door",
            "layers": {"L1": {"name": "glass", "color": "#00FF80", "lineweight": 25}},
            "entities": {
                "line": {
                    "edge": {"start": {"x": 0, "y": 0}, "end": {"x": 0, "y": 2000}, "layer": "glass"}
                }
            },
            "components": {"data": [], "connections": []},
            "profileSystem": {"series": 70, "thermal": true}
        })
        .to_string(),
    );

    assert_eq!(doc.node_type, "door");
    let layer = doc.layer_by_name("glass").unwrap();
    assert_eq!(layer.id, "L1");
    assert_eq!(layer.color, Color::from_rgb(0, 255, 128));
    assert_eq!(layer.line_weight, LineWeight::NORMAL);

    let edge = doc.find_entity("edge").unwrap();
    assert_eq!(edge.kind(), EntityKind::Line);
    assert_eq!(doc.effective_color(edge), Color::from_rgb(0, 255, 128));

    // unknown keys survive a write
    let text = JsonWriter::new(&doc).write_to_string().unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["profileSystem"], json!({"series": 70, "thermal": true}));
}

#[test]
fn failsafe_read_keeps_the_rest() {
    let doc = read_json_failsafe(
        &json!({
            "id": "d",
            "entities": {
                "solid3d": {"s": {}},
                "circle": {"c": {"center": {"x": 1, "y": 2}, "radius": 3}}
            },
            "components": {"data": [{
                "id": "child",
                "entities": {"line": {"l": {"type": "ray", "start": {"x": 0, "y": 0}}}}
            }]}
        })
        .to_string(),
    );
    assert!(doc.find_entity("c").is_some());
    assert!(doc.components.get("child").unwrap().entities.is_empty());
}

#[test]
fn file_roundtrip() {
    let doc = create_all_entities_document();
    let path = test_output_path("all_entities.json");
    write_json(&doc, &path).unwrap();

    let back = JsonReader::from_file(&path).unwrap().read().unwrap();
    assert_eq!(back, doc);
    let _ = std::fs::remove_file(path);
}
