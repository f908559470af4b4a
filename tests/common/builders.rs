//! Test document builders.
//!
//! `create_all_entities_document()` produces a document holding one entity
//! of every variant; the panel builders produce rectangular components with
//! named edge lines for assembly tests.

#![allow(dead_code)]

use panelcad::entities::*;
use panelcad::layer::Layer;
use panelcad::types::{Axis, Color, LineWeight, Vector2};
use panelcad::DocumentNode;

/// Create a document containing one entity of every supported variant,
/// laid out on a grid with 50-unit spacing.
pub fn create_all_entities_document() -> DocumentNode {
    let mut doc = DocumentNode::with_id("all", "All entities");
    doc.add_layer(Layer::new("frame").with_color(Color::RED).with_line_weight(LineWeight::BOLD));
    let sp = 50.0;

    // Row 1: curves
    let mut line = Line::from_coords(0.0, 0.0, 20.0, 20.0);
    line.common.color = Color::GREEN;
    doc.add_entity(EntityType::from(line).with_id("line").with_layer("frame"));

    doc.add_entity(EntityType::from(Circle::new(Vector2::new(sp, 10.0), 10.0)).with_id("circle"));

    let mut arc = Arc::new(Vector2::new(2.0 * sp, 10.0), 10.0, 0.0, 90.0);
    arc.clockwise = true;
    doc.add_entity(EntityType::from(arc).with_id("arc"));

    let spline = Spline::new(vec![
        Vector2::new(3.0 * sp, 0.0),
        Vector2::new(3.0 * sp + 5.0, 15.0),
        Vector2::new(3.0 * sp + 15.0, 15.0),
        Vector2::new(3.0 * sp + 20.0, 0.0),
    ]);
    doc.add_entity(EntityType::from(spline).with_id("spline"));

    // Row 2: annotations
    let mut text = MText::new(Vector2::new(0.0, sp), "Sash");
    text.font_size = 8.0;
    doc.add_entity(EntityType::from(text).with_id("mtext"));

    let mut dimension = Dimension::new(
        DimensionTarget::new("line", EntityLocation::MinX),
        DimensionTarget::new("circle", EntityLocation::Center),
        Axis::X,
        -15.0,
    );
    dimension.text = Some("<>".to_string());
    doc.add_entity(EntityType::from(dimension).with_id("dimension"));

    let leader = Leader::new(vec![Vector2::new(sp, sp), Vector2::new(sp + 10.0, sp + 10.0)]);
    doc.add_entity(EntityType::from(leader).with_id("leader"));

    // Row 3: fills, references and images
    let square = HatchPath::polygon(vec![
        Vector2::new(0.0, 2.0 * sp),
        Vector2::new(20.0, 2.0 * sp),
        Vector2::new(20.0, 2.0 * sp + 20.0),
        Vector2::new(0.0, 2.0 * sp + 20.0),
    ]);
    doc.add_entity(EntityType::from(Hatch::new(vec![square])).with_id("hatch"));

    let mut insert = Insert::new("handle", Vector2::new(sp, 2.0 * sp));
    insert.common.children.push(
        EntityType::from(Line::from_coords(sp, 2.0 * sp, sp, 2.0 * sp + 10.0)).with_id("insert-line"),
    );
    doc.add_entity(EntityType::from(insert).with_id("insert"));

    let image = Image::new("glass.png", Vector2::new(2.0 * sp, 2.0 * sp), 30.0, 20.0);
    doc.add_entity(EntityType::from(image).with_id("image"));

    doc
}

/// Rectangular panel outlined by four named lines `<id>-left`, `<id>-right`,
/// `<id>-top` and `<id>-bottom`. `top` is the smaller y.
pub fn panel(id: &str, x: f64, y: f64, width: f64, height: f64) -> DocumentNode {
    let mut node = DocumentNode::with_id(id, id);
    let (r, b) = (x + width, y + height);
    for (side, line) in [
        ("left", Line::from_coords(x, y, x, b)),
        ("right", Line::from_coords(r, y, r, b)),
        ("top", Line::from_coords(x, y, r, y)),
        ("bottom", Line::from_coords(x, b, r, b)),
    ] {
        node.add_entity(EntityType::from(line).with_id(format!("{id}-{side}")));
    }
    node
}

/// A parent frame with panels as direct components
pub fn frame_with(panels: Vec<DocumentNode>) -> DocumentNode {
    let mut frame = panel("frame", 0.0, 0.0, 1000.0, 2000.0);
    frame.components.data = panels;
    frame
}
