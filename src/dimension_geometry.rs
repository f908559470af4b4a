//! Rendered geometry of linear dimensions
//!
//! A dimension measures between two anchors read off its referenced
//! entities. The dimension line runs parallel to the measured axis at a
//! level set by the driving anchor plus the offset, or by the secondary
//! offset when one is given.

use crate::document::DocumentNode;
use crate::entities::{Dimension, DimensionRef, DimensionTarget, EntityLocation};
use crate::error::{DrawingError, Result};
use crate::types::{Axis, Vector2};

/// The four points a renderer draws a linear dimension from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionPoints {
    /// Measured point on the first entity
    pub anchor1: Vector2,
    /// Measured point on the second entity
    pub anchor2: Vector2,
    /// Dimension line end above `anchor1`
    pub line_start: Vector2,
    /// Dimension line end above `anchor2`
    pub line_end: Vector2,
}

impl DimensionPoints {
    /// Measured distance along the dimension line
    pub fn measurement(&self) -> f64 {
        self.line_start.distance(&self.line_end)
    }
}

struct Resolved {
    segment: (Vector2, Vector2),
    anchor: Vector2,
}

/// Resolve the rendered points of `dimension` against the subtree of `doc`
pub fn resolve(doc: &DocumentNode, dimension: &Dimension) -> Result<DimensionPoints> {
    let axis = dimension.axis;
    let across = axis.other();

    if let Some([level_point, anchor1, anchor2]) = dimension.baked_points() {
        let level = level_point.component(across);
        return Ok(ordered(axis, anchor1, anchor2, level));
    }

    let first = resolve_target(doc, &dimension.entity1, axis)?;
    let second = resolve_target(doc, &dimension.entity2, axis)?;

    let level = match dimension.secondary_offset {
        Some(fixed) => fixed,
        None => {
            let driving = if drives_first(dimension.reference, &first, &second) {
                &first
            } else {
                &second
            };
            driving.anchor.component(across) + dimension.offset
        }
    };
    Ok(ordered(axis, first.anchor, second.anchor, level))
}

fn resolve_target(doc: &DocumentNode, target: &DimensionTarget, axis: Axis) -> Result<Resolved> {
    let entity = doc
        .find_entity(&target.id)
        .ok_or_else(|| DrawingError::EntityNotFound(target.id.clone()))?;
    let segment = entity.endpoints().ok_or_else(|| {
        DrawingError::InvalidData(format!(
            "dimension reference `{}` is a {}, which has no measurable points",
            target.id,
            entity.kind()
        ))
    })?;
    Ok(Resolved {
        segment,
        anchor: anchor(segment, target.location, axis),
    })
}

fn anchor((start, end): (Vector2, Vector2), location: EntityLocation, axis: Axis) -> Vector2 {
    // ties resolve to the start point
    let pick = |axis: Axis, larger: bool| {
        let (s, e) = (start.component(axis), end.component(axis));
        if (larger && e > s) || (!larger && e < s) {
            end
        } else {
            start
        }
    };
    match location {
        EntityLocation::Start => start,
        EntityLocation::End => end,
        EntityLocation::Center => (start + end) * 0.5,
        EntityLocation::Min => pick(axis, false),
        EntityLocation::Max => pick(axis, true),
        EntityLocation::MinX => pick(Axis::X, false),
        EntityLocation::MaxX => pick(Axis::X, true),
        EntityLocation::MinY => pick(Axis::Y, false),
        EntityLocation::MaxY => pick(Axis::Y, true),
    }
}

fn drives_first(reference: DimensionRef, first: &Resolved, second: &Resolved) -> bool {
    let length = |r: &Resolved| r.segment.0.distance(&r.segment.1);
    match reference {
        DimensionRef::Entity1 => true,
        DimensionRef::Entity2 => false,
        DimensionRef::Longer => length(first) >= length(second),
        DimensionRef::Shorter => length(first) <= length(second),
        DimensionRef::MinX => first.anchor.x <= second.anchor.x,
        DimensionRef::MaxX => first.anchor.x >= second.anchor.x,
        DimensionRef::MinY => first.anchor.y <= second.anchor.y,
        DimensionRef::MaxY => first.anchor.y >= second.anchor.y,
    }
}

/// Project both anchors onto `level` and order the pairs along `axis`
fn ordered(axis: Axis, anchor1: Vector2, anchor2: Vector2, level: f64) -> DimensionPoints {
    let project = |anchor: Vector2| match axis {
        Axis::X => Vector2::new(anchor.x, level),
        Axis::Y => Vector2::new(level, anchor.y),
    };
    let (anchor1, anchor2) = if anchor1.component(axis) > anchor2.component(axis) {
        (anchor2, anchor1)
    } else {
        (anchor1, anchor2)
    };
    DimensionPoints {
        anchor1,
        anchor2,
        line_start: project(anchor1),
        line_end: project(anchor2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityType, Line};

    fn doc() -> DocumentNode {
        let mut doc = DocumentNode::with_id("doc", "doc");
        doc.add_entity(EntityType::from(Line::from_coords(0.0, 0.0, 0.0, 100.0)).with_id("left"));
        doc.add_entity(EntityType::from(Line::from_coords(80.0, 10.0, 80.0, 50.0)).with_id("right"));
        doc
    }

    fn dim(location1: EntityLocation, location2: EntityLocation) -> Dimension {
        Dimension::new(
            DimensionTarget::new("left", location1),
            DimensionTarget::new("right", location2),
            Axis::X,
            -20.0,
        )
    }

    #[test]
    fn test_horizontal_dimension_below_driving_entity() {
        let points = resolve(&doc(), &dim(EntityLocation::Start, EntityLocation::Start)).unwrap();
        assert_eq!(points.anchor1, Vector2::new(0.0, 0.0));
        assert_eq!(points.anchor2, Vector2::new(80.0, 10.0));
        assert_eq!(points.line_start, Vector2::new(0.0, -20.0));
        assert_eq!(points.line_end, Vector2::new(80.0, -20.0));
        assert!((points.measurement() - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_reference_policies() {
        let doc = doc();
        let mut dimension = dim(EntityLocation::Start, EntityLocation::Start);
        dimension.reference = DimensionRef::Shorter;
        let points = resolve(&doc, &dimension).unwrap();
        assert_eq!(points.line_start.y, -10.0);

        dimension.reference = DimensionRef::MaxY;
        assert_eq!(resolve(&doc, &dimension).unwrap().line_end.y, -10.0);

        dimension.secondary_offset = Some(150.0);
        let points = resolve(&doc, &dimension).unwrap();
        assert_eq!(points.line_start.y, 150.0);
        assert_eq!(points.line_end.y, 150.0);
    }

    #[test]
    fn test_locations() {
        let segment = (Vector2::new(10.0, 5.0), Vector2::new(2.0, 9.0));
        assert_eq!(anchor(segment, EntityLocation::End, Axis::X), Vector2::new(2.0, 9.0));
        assert_eq!(anchor(segment, EntityLocation::Center, Axis::X), Vector2::new(6.0, 7.0));
        assert_eq!(anchor(segment, EntityLocation::Min, Axis::X), Vector2::new(2.0, 9.0));
        assert_eq!(anchor(segment, EntityLocation::Max, Axis::Y), Vector2::new(2.0, 9.0));
        assert_eq!(anchor(segment, EntityLocation::MaxX, Axis::Y), Vector2::new(10.0, 5.0));
        assert_eq!(anchor(segment, EntityLocation::MinY, Axis::X), Vector2::new(10.0, 5.0));
    }

    #[test]
    fn test_pairs_are_ordered_along_axis() {
        let mut dimension = dim(EntityLocation::Start, EntityLocation::Start);
        std::mem::swap(&mut dimension.entity1, &mut dimension.entity2);
        let points = resolve(&doc(), &dimension).unwrap();
        assert_eq!(points.anchor1.x, 0.0);
        assert_eq!(points.line_start.x, 0.0);
        // the level still follows entity1, now the right line
        assert_eq!(points.line_start.y, -10.0);
    }

    #[test]
    fn test_baked_points() {
        let mut dimension = dim(EntityLocation::Start, EntityLocation::Start);
        dimension.axis = Axis::Y;
        dimension.definition_points = Some(vec![
            Vector2::new(-30.0, 0.0),
            Vector2::new(5.0, 90.0),
            Vector2::new(0.0, 10.0),
        ]);
        let points = resolve(&DocumentNode::default(), &dimension).unwrap();
        assert_eq!(points.anchor1, Vector2::new(0.0, 10.0));
        assert_eq!(points.line_start, Vector2::new(-30.0, 10.0));
        assert_eq!(points.line_end, Vector2::new(-30.0, 90.0));
    }

    #[test]
    fn test_unresolvable_references() {
        let mut doc = doc();
        let mut dimension = dim(EntityLocation::Start, EntityLocation::Start);
        dimension.entity2.id = "ghost".to_string();
        assert!(matches!(resolve(&doc, &dimension), Err(DrawingError::EntityNotFound(_))));

        doc.add_entity(EntityType::from(crate::entities::MText::new(Vector2::ZERO, "x")).with_id("note"));
        dimension.entity2.id = "note".to_string();
        assert!(matches!(resolve(&doc, &dimension), Err(DrawingError::InvalidData(_))));
    }
}
