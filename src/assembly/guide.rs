//! Alignment guides read off connection reference entities

use crate::config::LayoutConfig;
use crate::entities::EntityType;
use crate::error::{DrawingError, Result};
use crate::types::{Axis, Vector2};

/// A reference entity reduced to a point and, for lines, a direction
///
/// Circles (and zero-length lines) carry no direction of their own; they act
/// as a zero-length line through their center oriented like their siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Guide {
    pub origin: Vector2,
    pub direction: Option<Vector2>,
}

impl Guide {
    pub fn from_entity(entity: &EntityType) -> Option<Guide> {
        match entity {
            EntityType::Line(line) => {
                let delta = line.end - line.start;
                Some(Guide {
                    origin: line.start,
                    direction: (!delta.is_zero()).then(|| delta.normalize()),
                })
            }
            EntityType::Circle(circle) => Some(Guide {
                origin: circle.center,
                direction: None,
            }),
            _ => None,
        }
    }

    /// Only actual lines qualify as interpolation references
    pub fn from_line(entity: &EntityType) -> Option<Guide> {
        match entity {
            EntityType::Line(_) => Guide::from_entity(entity),
            _ => None,
        }
    }

    pub fn coordinate(&self, axis: Axis) -> f64 {
        self.origin.component(axis)
    }
}

/// Constrained axis of a set of guides
///
/// Every directed guide must be parallel to the first one. A vertical set
/// constrains `x`, a horizontal set `y`. `None` when no guide has a
/// direction.
pub(crate) fn constrained_axis(guides: &[Guide], config: &LayoutConfig) -> Result<Option<Axis>> {
    let mut directions = guides.iter().filter_map(|g| g.direction);
    let Some(reference) = directions.next() else {
        return Ok(None);
    };
    for direction in directions {
        let cross = reference.cross(&direction);
        if cross.abs() > config.parallel_tolerance {
            return Err(DrawingError::GeometryConstraintViolation(format!(
                "alignment lines are not parallel (cross product {cross:.6})"
            )));
        }
    }
    if reference.x.abs() <= config.axis_tolerance {
        Ok(Some(Axis::X))
    } else if reference.y.abs() <= config.axis_tolerance {
        Ok(Some(Axis::Y))
    } else {
        Err(DrawingError::AssemblyConflict(format!(
            "alignment direction {reference} is neither vertical nor horizontal"
        )))
    }
}
