//! Assembly engine
//!
//! A [`Connection`] pins one component of a [`DocumentNode`] against another
//! component (or against the node itself) along a single axis. Assembling a
//! connection computes the translation satisfying it, drops the connections
//! it supersedes, moves the target and cascades the move to everything
//! connected to it, then records the resolved connection.

mod conflict;
mod guide;
mod propagate;
pub mod spacing;

pub use spacing::{parse_absolute, parse_relative, RelativeSpacing};

use crate::config::LayoutConfig;
use crate::document::DocumentNode;
use crate::entities::EntityType;
use crate::error::{DrawingError, Result};
use crate::types::{Axis, BoundingBox2D, Vector2};
use ahash::AHashSet;
use guide::{constrained_axis, Guide};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How a connection's spacing is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Fixed distance between two alignment lines
    #[default]
    Absolute,
    /// Percentage between two alignment lines of the first participant
    Relative,
}

/// A named alignment constraint between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Participant node ids
    pub ids: [String; 2],
    /// Display names of the participants
    #[serde(default)]
    pub names: Vec<String>,
    /// Alignment entity ids: two for absolute connections, three for
    /// relative ones
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default = "default_space")]
    pub space: String,
    #[serde(default)]
    pub position: Position,
    /// Axis the connection fixes, known once it has been assembled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    /// Distance between the participants' extents along `axis`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

fn default_space() -> String {
    "0".to_string()
}

impl Connection {
    /// Absolute connection: line `lines[1]` of `ids[1]` is placed `space`
    /// units from line `lines[0]` of `ids[0]`
    pub fn absolute(ids: [&str; 2], lines: [&str; 2], space: impl Into<String>) -> Self {
        Connection {
            ids: ids.map(str::to_string),
            names: Vec::new(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            space: space.into(),
            position: Position::Absolute,
            axis: None,
            value: None,
        }
    }

    /// Relative connection: line `lines[2]` of `ids[1]` is placed between
    /// lines `lines[0]` and `lines[1]` of `ids[0]` as `space` (`P[+|-]C`)
    /// describes
    pub fn relative(ids: [&str; 2], lines: [&str; 3], space: impl Into<String>) -> Self {
        Connection {
            position: Position::Relative,
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Connection::absolute(ids, ["", ""], space)
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// True when `id` is one of the participants
    pub fn touches(&self, id: &str) -> bool {
        self.ids.iter().any(|own| own == id)
    }

    /// The participant opposite to `id`
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.ids[0] == id {
            Some(&self.ids[1])
        } else if self.ids[1] == id {
            Some(&self.ids[0])
        } else {
            None
        }
    }

    /// Connections with the same participants, lines, mode and axis are the
    /// same constraint
    pub fn same_key(&self, other: &Connection) -> bool {
        self.ids == other.ids
            && self.lines == other.lines
            && self.position == other.position
            && self.axis == other.axis
    }
}

/// A connection that could not be applied during a tree-wide update
#[derive(Debug)]
pub struct AssemblyFailure {
    /// Node whose connection list holds the connection
    pub node_id: String,
    pub connection: Connection,
    pub error: DrawingError,
}

impl fmt::Display for AssemblyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}: {}",
            self.node_id, self.connection.ids[0], self.connection.ids[1], self.error
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Participant {
    /// The node holding the connection
    Parent,
    Component(usize),
}

struct Placement {
    axis: Axis,
    translation: Vector2,
}

impl DocumentNode {
    /// Apply a connection between two components, or between a component
    /// and this node
    pub fn assemble_components(&mut self, connection: &Connection) -> Result<()> {
        self.assemble_components_with(connection, &LayoutConfig::default())
    }

    pub fn assemble_components_with(
        &mut self,
        connection: &Connection,
        config: &LayoutConfig,
    ) -> Result<()> {
        let (mut resolved, first, second) = self.resolve_participants(connection)?;
        let placement = match resolved.position {
            Position::Absolute => self.absolute_placement(first, second, &resolved, config)?,
            Position::Relative => self.relative_placement(first, second, &resolved, config)?,
        };
        debug!(
            node = %self.id,
            target = %resolved.ids[1],
            axis = %placement.axis,
            dx = placement.translation.x,
            dy = placement.translation.y,
            "assembling connection"
        );

        self.prune_conflicts(&resolved.ids[0], &resolved.ids[1], placement.axis);
        let mut visited = AHashSet::new();
        visited.insert(resolved.ids[0].clone());
        self.cascade(second, placement.translation, &mut visited);

        resolved.axis = Some(placement.axis);
        resolved.space = resolved.space.trim().to_string();
        resolved.value = match resolved.position {
            Position::Absolute => Some(
                self.participant_rect(Participant::Component(second)).start_along(placement.axis)
                    - self.participant_rect(first).start_along(placement.axis),
            ),
            Position::Relative => None,
        };
        self.components.connections.push(resolved);
        Ok(())
    }

    /// Pin a component where it currently is, on both axes
    pub fn direct_assemble(&mut self, component_id: &str) -> Result<()> {
        self.direct_assemble_with(component_id, &LayoutConfig::default())
    }

    pub fn direct_assemble_with(&mut self, component_id: &str, config: &LayoutConfig) -> Result<()> {
        let component = self
            .components
            .get(component_id)
            .ok_or_else(|| DrawingError::ComponentNotFound(component_id.to_string()))?;
        let own = self.entities.bounding_rect();
        let theirs = component.bounding_rect();
        let connections: Vec<Connection> = Axis::ALL
            .iter()
            .map(|&axis| Connection {
                ids: [self.id.clone(), component.id.clone()],
                names: vec![self.name.clone(), component.name.clone()],
                lines: Vec::new(),
                space: default_space(),
                position: Position::Absolute,
                axis: Some(axis),
                value: Some(theirs.start_along(axis) - own.start_along(axis)),
            })
            .collect();
        for connection in &connections {
            self.assemble_components_with(connection, config)?;
        }
        Ok(())
    }

    /// Resolve the participants, normalizing the connection so that the
    /// moved component always comes second
    fn resolve_participants(
        &self,
        connection: &Connection,
    ) -> Result<(Connection, Participant, usize)> {
        let [first_id, second_id] = &connection.ids;
        match (
            self.components.index_of(first_id),
            self.components.index_of(second_id),
        ) {
            (Some(a), Some(b)) if a == b => Err(DrawingError::AssemblyConflict(format!(
                "connection joins component `{first_id}` to itself"
            ))),
            (Some(a), Some(b)) => Ok((connection.clone(), Participant::Component(a), b)),
            (None, Some(b)) => {
                let mut resolved = connection.clone();
                resolved.ids[0] = self.id.clone();
                Ok((resolved, Participant::Parent, b))
            }
            (Some(a), None) => {
                let mut resolved = connection.clone();
                resolved.ids = [self.id.clone(), first_id.clone()];
                let line_count = resolved.lines.len();
                resolved.lines.rotate_left(1.min(line_count));
                if resolved.names.len() == 2 {
                    resolved.names.swap(0, 1);
                }
                Ok((resolved, Participant::Parent, a))
            }
            (None, None) => Err(DrawingError::ComponentNotFound(format!(
                "neither `{first_id}` nor `{second_id}` is a component of `{}`",
                self.id
            ))),
        }
    }

    fn participant_entity(&self, who: Participant, id: &str) -> Option<&EntityType> {
        match who {
            Participant::Parent => self.entities.find(id),
            Participant::Component(index) => self
                .components
                .data
                .get(index)
                .and_then(|component| component.find_entity(id)),
        }
    }

    fn participant_rect(&self, who: Participant) -> BoundingBox2D {
        match who {
            Participant::Parent => self.entities.bounding_rect(),
            Participant::Component(index) => self
                .components
                .data
                .get(index)
                .map(DocumentNode::bounding_rect)
                .unwrap_or_default(),
        }
    }

    fn participant_id(&self, who: Participant) -> &str {
        match who {
            Participant::Parent => &self.id,
            Participant::Component(index) => self
                .components
                .data
                .get(index)
                .map_or("", |component| component.id.as_str()),
        }
    }

    fn lookup(&self, who: Participant, id: &str) -> Result<&EntityType> {
        self.participant_entity(who, id).ok_or_else(|| {
            DrawingError::EntityNotFound(format!("`{id}` in `{}`", self.participant_id(who)))
        })
    }

    /// Line or circle usable as an alignment reference
    fn guide(&self, who: Participant, id: &str) -> Result<Guide> {
        let entity = self.lookup(who, id)?;
        Guide::from_entity(entity).ok_or_else(|| {
            DrawingError::GeometryConstraintViolation(format!(
                "`{id}` is a {}, not a line or circle",
                entity.kind()
            ))
        })
    }

    fn line_guide(&self, who: Participant, id: &str) -> Result<Guide> {
        let entity = self.lookup(who, id)?;
        Guide::from_line(entity).ok_or_else(|| {
            DrawingError::GeometryConstraintViolation(format!(
                "`{id}` is a {}, not a line",
                entity.kind()
            ))
        })
    }

    fn absolute_placement(
        &self,
        first: Participant,
        second: usize,
        connection: &Connection,
        config: &LayoutConfig,
    ) -> Result<Placement> {
        let second = Participant::Component(second);
        let guides = match connection.lines.as_slice() {
            [a, b, ..] => self
                .guide(first, a)
                .and_then(|ga| Ok([ga, self.guide(second, b)?])),
            _ => Err(DrawingError::InvalidData(
                "absolute connection needs two alignment lines".to_string(),
            )),
        };
        let axis = match &guides {
            Ok(pair) => constrained_axis(pair, config)?,
            Err(_) => None,
        };

        match (guides, axis) {
            (Ok([ga, gb]), Some(axis)) => {
                let translation = match parse_absolute(&connection.space) {
                    Some(space) => Vector2::along(
                        axis,
                        ga.coordinate(axis) - gb.coordinate(axis) + space,
                    ),
                    None => {
                        debug!(space = %connection.space, "spacing is not a number, not moving");
                        Vector2::ZERO
                    }
                };
                Ok(Placement { axis, translation })
            }
            (guides, _) => match (connection.axis, connection.value) {
                (Some(axis), Some(value)) => {
                    let offset = self.participant_rect(first).start_along(axis)
                        - self.participant_rect(second).start_along(axis)
                        + value;
                    Ok(Placement {
                        axis,
                        translation: Vector2::along(axis, offset),
                    })
                }
                _ => Err(guides.err().unwrap_or_else(|| {
                    DrawingError::AssemblyConflict(
                        "no axis can be derived from two circles".to_string(),
                    )
                })),
            },
        }
    }

    fn relative_placement(
        &self,
        first: Participant,
        second: usize,
        connection: &Connection,
        config: &LayoutConfig,
    ) -> Result<Placement> {
        let spacing = parse_relative(&connection.space)?;
        let [a, b, x] = match connection.lines.as_slice() {
            [a, b, x, ..] => [a, b, x],
            _ => {
                return Err(DrawingError::InvalidData(format!(
                    "relative connection needs three alignment lines, got {}",
                    connection.lines.len()
                )))
            }
        };
        let second = Participant::Component(second);
        let guides = [
            self.line_guide(first, a)?,
            self.line_guide(first, b)?,
            self.guide(second, x)?,
        ];
        let axis = constrained_axis(&guides, config)?.ok_or_else(|| {
            DrawingError::AssemblyConflict("relative reference lines have no length".to_string())
        })?;

        let start = guides[0].coordinate(axis);
        let end = guides[1].coordinate(axis);
        let target = start + (end - start) * spacing.percent / 100.0;
        let nudge = spacing.correction / 100.0 * self.participant_rect(second).size_along(axis);
        Ok(Placement {
            axis,
            translation: Vector2::along(axis, target + nudge - guides[2].coordinate(axis)),
        })
    }
}
