//! # panelcad
//!
//! Document model and assembly positioning engine for two-dimensional door,
//! window and panel drawings.
//!
//! A drawing is a tree of [`DocumentNode`]s. Each node owns a collection of
//! geometric entities, its layers and reference points, and two kinds of
//! children: partners, docked next to each other by joint points, and
//! components, positioned by named alignment constraints
//! ([`Connection`]s).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use panelcad::io::json::{JsonReader, JsonWriter};
//!
//! let mut doc = JsonReader::from_file("door.json")?.read()?;
//! doc.update_partners();
//! for failure in doc.update_components() {
//!     eprintln!("{failure}");
//! }
//! JsonWriter::new(&doc).pretty().write_to_file("door.assembled.json")?;
//! # Ok::<(), panelcad::DrawingError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Entity`] - trait shared by every drawable variant
//! - [`EntityCollection`] - a node's entities grouped per variant
//! - [`DocumentNode`] - the tree: merge, separate, transform, layout
//! - [`assembly`] - connection resolution, conflict pruning and the move cascade
//! - [`dimension_geometry`] - rendered points of linear dimensions

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod assembly;
pub mod collection;
pub mod config;
pub mod dimension_geometry;
pub mod document;
pub mod entities;
pub mod error;
pub mod id;
pub mod io;
pub mod layer;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use assembly::{AssemblyFailure, Connection, Position};
pub use collection::EntityCollection;
pub use config::{Config, LayoutConfig};
pub use dimension_geometry::DimensionPoints;
pub use document::{BaseLine, Components, DocumentNode, JointPoint};
pub use error::{DrawingError, Result};
pub use layer::{Layer, LayerList};
pub use types::{Axis, AxisMask, BoundingBox2D, Color, LineWeight, Transform, Vector2};

// Re-export entity types
pub use entities::{
    Arc, Circle, Dimension, Entity, EntityKind, EntityType, Hatch, Image, Insert, Leader, Line,
    MText, Spline,
};
