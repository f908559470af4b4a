//! Error types for panelcad

use std::io;
use thiserror::Error;

/// Main error type for drawing and assembly operations
#[derive(Debug, Error)]
pub enum DrawingError {
    /// Malformed constructor payload
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unrecognized entity variant tag or bucket name
    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    /// Entity reference could not be resolved
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Component reference could not be resolved
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Alignment lines not parallel, or not axis-aligned where an axis is required
    #[error("Geometry constraint violation: {0}")]
    GeometryConstraintViolation(String),

    /// Malformed relative spacing specification
    #[error("Format error: {0}")]
    FormatError(String),

    /// No axis could be determined from the given inputs
    #[error("Assembly conflict: {0}")]
    AssemblyConflict(String),

    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for panelcad operations
pub type Result<T> = std::result::Result<T, DrawingError>;

impl From<String> for DrawingError {
    fn from(s: String) -> Self {
        DrawingError::Custom(s)
    }
}

impl From<&str> for DrawingError {
    fn from(s: &str) -> Self {
        DrawingError::Custom(s.to_string())
    }
}
