//! Layout and logging configuration
//!
//! Configuration is optional: every field has a default, and
//! [`Config::discover`] falls back to [`Config::default`] when no file is
//! present.

use crate::error::{DrawingError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "PANELCAD_CONFIG";

/// File looked up in the working directory when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "panelcad.json";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an explicit JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| DrawingError::Config(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| DrawingError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Discover configuration: `PANELCAD_CONFIG` first, then
    /// `./panelcad.json`, else defaults.
    pub fn discover() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .map_err(|e| DrawingError::Config(format!("failed to get working directory: {e}")))?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Tolerances and distances used by partner/component placement and by the
/// assembly engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Gap left between a node and a partner placed beside it
    #[serde(default = "LayoutConfig::default_partner_margin")]
    pub partner_margin: f64,
    /// A component is only moved beside its parent when it is farther than
    /// this on either axis
    #[serde(default = "LayoutConfig::default_component_snap_threshold")]
    pub component_snap_threshold: f64,
    /// Maximum |cross| of two unit directions still considered parallel
    #[serde(default = "LayoutConfig::default_tolerance")]
    pub parallel_tolerance: f64,
    /// Maximum off-axis component of a unit direction still considered
    /// axis-aligned
    #[serde(default = "LayoutConfig::default_tolerance")]
    pub axis_tolerance: f64,
}

impl LayoutConfig {
    fn default_partner_margin() -> f64 {
        15.0
    }

    fn default_component_snap_threshold() -> f64 {
        1500.0
    }

    fn default_tolerance() -> f64 {
        1e-3
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            partner_margin: Self::default_partner_margin(),
            component_snap_threshold: Self::default_component_snap_threshold(),
            parallel_tolerance: Self::default_tolerance(),
            axis_tolerance: Self::default_tolerance(),
        }
    }
}

/// Logging configuration, read by the binary only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.partner_margin, 15.0);
        assert_eq!(layout.component_snap_threshold, 1500.0);
        assert_eq!(layout.parallel_tolerance, 1e-3);
        assert_eq!(layout.axis_tolerance, 1e-3);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"layout": {"partnerMargin": 40}}"#).unwrap();
        assert_eq!(cfg.layout.partner_margin, 40.0);
        assert_eq!(cfg.layout.component_snap_threshold, 1500.0);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("panelcad-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"logging": {"level": "debug"}}"#).unwrap();
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.layout, LayoutConfig::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/panelcad.json").unwrap_err();
        assert!(matches!(err, DrawingError::Config(_)));
    }
}
