use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::is_valid_line_width;

/// Errors that can occur while loading a board configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for the drawing tools.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Stroke color selected at startup
    pub default_color: String,
    /// Line width selected at startup
    pub default_line_width: f64,
    /// Line widths offered by the tool panel
    pub line_widths: Vec<f64>,
    /// Colors offered by the tool panel
    pub palette: Vec<String>,
    /// Minimum time between two recorded samples of a freehand line
    pub line_throttle_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_color: "#ffffff".to_owned(),
            default_line_width: 20.0,
            line_widths: vec![20.0, 30.0, 40.0],
            palette: ["#ffffff", "#000000", "#f5222d", "#fadb14", "#52c41a", "#1677ff"]
                .into_iter()
                .map(String::from)
                .collect(),
            line_throttle_ms: 50,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_line_width(self.default_line_width) {
            return Err(ConfigError::Invalid(format!(
                "default_line_width must be positive, got {}",
                self.default_line_width
            )));
        }
        if let Some(width) = self.line_widths.iter().find(|width| !is_valid_line_width(**width)) {
            return Err(ConfigError::Invalid(format!(
                "line widths must be positive, got {width}"
            )));
        }
        if let Some(color) = std::iter::once(&self.default_color)
            .chain(&self.palette)
            .find(|color| !color.starts_with('#'))
        {
            return Err(ConfigError::Invalid(format!(
                "colors must be hex strings, got {color:?}"
            )));
        }
        Ok(())
    }

    pub fn line_throttle(&self) -> Duration {
        Duration::from_millis(self.line_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.line_widths, vec![20.0, 30.0, 40.0]);
        assert_eq!(config.line_throttle(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BoardConfig::from_json_str(r##"{ "default_color": "#000000" }"##).unwrap();
        assert_eq!(config.default_color, "#000000");
        assert_eq!(config.default_line_width, 20.0);
        assert_eq!(config.line_throttle_ms, 50);
    }

    #[test]
    fn test_rejects_non_positive_widths() {
        let result = BoardConfig::from_json_str(r#"{ "line_widths": [20, 0] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = BoardConfig::from_json_str(r#"{ "default_line_width": -1 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_colors_and_bad_json() {
        let result = BoardConfig::from_json_str(r#"{ "palette": ["red"] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = BoardConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = BoardConfig::load("/definitely/not/here/board.json");
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
