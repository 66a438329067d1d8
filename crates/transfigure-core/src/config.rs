//! Editor configuration.

use crate::geometry::MIN_SHAPE_SIZE;
use crate::view::{DEFAULT_MARGIN, DEFAULT_ZOOM_PERCENT, ZOOM_RANGE_PERCENT};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What a pointer-move does when a selected shape has vanished from the
/// canonical store mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingShapePolicy {
    /// Skip that entry and keep updating the rest.
    #[default]
    Skip,
    /// Stop updating entries for the rest of that event.
    Halt,
}

/// Tunables for one editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width/height a resize may produce.
    pub min_shape_size: f64,
    /// Margin used when the container is too small to center the document.
    pub default_margin: f64,
    /// Zoom applied before the host reports one.
    pub default_zoom_percent: f64,
    /// Range hosts should clamp zoom input to.
    pub zoom_range_percent: (f64, f64),
    /// Unscaled document box.
    pub document_size: Size,
    /// Radius of the resize handles, in document units.
    pub handle_radius: f64,
    /// Distance from the top edge to the rotate affordance center.
    pub rotate_handle_offset: f64,
    pub rotate_handle_radius: f64,
    pub missing_shape_policy: MissingShapePolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_shape_size: MIN_SHAPE_SIZE,
            default_margin: DEFAULT_MARGIN,
            default_zoom_percent: DEFAULT_ZOOM_PERCENT,
            zoom_range_percent: ZOOM_RANGE_PERCENT,
            document_size: Size::new(500.0, 500.0),
            handle_radius: 6.0,
            rotate_handle_offset: 42.0,
            rotate_handle_radius: 12.0,
            missing_shape_policy: MissingShapePolicy::Skip,
        }
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {}", value),
        })
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("min_shape_size", self.min_shape_size)?;
        positive("default_zoom_percent", self.default_zoom_percent)?;
        positive("document_size.width", self.document_size.width)?;
        positive("document_size.height", self.document_size.height)?;
        positive("handle_radius", self.handle_radius)?;
        positive("rotate_handle_radius", self.rotate_handle_radius)?;

        if !(self.default_margin.is_finite() && self.default_margin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "default_margin",
                reason: format!("expected a non-negative number, got {}", self.default_margin),
            });
        }
        if !(self.rotate_handle_offset.is_finite() && self.rotate_handle_offset >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "rotate_handle_offset",
                reason: format!(
                    "expected a non-negative number, got {}",
                    self.rotate_handle_offset
                ),
            });
        }

        let (min, max) = self.zoom_range_percent;
        positive("zoom_range_percent.0", min)?;
        positive("zoom_range_percent.1", max)?;
        if min >= max {
            return Err(ConfigError::Invalid {
                field: "zoom_range_percent",
                reason: format!("range [{}, {}] is empty", min, max),
            });
        }
        Ok(())
    }

    /// Clamp a host zoom percentage into the configured range.
    pub fn clamp_zoom(&self, percent: f64) -> f64 {
        crate::view::clamp_zoom_percent(percent, self.zoom_range_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert!((config.min_shape_size - 30.0).abs() < f64::EPSILON);
        assert!((config.default_margin - 100.0).abs() < f64::EPSILON);
        assert!((config.default_zoom_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.missing_shape_policy, MissingShapePolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EditorConfig::from_json(
            r#"{"min_shape_size": 10, "missing_shape_policy": "halt"}"#,
        )
        .unwrap();
        assert!((config.min_shape_size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.missing_shape_policy, MissingShapePolicy::Halt);
        assert!((config.handle_radius - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig {
            document_size: Size::new(800.0, 600.0),
            ..EditorConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EditorConfig::from_json(r#"{"min_shape_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_shape_size", .. }));

        let err = EditorConfig::from_json(r#"{"zoom_range_percent": [200, 20]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom_range_percent", .. }));

        let err = EditorConfig::from_json(r#"{"default_margin": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "default_margin", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EditorConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_clamp_zoom() {
        let config = EditorConfig::default();
        assert!((config.clamp_zoom(5.0) - 20.0).abs() < f64::EPSILON);
        assert!((config.clamp_zoom(500.0) - 200.0).abs() < f64::EPSILON);
        assert!((config.clamp_zoom(150.0) - 150.0).abs() < f64::EPSILON);
    }
}
