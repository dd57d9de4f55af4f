//! Runtime configuration.
//!
//! Defaults come from the `constants` crate. A `gallery.config.json` asset may
//! override any subset of fields; missing fields keep their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use constants::notification::{DEFAULT_DURATION_MS, ERROR_DURATION_MS};
use constants::render_settings::{RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS};
use constants::session::{OPTIONAL_FEATURES, REQUIRED_FEATURES};
use constants::transform::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, ROTATE_STEP_DEGREES, ZOOM_STEP};

/// Relative asset path of the optional configuration file.
pub const CONFIG_ASSET_PATH: &str = "gallery.config.json";

/// Relative asset path of the optional catalog file.
pub const CATALOG_ASSET_PATH: &str = "gallery.catalog.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid transform limits: {0}")]
    InvalidLimits(String),

    #[error("invalid reticle: {0}")]
    InvalidReticle(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Clamp bounds and step sizes for the transform controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformLimits {
    pub default_scale: f32,
    pub zoom_step: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub rotate_step_degrees: f32,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            default_scale: DEFAULT_SCALE,
            zoom_step: ZOOM_STEP,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            rotate_step_degrees: ROTATE_STEP_DEGREES,
        }
    }
}

impl TransformLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::InvalidLimits(format!(
                "min_scale {} must be positive and not above max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.min_scale..=self.max_scale).contains(&self.default_scale) {
            return Err(ConfigError::InvalidLimits(format!(
                "default_scale {} outside [{}, {}]",
                self.default_scale, self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 0.0 || self.rotate_step_degrees <= 0.0 {
            return Err(ConfigError::InvalidLimits(
                "zoom and rotate steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Feature flags passed to the platform when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub required_features: Vec<String>,
    pub optional_features: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            required_features: REQUIRED_FEATURES.iter().map(|f| f.to_string()).collect(),
            optional_features: OPTIONAL_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub duration_ms: u32,
    pub error_duration_ms: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            error_duration_ms: ERROR_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleSettings {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl ReticleSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.inner_radius >= 0.0 && self.inner_radius < self.outer_radius) {
            return Err(ConfigError::InvalidReticle(format!(
                "inner_radius {} must be non-negative and below outer_radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if !self.outer_radius.is_finite() {
            return Err(ConfigError::InvalidReticle(format!(
                "outer_radius {} must be finite",
                self.outer_radius
            )));
        }
        Ok(())
    }
}

impl Default for ReticleSettings {
    fn default() -> Self {
        Self {
            inner_radius: RETICLE_INNER_RADIUS,
            outer_radius: RETICLE_OUTER_RADIUS,
        }
    }
}

/// Top-level configuration, loadable from JSON.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub transform: TransformLimits,
    pub session: SessionOptions,
    pub notifications: NotificationSettings,
    pub reticle: ReticleSettings,
    /// Native builds only: treat the mouse ray against the ground plane as a
    /// hit-test source and report a simulated AR runtime.
    pub desktop_simulation: bool,
}

impl GalleryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transform.validate()?;
        self.reticle.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = GalleryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.transform.max_scale, 3.0);
        assert_eq!(config.transform.min_scale, 0.2);
        assert_eq!(config.session.required_features, vec!["hit-test"]);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            GalleryConfig::from_json_str(r#"{ "transform": { "max_scale": 2.0 }, "desktop_simulation": true }"#)
                .unwrap();
        assert_eq!(config.transform.max_scale, 2.0);
        assert_eq!(config.transform.zoom_step, 0.2);
        assert!(config.desktop_simulation);
    }

    #[test]
    fn inverted_limits_rejected() {
        let result = GalleryConfig::from_json_str(
            r#"{ "transform": { "min_scale": 2.0, "max_scale": 1.0 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidLimits(_))));
    }

    #[test]
    fn inverted_or_negative_reticle_rejected() {
        for reticle in [
            r#"{ "inner_radius": 0.2, "outer_radius": 0.1 }"#,
            r#"{ "inner_radius": 0.1, "outer_radius": 0.1 }"#,
            r#"{ "inner_radius": -0.1, "outer_radius": 0.15 }"#,
        ] {
            let result = GalleryConfig::from_json_str(&format!(r#"{{ "reticle": {} }}"#, reticle));
            assert!(matches!(result, Err(ConfigError::InvalidReticle(_))), "{reticle}");
        }
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            GalleryConfig::from_json_str("{ transform"),
            Err(ConfigError::Parse(_))
        ));
    }
}
