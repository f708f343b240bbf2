//! Control configuration file handling (autohide.toml)

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use autohide_animation::{Easing, Interpolator};
use autohide_core::{AnchorConfig, AnchorEdge, DEFAULT_DIRECTION_THRESHOLD};
use autohide_widgets::{FloatingControlConfig, DEFAULT_DURATION_MS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up when a directory is given
pub const CONFIG_FILE_NAME: &str = "autohide.toml";

/// Invalid values in a control configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("margin must not be negative (got {0})")]
    NegativeMargin(i32),

    #[error("padding must not be negative (got {0})")]
    NegativePadding(i32),

    #[error("direction threshold must not be negative (got {0})")]
    NegativeThreshold(i32),

    #[error("unknown interpolator `{0}`")]
    UnknownInterpolator(String),

    #[error("element size must not be negative (got {0})")]
    NegativeElementSize(i32),

    #[error("screen size must not be negative (got {0})")]
    NegativeScreenSize(i32),

    #[error("display density must be positive (got {0})")]
    NonPositiveDensity(i32),
}

/// Top-level configuration (autohide.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AutohideConfig {
    #[serde(default)]
    pub anchor: AnchorSection,
    #[serde(default)]
    pub animation: AnimationSection,
    #[serde(default)]
    pub scroll: ScrollSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeName {
    Top,
    #[default]
    Bottom,
}

impl From<EdgeName> for AnchorEdge {
    fn from(edge: EdgeName) -> Self {
        match edge {
            EdgeName::Top => AnchorEdge::Top,
            EdgeName::Bottom => AnchorEdge::Bottom,
        }
    }
}

/// Where the control rests
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnchorSection {
    #[serde(default)]
    pub edge: EdgeName,
    #[serde(default)]
    pub margin: i32,
    #[serde(default)]
    pub padding: i32,
}

/// Show/hide animation
#[derive(Debug, Deserialize, Serialize)]
pub struct AnimationSection {
    #[serde(default = "default_duration")]
    pub duration_ms: u32,
    #[serde(default = "default_interpolator")]
    pub hide_interpolator: String,
    #[serde(default = "default_interpolator")]
    pub show_interpolator: String,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_interpolator() -> String {
    "linear_out_slow_in".to_string()
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            duration_ms: default_duration(),
            hide_interpolator: default_interpolator(),
            show_interpolator: default_interpolator(),
        }
    }
}

/// Scroll tracking
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrollSection {
    /// Pixels of movement before a direction change counts
    #[serde(default = "default_threshold")]
    pub threshold: i32,
    /// The followed list stacks from the bottom (chat-style)
    #[serde(default)]
    pub stack_from_bottom: bool,
}

fn default_threshold() -> i32 {
    DEFAULT_DIRECTION_THRESHOLD
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            stack_from_bottom: false,
        }
    }
}

fn interpolator(name: &str) -> Result<Arc<dyn Interpolator>, ConfigError> {
    Easing::from_name(name)
        .map(|easing| Arc::new(easing) as Arc<dyn Interpolator>)
        .ok_or_else(|| ConfigError::UnknownInterpolator(name.to_string()))
}

impl AutohideConfig {
    /// Load configuration from a directory (looks for autohide.toml) or a file
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE_NAME)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `autohide init` to create one.",
                CONFIG_FILE_NAME,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Validate and convert into the widget configuration
    pub fn control_config(&self) -> Result<FloatingControlConfig, ConfigError> {
        if self.anchor.margin < 0 {
            return Err(ConfigError::NegativeMargin(self.anchor.margin));
        }
        if self.anchor.padding < 0 {
            return Err(ConfigError::NegativePadding(self.anchor.padding));
        }
        if self.scroll.threshold < 0 {
            return Err(ConfigError::NegativeThreshold(self.scroll.threshold));
        }

        let anchor = AnchorConfig::new(
            self.anchor.edge.into(),
            self.anchor.margin,
            self.anchor.padding,
        );
        Ok(FloatingControlConfig::new(anchor)
            .duration_ms(self.animation.duration_ms)
            .hide_interpolator(interpolator(&self.animation.hide_interpolator)?)
            .show_interpolator(interpolator(&self.animation.show_interpolator)?)
            .direction_threshold(self.scroll.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AutohideConfig::from_toml("").unwrap();
        assert_eq!(config.anchor.edge, EdgeName::Bottom);
        assert_eq!(config.animation.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.scroll.threshold, DEFAULT_DIRECTION_THRESHOLD);
        assert!(!config.scroll.stack_from_bottom);
    }

    #[test]
    fn test_parse_full_file() {
        let config = AutohideConfig::from_toml(
            r#"
            [anchor]
            edge = "top"
            margin = 16
            padding = 4

            [animation]
            duration_ms = 300
            hide_interpolator = "fast_out_linear_in"

            [scroll]
            threshold = 12
            stack_from_bottom = true
            "#,
        )
        .unwrap();

        let control = config.control_config().unwrap();
        assert_eq!(control.anchor, AnchorConfig::new(AnchorEdge::Top, 16, 4));
        assert_eq!(control.duration_ms, 300);
        assert_eq!(control.direction_threshold, 12);
        assert!(config.scroll.stack_from_bottom);
    }

    #[test]
    fn test_rejects_unknown_interpolator() {
        let mut config = AutohideConfig::default();
        config.animation.show_interpolator = "wobble".to_string();
        assert_eq!(
            config.control_config().err(),
            Some(ConfigError::UnknownInterpolator("wobble".to_string()))
        );
    }

    #[test]
    fn test_rejects_negative_margin() {
        let mut config = AutohideConfig::default();
        config.anchor.margin = -4;
        assert_eq!(
            config.control_config().err(),
            Some(ConfigError::NegativeMargin(-4))
        );
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = AutohideConfig::default().to_toml().unwrap();
        let parsed = AutohideConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.animation.hide_interpolator, "linear_out_slow_in");
        assert_eq!(parsed.anchor.edge, EdgeName::Bottom);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = std::env::temp_dir().join("autohide-config-missing-test");
        let err = AutohideConfig::load_from_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("No autohide.toml found"));
    }
}
