//! Scenario definition for replaying host events against a control.

use std::path::Path;

use anyhow::{Context, Result};
use autohide_core::{Configuration, LayoutDirection, Orientation};
use serde::Deserialize;

use crate::config::ConfigError;

/// Sequence of host events to replay
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// One host event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Attach(DisplaySpec),
    ConfigurationChanged(DisplaySpec),
    Detach,
    /// Host layout pass placed the control at `y`
    Layout { height: i32, y: f32 },
    /// List scroll progress
    Scroll { row: i32, top: i32 },
    SetHidden { hidden: bool },
    SetMargin { margin: i32 },
    /// Advance the animation clock
    Tick { ms: f32 },
}

/// Display configuration as written in scenario files
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySpec {
    pub screen_height_dp: i32,
    #[serde(default = "default_width")]
    pub screen_width_dp: i32,
    #[serde(default = "default_density")]
    pub density_dpi: i32,
    #[serde(default)]
    pub status_bar: i32,
    #[serde(default)]
    pub landscape: bool,
    #[serde(default)]
    pub rtl: bool,
}

fn default_width() -> i32 {
    360
}

fn default_density() -> i32 {
    autohide_core::configuration::DENSITY_DEFAULT
}

impl DisplaySpec {
    /// Validate and convert into a display configuration
    pub fn configuration(&self) -> Result<Configuration, ConfigError> {
        if self.density_dpi <= 0 {
            return Err(ConfigError::NonPositiveDensity(self.density_dpi));
        }
        for size in [self.screen_height_dp, self.screen_width_dp, self.status_bar] {
            if size < 0 {
                return Err(ConfigError::NegativeScreenSize(size));
            }
        }

        Ok(Configuration {
            orientation: if self.landscape {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            },
            screen_width_dp: self.screen_width_dp,
            screen_height_dp: self.screen_height_dp,
            density_dpi: self.density_dpi,
            layout_direction: if self.rtl {
                LayoutDirection::Rtl
            } else {
                LayoutDirection::Ltr
            },
            screen_layout: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "steps": [
                    { "type": "attach", "screen_height_dp": 400, "density_dpi": 320 },
                    { "type": "layout", "height": 56, "y": 728 },
                    { "type": "scroll", "row": 2, "top": -10 },
                    { "type": "set_hidden", "hidden": true },
                    { "type": "set_margin", "margin": 32 },
                    { "type": "tick", "ms": 16.6 },
                    { "type": "configuration_changed", "screen_height_dp": 360, "landscape": true },
                    { "type": "detach" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 8);
        match &scenario.steps[0] {
            ScenarioStep::Attach(display) => {
                assert_eq!(display.configuration().unwrap().screen_height_px(), 800);
                assert_eq!(display.status_bar, 0);
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert!(matches!(
            scenario.steps[2],
            ScenarioStep::Scroll { row: 2, top: -10 }
        ));
        match &scenario.steps[6] {
            ScenarioStep::ConfigurationChanged(display) => {
                assert_eq!(
                    display.configuration().unwrap().orientation,
                    Orientation::Landscape
                );
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_display_validation() {
        let display = |json: &str| -> DisplaySpec { serde_json::from_str(json).unwrap() };

        assert_eq!(
            display(r#"{ "screen_height_dp": 800, "density_dpi": 0 }"#)
                .configuration()
                .unwrap_err(),
            ConfigError::NonPositiveDensity(0)
        );
        assert_eq!(
            display(r#"{ "screen_height_dp": -5 }"#)
                .configuration()
                .unwrap_err(),
            ConfigError::NegativeScreenSize(-5)
        );
        assert_eq!(
            display(r#"{ "screen_height_dp": 800, "status_bar": -24 }"#)
                .configuration()
                .unwrap_err(),
            ConfigError::NegativeScreenSize(-24)
        );
        assert!(display(r#"{ "screen_height_dp": 800 }"#).configuration().is_ok());
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        assert!(Scenario::from_json(r#"{ "steps": [ { "type": "wiggle" } ] }"#).is_err());
    }
}
