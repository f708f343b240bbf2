//! Scenario runner that replays host events against a floating control.

use anyhow::{Context, Result};
use autohide_animation::{AnimatedProperty, TweenScheduler};
use autohide_core::{ElementGeometry, ScrollSample};
use autohide_widgets::{
    FloatingControl, FloatingControlConfig, MarginUpdate, ScrollListener, Transition,
};
use serde::Serialize;

use crate::config::ConfigError;
use crate::scenario::{Scenario, ScenarioStep};

/// What a step did to the control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Nothing observable
    None,
    Animated { target_y: f32 },
    NoOp,
    Deferred,
    Snapped { target_y: f32 },
    /// Host must apply the margin to its own layout
    LayoutMargin { margin: i32 },
}

impl From<Transition> for StepOutcome {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Issued { target_y } => StepOutcome::Animated { target_y },
            Transition::NoOp => StepOutcome::NoOp,
            Transition::Deferred => StepOutcome::Deferred,
        }
    }
}

impl From<MarginUpdate> for StepOutcome {
    fn from(update: MarginUpdate) -> Self {
        match update {
            MarginUpdate::Snapped { target_y } => StepOutcome::Snapped { target_y },
            MarginUpdate::Recomputed => StepOutcome::None,
            MarginUpdate::LayoutMargin(margin) => StepOutcome::LayoutMargin { margin },
        }
    }
}

/// Per-step record
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step_index: usize,
    pub step: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub hidden: bool,
    pub y: Option<f32>,
}

/// Result of replaying a whole scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepRecord>,
    pub hidden: bool,
    pub final_y: Option<f32>,
    pub shown_y: Option<f32>,
    pub hidden_y: Option<f32>,
    pub inset: Option<f32>,
}

impl ScenarioReport {
    /// Steps that started an animated transition
    pub fn animated_targets(&self) -> Vec<f32> {
        self.steps
            .iter()
            .filter_map(|record| match record.outcome {
                StepOutcome::Animated { target_y } => Some(target_y),
                _ => None,
            })
            .collect()
    }
}

/// Replay `scenario` against a control built from `config`
pub fn run_scenario(
    config: FloatingControlConfig,
    stack_from_bottom: bool,
    scenario: &Scenario,
) -> Result<ScenarioReport> {
    let mut fab = FloatingControl::new(config, TweenScheduler::new());
    fab.listen_to(stack_from_bottom);

    let mut records = Vec::with_capacity(scenario.steps.len());
    for (step_index, step) in scenario.steps.iter().enumerate() {
        let outcome = apply_step(&mut fab, step_index, step)?;
        let y = fab.engine().value(AnimatedProperty::Y);
        tracing::debug!("step {}: {:?} -> {:?} (y={:?})", step_index, step, outcome, y);
        records.push(StepRecord {
            step_index,
            step: step_name(step).to_string(),
            outcome,
            hidden: fab.is_hidden(),
            y,
        });
    }

    let targets = fab.targets();
    Ok(ScenarioReport {
        steps: records,
        hidden: fab.is_hidden(),
        final_y: fab.engine().value(AnimatedProperty::Y),
        shown_y: targets.map(|t| t.shown_y),
        hidden_y: targets.map(|t| t.hidden_y),
        inset: fab.inset(),
    })
}

fn apply_step(
    fab: &mut FloatingControl<TweenScheduler>,
    step_index: usize,
    step: &ScenarioStep,
) -> Result<StepOutcome> {
    let outcome = match step {
        ScenarioStep::Attach(display) => {
            let configuration = display
                .configuration()
                .with_context(|| format!("step {}: invalid display", step_index))?;
            fab.attach(configuration, display.status_bar);
            StepOutcome::None
        }
        ScenarioStep::ConfigurationChanged(display) => {
            let configuration = display
                .configuration()
                .with_context(|| format!("step {}: invalid display", step_index))?;
            fab.on_configuration_changed(configuration);
            StepOutcome::None
        }
        ScenarioStep::Detach => {
            fab.detach();
            StepOutcome::None
        }
        ScenarioStep::Layout { height, y } => {
            if *height < 0 {
                return Err(ConfigError::NegativeElementSize(*height))
                    .with_context(|| format!("step {}: invalid layout", step_index));
            }
            if fab.engine().value(AnimatedProperty::Y).is_none() {
                fab.engine_mut().set_value(AnimatedProperty::Y, *y);
            }
            fab.on_layout(ElementGeometry::new(*height), *y)
                .map(|target_y| StepOutcome::Snapped { target_y })
                .unwrap_or(StepOutcome::None)
        }
        ScenarioStep::Scroll { row, top } => fab
            .on_scroll(ScrollSample::new(*row, *top))
            .map(StepOutcome::from)
            .unwrap_or(StepOutcome::None),
        ScenarioStep::SetHidden { hidden } => fab.set_hidden(*hidden).into(),
        ScenarioStep::SetMargin { margin } => {
            if *margin < 0 {
                return Err(ConfigError::NegativeMargin(*margin))
                    .with_context(|| format!("step {}: invalid margin", step_index));
            }
            fab.set_show_margin(*margin).into()
        }
        ScenarioStep::Tick { ms } => {
            fab.engine_mut().tick(*ms);
            StepOutcome::None
        }
    };
    Ok(outcome)
}

fn step_name(step: &ScenarioStep) -> &'static str {
    match step {
        ScenarioStep::Attach(_) => "attach",
        ScenarioStep::ConfigurationChanged(_) => "configuration_changed",
        ScenarioStep::Detach => "detach",
        ScenarioStep::Layout { .. } => "layout",
        ScenarioStep::Scroll { .. } => "scroll",
        ScenarioStep::SetHidden { .. } => "set_hidden",
        ScenarioStep::SetMargin { .. } => "set_margin",
        ScenarioStep::Tick { .. } => "tick",
    }
}
