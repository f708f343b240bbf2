//! Floating control that hides while a list scrolls
//!
//! [`FloatingControl`] is the host-facing widget. It wires a scroll source to
//! a [`ScrollDirectionDetector`], feeds the resulting intents to a
//! [`VisibilityController`], and turns host lifecycle callbacks (attach,
//! detach, configuration change, layout) into explicit geometry refreshes.
//!
//! # Example
//!
//! ```rust
//! use autohide_animation::AnimationCommand;
//! use autohide_core::{AnchorConfig, Configuration, ElementGeometry, ScrollSample};
//! use autohide_widgets::{FloatingControl, FloatingControlConfig, ScrollListener};
//!
//! let config = FloatingControlConfig::new(AnchorConfig::bottom(16));
//! let mut fab = FloatingControl::new(config, Vec::<AnimationCommand>::new());
//!
//! fab.attach(Configuration { screen_height_dp: 800, ..Default::default() }, 0);
//! fab.on_layout(ElementGeometry::new(56), 728.0);
//! fab.listen_to(false);
//!
//! for row in [0, 0, 1, 2] {
//!     fab.on_scroll(ScrollSample::new(row, 0));
//! }
//! assert!(fab.is_hidden());
//! ```

use std::sync::Arc;

use autohide_animation::{AnimationEngine, Easing, Interpolator};
use autohide_core::{
    AnchorConfig, ConfigChanges, Configuration, ElementGeometry, PositionTargets,
    ScrollDirectionDetector, ScrollSample, DEFAULT_DIRECTION_THRESHOLD,
};

use crate::visibility::{
    MarginUpdate, Transition, TransitionSpec, Visibility, VisibilityController,
    DEFAULT_DURATION_MS,
};

/// Callback invoked when scrolling actually shows (`true`) or hides (`false`)
/// the control
pub type ShowTriggeredCallback = Box<dyn FnMut(bool) + Send>;

/// Scroll state reported by a list; not used for direction detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScrollState {
    #[default]
    Idle,
    TouchScroll,
    Fling,
}

/// Receiver of list scroll notifications
pub trait ScrollListener {
    /// Scroll progress: topmost visible row and its top offset in pixels
    fn on_scroll(&mut self, sample: ScrollSample) -> Option<Transition>;

    fn on_scroll_state_changed(&mut self, _state: ListScrollState) {}
}

/// Floating control configuration
#[derive(Clone, Debug)]
pub struct FloatingControlConfig {
    pub anchor: AnchorConfig,
    /// Show/hide animation duration
    pub duration_ms: u32,
    pub hide_interpolator: Arc<dyn Interpolator>,
    pub show_interpolator: Arc<dyn Interpolator>,
    /// Minimum scroll movement, in pixels, that counts as a direction change
    pub direction_threshold: i32,
}

impl Default for FloatingControlConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorConfig::default(),
            duration_ms: DEFAULT_DURATION_MS,
            hide_interpolator: Arc::new(Easing::linear_out_slow_in()),
            show_interpolator: Arc::new(Easing::linear_out_slow_in()),
            direction_threshold: DEFAULT_DIRECTION_THRESHOLD,
        }
    }
}

impl FloatingControlConfig {
    pub fn new(anchor: AnchorConfig) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// Set the show/hide duration
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the curve used when hiding
    pub fn hide_interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.hide_interpolator = interpolator;
        self
    }

    /// Set the curve used when showing
    pub fn show_interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.show_interpolator = interpolator;
        self
    }

    /// Use one curve for both directions
    pub fn interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.hide_interpolator = Arc::clone(&interpolator);
        self.show_interpolator = interpolator;
        self
    }

    /// Set the direction-change threshold in pixels
    pub fn direction_threshold(mut self, threshold: i32) -> Self {
        self.direction_threshold = threshold;
        self
    }
}

/// A floating control anchored to a screen edge that auto-hides on scroll
pub struct FloatingControl<E: AnimationEngine> {
    controller: VisibilityController<E>,
    detector: Option<ScrollDirectionDetector>,
    direction_threshold: i32,
    configuration: Option<Configuration>,
    status_bar_inset: i32,
    on_show_triggered: Option<ShowTriggeredCallback>,
}

impl<E: AnimationEngine> FloatingControl<E> {
    pub fn new(config: FloatingControlConfig, engine: E) -> Self {
        let transition = TransitionSpec::new(
            config.duration_ms,
            config.hide_interpolator,
            config.show_interpolator,
        );
        Self {
            controller: VisibilityController::new(config.anchor, transition, engine),
            detector: None,
            direction_threshold: config.direction_threshold,
            configuration: None,
            status_bar_inset: 0,
            on_show_triggered: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Host attached the control to a window
    pub fn attach(&mut self, configuration: Configuration, status_bar_inset: i32) {
        self.status_bar_inset = status_bar_inset;
        self.configuration = Some(configuration);
        self.controller
            .set_bounds(configuration.container_bounds(status_bar_inset));
        tracing::debug!(
            "attached: container height {} (status bar {})",
            configuration.container_bounds(status_bar_inset).height,
            status_bar_inset
        );
    }

    /// Host detached the control; the next configuration is treated as new
    pub fn detach(&mut self) {
        self.configuration = None;
    }

    /// Host configuration changed (rotation, resize, locale direction, ...).
    ///
    /// Returns the fields considered changed. With no previous configuration,
    /// the change is treated as a rotation.
    pub fn on_configuration_changed(&mut self, configuration: Configuration) -> ConfigChanges {
        let changes = match &self.configuration {
            Some(previous) => previous.diff(&configuration),
            None => ConfigChanges::ORIENTATION,
        };

        if changes.affects_geometry() {
            tracing::debug!("configuration changed: {:?}", changes.names());
            self.controller
                .set_bounds(configuration.container_bounds(self.status_bar_inset));
            self.controller.invalidate_geometry();
        }

        self.configuration = Some(configuration);
        changes
    }

    /// Host layout pass finished. Returns the Y a pre-layout hide was
    /// snapped to, if this layout placed one.
    pub fn on_layout(&mut self, element: ElementGeometry, actual_y: f32) -> Option<f32> {
        self.controller.on_layout(element, actual_y)
    }

    // =========================================================================
    // Scroll wiring
    // =========================================================================

    /// Start following a list's scrolling.
    ///
    /// Lists that stack from the bottom reverse the convention: scrolling
    /// down reveals older content, so the control hides when scrolling up.
    pub fn listen_to(&mut self, stack_from_bottom: bool) {
        self.detector = Some(ScrollDirectionDetector::new(
            self.direction_threshold,
            !stack_from_bottom,
        ));
    }

    /// Stop following scroll events
    pub fn stop_listening(&mut self) {
        self.detector = None;
    }

    pub fn is_listening(&self) -> bool {
        self.detector.is_some()
    }

    /// Register the show-triggered hook
    pub fn on_show_triggered<F: FnMut(bool) + Send + 'static>(&mut self, callback: F) {
        self.on_show_triggered = Some(Box::new(callback));
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Hide (`true`) or show (`false`) the control
    pub fn set_hidden(&mut self, hide: bool) -> Transition {
        self.controller.set_hidden(hide)
    }

    /// Change the margin kept from the anchored edge
    pub fn set_show_margin(&mut self, margin: i32) -> MarginUpdate {
        self.controller.set_show_margin(margin)
    }

    pub fn is_hidden(&self) -> bool {
        self.controller.is_hidden()
    }

    pub fn visibility(&self) -> Visibility {
        self.controller.visibility()
    }

    /// Current resting positions, recomputed if stale
    pub fn targets(&mut self) -> Option<PositionTargets> {
        self.controller.resolve_targets()
    }

    pub fn inset(&self) -> Option<f32> {
        self.controller.inset()
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    pub fn show_interpolator(&self) -> Arc<dyn Interpolator> {
        Arc::clone(&self.controller.transition_spec().show_interpolator)
    }

    pub fn hide_interpolator(&self) -> Arc<dyn Interpolator> {
        Arc::clone(&self.controller.transition_spec().hide_interpolator)
    }

    pub fn show_hide_duration(&self) -> u32 {
        self.controller.transition_spec().duration_ms
    }

    pub fn controller(&self) -> &VisibilityController<E> {
        &self.controller
    }

    pub fn engine(&self) -> &E {
        self.controller.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.controller.engine_mut()
    }
}

impl<E: AnimationEngine> ScrollListener for FloatingControl<E> {
    fn on_scroll(&mut self, sample: ScrollSample) -> Option<Transition> {
        let signal = self.detector.as_mut()?.observe(sample)?;
        let transition = self.controller.set_hidden(signal.hide);

        if transition != Transition::NoOp {
            if let Some(callback) = self.on_show_triggered.as_mut() {
                callback(!signal.hide);
            }
        }
        Some(transition)
    }
}
