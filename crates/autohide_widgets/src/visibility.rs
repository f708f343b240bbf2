//! Visibility controller
//!
//! Owns the authoritative hidden flag, the cached resting positions and the
//! layout inset. Every genuine change of the hidden flag produces exactly one
//! animation command; repeated requests for the current state do nothing.
//!
//! The inset is the drift between where the control was asked to rest and
//! where the host layout actually put it on its first visible layout. Show
//! transitions target `shown_y - inset` so they land where the host placed the
//! control instead of fighting the layout.

use std::sync::Arc;

use autohide_animation::{AnimatedProperty, AnimationCommand, AnimationEngine, Interpolator};
use autohide_core::{
    AnchorConfig, AnchorEdge, ContainerBounds, ElementGeometry, PositionCalculator,
    PositionTargets,
};

/// Drift at or below this many pixels is treated as rendering noise
pub const INSET_SNAP_THRESHOLD: f32 = 1.0;

/// Default show/hide duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 200;

/// Visibility state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Hidden)
    }

    /// State reached by a hide/show request, or None if already there
    pub fn on_request(&self, hide: bool) -> Option<Self> {
        let next = Self::from_hidden(hide);
        (next != *self).then_some(next)
    }
}

/// Outcome of a hide/show request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// State flipped and one animation command was issued
    Issued { target_y: f32 },
    /// Already in the requested state
    NoOp,
    /// State flipped before the first layout; placement happens on layout
    Deferred,
}

impl Transition {
    pub fn is_issued(&self) -> bool {
        matches!(self, Transition::Issued { .. })
    }
}

/// Outcome of changing the show margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginUpdate {
    /// Shown control was moved to its new resting offset without animating
    Snapped { target_y: f32 },
    /// Hidden control; the new offset applies on the next show
    Recomputed,
    /// Not laid out yet: the host should apply this margin to its layout
    LayoutMargin(i32),
}

/// Animation parameters for show/hide transitions
#[derive(Debug, Clone)]
pub struct TransitionSpec {
    pub duration_ms: u32,
    pub hide_interpolator: Arc<dyn Interpolator>,
    pub show_interpolator: Arc<dyn Interpolator>,
}

impl TransitionSpec {
    pub fn new(
        duration_ms: u32,
        hide_interpolator: Arc<dyn Interpolator>,
        show_interpolator: Arc<dyn Interpolator>,
    ) -> Self {
        Self {
            duration_ms,
            hide_interpolator,
            show_interpolator,
        }
    }

    fn interpolator(&self, hide: bool) -> Arc<dyn Interpolator> {
        if hide {
            Arc::clone(&self.hide_interpolator)
        } else {
            Arc::clone(&self.show_interpolator)
        }
    }
}

/// Resolves hide/show requests into animation commands
pub struct VisibilityController<E: AnimationEngine> {
    anchor: AnchorConfig,
    transition: TransitionSpec,
    visibility: Visibility,
    inset: Option<f32>,
    bounds: Option<ContainerBounds>,
    element: Option<ElementGeometry>,
    targets: Option<PositionTargets>,
    /// A hide was requested before the first layout
    pending_hide: bool,
    engine: E,
}

impl<E: AnimationEngine> VisibilityController<E> {
    pub fn new(anchor: AnchorConfig, transition: TransitionSpec, engine: E) -> Self {
        Self {
            anchor,
            transition,
            visibility: Visibility::Shown,
            inset: None,
            bounds: None,
            element: None,
            targets: None,
            pending_hide: false,
            engine,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn anchor(&self) -> &AnchorConfig {
        &self.anchor
    }

    pub fn transition_spec(&self) -> &TransitionSpec {
        &self.transition
    }

    /// Captured layout inset, if any
    pub fn inset(&self) -> Option<f32> {
        self.inset
    }

    /// Cached resting positions, if still valid
    pub fn targets(&self) -> Option<PositionTargets> {
        self.targets
    }

    pub fn bounds(&self) -> Option<ContainerBounds> {
        self.bounds
    }

    /// Whether the control has been through at least one layout pass
    pub fn is_laid_out(&self) -> bool {
        self.element.is_some()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Update container bounds; a change invalidates cached geometry
    pub fn set_bounds(&mut self, bounds: ContainerBounds) {
        if self.bounds != Some(bounds) {
            self.bounds = Some(bounds);
            self.invalidate_geometry();
        }
    }

    /// Discard cached positions and the inset; the next layout recomputes both
    pub fn invalidate_geometry(&mut self) {
        if self.targets.is_some() || self.inset.is_some() {
            tracing::debug!(
                "geometry invalidated (was targets={:?}, inset={:?})",
                self.targets,
                self.inset
            );
        }
        self.targets = None;
        self.inset = None;
    }

    /// Resting positions, recomputed if stale.
    ///
    /// Returns None before the first layout, or before bounds are known for a
    /// bottom-anchored control.
    pub fn resolve_targets(&mut self) -> Option<PositionTargets> {
        if let Some(targets) = self.targets {
            return Some(targets);
        }

        let element = self.element?;
        let bounds = match (self.bounds, self.anchor.edge) {
            (Some(bounds), _) => bounds,
            (None, AnchorEdge::Top) => ContainerBounds::default(),
            (None, AnchorEdge::Bottom) => return None,
        };

        let targets = PositionCalculator::compute_targets(&self.anchor, element.height, &bounds);
        tracing::debug!(
            "resting positions: shown_y={:.1} hidden_y={:.1} (height={}, offset={}, container={})",
            targets.shown_y,
            targets.hidden_y,
            element.height,
            self.anchor.offset(),
            bounds.height
        );
        self.targets = Some(targets);
        Some(targets)
    }

    /// Layout hook, called once per host layout pass with the element's
    /// measured size and the Y at which the host actually placed it.
    ///
    /// Returns the Y the control was snapped to when a hide requested before
    /// the first layout is placed.
    pub fn on_layout(&mut self, element: ElementGeometry, actual_y: f32) -> Option<f32> {
        if self.element.is_some_and(|prev| prev != element) {
            self.invalidate_geometry();
        }
        self.element = Some(element);

        let targets = self.resolve_targets()?;

        let mut placed = None;
        if self.pending_hide {
            self.pending_hide = false;
            if self.is_hidden() {
                tracing::debug!("placing pre-layout hidden control at {:.1}", targets.hidden_y);
                self.engine.animate(AnimationCommand::y(
                    targets.hidden_y,
                    0,
                    self.transition.interpolator(true),
                ));
                placed = Some(targets.hidden_y);
            }
        }

        if !self.is_hidden() && self.inset.is_none() {
            // Mid-show positions are tween output, not host drift
            if self.engine.is_animating(AnimatedProperty::Y) {
                tracing::trace!("show in flight at {:.1}, inset capture postponed", actual_y);
                return placed;
            }

            let mut inset = targets.shown_y - actual_y;
            if inset.abs() <= INSET_SNAP_THRESHOLD {
                inset = 0.0;
            }
            tracing::debug!(
                "captured inset {:.1} (requested {:.1}, rendered at {:.1})",
                inset,
                targets.shown_y,
                actual_y
            );
            self.inset = Some(inset);
        }
        placed
    }

    /// Offset a show transition lands on
    fn shown_target(&self, targets: &PositionTargets) -> f32 {
        targets.shown_y - self.inset.unwrap_or(0.0)
    }

    /// Request the hidden (`true`) or shown (`false`) state
    pub fn set_hidden(&mut self, hide: bool) -> Transition {
        let Some(next) = self.visibility.on_request(hide) else {
            return Transition::NoOp;
        };
        self.visibility = next;

        let Some(targets) = self.resolve_targets() else {
            self.pending_hide = hide;
            tracing::debug!("{} requested before layout", if hide { "hide" } else { "show" });
            return Transition::Deferred;
        };

        let target_y = if hide {
            targets.hidden_y
        } else {
            self.shown_target(&targets)
        };

        tracing::debug!("{} to y={:.1}", if hide { "hide" } else { "show" }, target_y);
        self.engine.animate(AnimationCommand::y(
            target_y,
            self.transition.duration_ms,
            self.transition.interpolator(hide),
        ));
        Transition::Issued { target_y }
    }

    /// Change the margin kept from the anchored edge while shown
    pub fn set_show_margin(&mut self, margin: i32) -> MarginUpdate {
        self.anchor.margin = margin;

        if !self.is_laid_out() {
            return MarginUpdate::LayoutMargin(margin);
        }

        self.invalidate_geometry();
        let Some(targets) = self.resolve_targets() else {
            return MarginUpdate::LayoutMargin(margin);
        };

        if self.is_hidden() {
            return MarginUpdate::Recomputed;
        }

        let target_y = self.shown_target(&targets);
        tracing::debug!("margin now {}, snapping to y={:.1}", margin, target_y);
        self.engine.animate(AnimationCommand::y(
            target_y,
            0,
            self.transition.interpolator(false),
        ));
        MarginUpdate::Snapped { target_y }
    }
}
