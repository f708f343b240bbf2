//! Integration tests for scroll detection + visibility + tween scheduling
//!
//! These tests verify that:
//! - A list fling hides and reveals the control end to end
//! - Layout drift is honoured by later show transitions
//! - Margin and configuration changes reposition without animating
//! - The tween scheduler ends up where the issued commands say

use std::sync::Arc;

use autohide_animation::{AnimatedProperty, AnimationCommand, Easing, TweenScheduler};
use autohide_core::{
    AnchorConfig, Configuration, ElementGeometry, Orientation, PositionTargets, ScrollSample,
};
use autohide_widgets::{
    FloatingControl, FloatingControlConfig, MarginUpdate, ScrollListener, Transition,
};

fn portrait() -> Configuration {
    Configuration {
        screen_height_dp: 800,
        ..Default::default()
    }
}

fn bottom_fab<E: autohide_animation::AnimationEngine>(engine: E) -> FloatingControl<E> {
    let config = FloatingControlConfig::new(AnchorConfig::bottom(16))
        .duration_ms(200)
        .interpolator(Arc::new(Easing::Linear));
    let mut fab = FloatingControl::new(config, engine);
    fab.attach(portrait(), 0);
    fab
}

/// Bottom anchor, margin 16, 56px element, 800px container: fling down then up
#[test]
fn test_fling_hides_and_reveals() {
    let mut fab = bottom_fab(Vec::<AnimationCommand>::new());
    fab.on_layout(ElementGeometry::new(56), 728.0);
    fab.listen_to(false);

    assert_eq!(
        fab.targets(),
        Some(PositionTargets {
            shown_y: 728.0,
            hidden_y: 800.0
        })
    );

    // Prime and warm up inside row 2 with small pixel moves
    assert_eq!(fab.on_scroll(ScrollSample::new(2, 0)), None);
    assert_eq!(fab.on_scroll(ScrollSample::new(2, -3)), None);
    assert_eq!(fab.on_scroll(ScrollSample::new(2, -5)), None);

    // Fling skips rows: hide regardless of pixel deltas
    assert_eq!(
        fab.on_scroll(ScrollSample::new(5, -200)),
        Some(Transition::Issued { target_y: 800.0 })
    );
    assert!(fab.is_hidden());

    assert_eq!(
        fab.on_scroll(ScrollSample::new(2, -5)),
        Some(Transition::Issued { target_y: 728.0 })
    );
    assert!(!fab.is_hidden());

    let commands = fab.engine();
    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|c| c.duration_ms == 200));
}

#[test]
fn test_repeated_hide_requests_issue_one_command() {
    let mut fab = bottom_fab(Vec::<AnimationCommand>::new());
    fab.on_layout(ElementGeometry::new(56), 728.0);

    assert!(fab.set_hidden(true).is_issued());
    assert_eq!(fab.set_hidden(true), Transition::NoOp);
    assert_eq!(fab.engine().len(), 1);
}

#[test]
fn test_layout_drift_carries_into_show() {
    let mut fab = bottom_fab(Vec::<AnimationCommand>::new());
    fab.on_layout(ElementGeometry::new(56), 726.0);

    fab.set_hidden(true);
    assert_eq!(fab.set_hidden(false), Transition::Issued { target_y: 726.0 });
}

#[test]
fn test_margin_change_while_shown_is_a_snap() {
    let mut fab = bottom_fab(Vec::<AnimationCommand>::new());
    fab.on_layout(ElementGeometry::new(56), 728.0);

    assert_eq!(
        fab.set_show_margin(32),
        MarginUpdate::Snapped { target_y: 712.0 }
    );
    let commands = fab.engine();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].duration_ms, 0);
    assert_eq!(commands[0].target, 712.0);
}

#[test]
fn test_scheduler_follows_transitions() {
    let mut scheduler = TweenScheduler::new();
    scheduler.set_value(AnimatedProperty::Y, 728.0);

    let mut fab = bottom_fab(scheduler);
    fab.on_layout(ElementGeometry::new(56), 728.0);

    fab.set_hidden(true);
    fab.engine_mut().tick(100.0);
    assert_eq!(fab.engine().value(AnimatedProperty::Y), Some(764.0));

    // Reverse mid-flight; the new tween starts where the old one was
    fab.set_hidden(false);
    assert_eq!(fab.engine().value(AnimatedProperty::Y), Some(764.0));
    fab.engine_mut().tick(200.0);
    assert_eq!(fab.engine().value(AnimatedProperty::Y), Some(728.0));
    assert!(!fab.engine().has_active_animations());
}

#[test]
fn test_rotation_while_hidden_then_show() {
    let mut fab = bottom_fab(Vec::<AnimationCommand>::new());
    fab.on_layout(ElementGeometry::new(56), 728.0);
    fab.set_hidden(true);

    fab.on_configuration_changed(Configuration {
        orientation: Orientation::Landscape,
        screen_width_dp: 800,
        screen_height_dp: 400,
        ..portrait()
    });
    fab.on_layout(ElementGeometry::new(56), 400.0);

    // Inset is not captured while hidden, so the show lands on the raw target
    assert_eq!(fab.inset(), None);
    assert_eq!(fab.set_hidden(false), Transition::Issued { target_y: 328.0 });
}
