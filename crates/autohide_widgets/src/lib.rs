//! Autohide Widgets
//!
//! The floating control and the visibility state machine behind it.

pub mod control;
pub mod visibility;

pub use control::{
    FloatingControl, FloatingControlConfig, ListScrollState, ScrollListener,
    ShowTriggeredCallback,
};
pub use visibility::{
    MarginUpdate, Transition, TransitionSpec, Visibility, VisibilityController,
    DEFAULT_DURATION_MS, INSET_SNAP_THRESHOLD,
};
