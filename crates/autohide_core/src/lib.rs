//! Autohide Core
//!
//! The pure algorithms behind a floating control that hides while a list is
//! scrolled one way and returns when it is scrolled back:
//!
//! - **Direction detection**: hysteresis over first-visible-row samples
//! - **Resting positions**: shown/hidden offsets from anchor, element and container
//! - **Configuration diffing**: which host changes invalidate those offsets
//!
//! # Example
//!
//! ```rust
//! use autohide_core::{AnchorConfig, ContainerBounds, PositionCalculator};
//!
//! let targets = PositionCalculator::compute_targets(
//!     &AnchorConfig::bottom(16),
//!     56,
//!     &ContainerBounds::new(800, 0),
//! );
//! assert_eq!(targets.hidden_y, 800.0);
//! assert_eq!(targets.shown_y, 728.0);
//! ```

pub mod configuration;
pub mod direction;
pub mod geometry;

pub use configuration::{ConfigChanges, Configuration, LayoutDirection, Orientation};
pub use direction::{
    DirectionSignal, ScrollDirectionDetector, ScrollSample, DEFAULT_DIRECTION_THRESHOLD,
};
pub use geometry::{
    AnchorConfig, AnchorEdge, ContainerBounds, ElementGeometry, PositionCalculator,
    PositionTargets,
};
