//! Autohide Animation
//!
//! Easing curves, the animation command contract, and a tween scheduler.
//!
//! # Features
//!
//! - **Injected interpolators**: curves are strategy objects, not global lookups
//! - **Command contract**: "tween property P to T over D ms with curve I"
//! - **Last writer wins**: a new command on a property supersedes the running tween

pub mod command;
pub mod easing;
pub mod scheduler;

pub use command::{AnimatedProperty, AnimationCommand, AnimationEngine};
pub use easing::{Easing, Interpolator};
pub use scheduler::{TweenId, TweenScheduler};
