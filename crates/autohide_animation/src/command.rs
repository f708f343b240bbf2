//! Animation commands and the engine contract
//!
//! A command says "tween this property to `target` over `duration_ms` using
//! `interpolator`". The engine owns the tween; the caller never awaits it.

use std::fmt;
use std::sync::Arc;

use crate::easing::Interpolator;

/// Property an animation command drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Absolute vertical position of the element
    Y,
}

impl fmt::Display for AnimatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatedProperty::Y => f.write_str("y"),
        }
    }
}

/// A single request to tween a property
#[derive(Clone)]
pub struct AnimationCommand {
    pub property: AnimatedProperty,
    pub target: f32,
    pub duration_ms: u32,
    pub interpolator: Arc<dyn Interpolator>,
}

impl AnimationCommand {
    /// Tween the Y property
    pub fn y(target: f32, duration_ms: u32, interpolator: Arc<dyn Interpolator>) -> Self {
        Self {
            property: AnimatedProperty::Y,
            target,
            duration_ms,
            interpolator,
        }
    }

    /// Whether this command places the property immediately
    pub fn is_snap(&self) -> bool {
        self.duration_ms == 0
    }
}

impl fmt::Debug for AnimationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationCommand")
            .field("property", &self.property)
            .field("target", &self.target)
            .field("duration_ms", &self.duration_ms)
            .field("interpolator", &self.interpolator)
            .finish()
    }
}

/// Anything that can perform a tween.
///
/// A command for a property that is still animating supersedes the running
/// tween (last writer wins on the target value).
pub trait AnimationEngine {
    fn animate(&mut self, command: AnimationCommand);

    /// Whether a tween on `property` is still running. Engines without a
    /// clock report `false`.
    fn is_animating(&self, _property: AnimatedProperty) -> bool {
        false
    }
}

/// Collects commands without running them. Handy for hosts that forward
/// commands elsewhere and for asserting on issued commands.
impl AnimationEngine for Vec<AnimationCommand> {
    fn animate(&mut self, command: AnimationCommand) {
        self.push(command);
    }
}

impl<E: AnimationEngine + ?Sized> AnimationEngine for &mut E {
    fn animate(&mut self, command: AnimationCommand) {
        (**self).animate(command);
    }

    fn is_animating(&self, property: AnimatedProperty) -> bool {
        (**self).is_animating(property)
    }
}

impl<E: AnimationEngine + ?Sized> AnimationEngine for Box<E> {
    fn animate(&mut self, command: AnimationCommand) {
        (**self).animate(command);
    }

    fn is_animating(&self, property: AnimatedProperty) -> bool {
        (**self).is_animating(property)
    }
}
