//! Tween scheduler
//!
//! A concrete [`AnimationEngine`] that runs property tweens against a clock
//! driven by the host (`tick`). One tween per property; a new command for a
//! property replaces the running tween and starts from the current value.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::command::{AnimatedProperty, AnimationCommand, AnimationEngine};
use crate::easing::Interpolator;

new_key_type! {
    pub struct TweenId;
}

/// A running tween from `start` to `end`
struct Tween {
    property: AnimatedProperty,
    start: f32,
    end: f32,
    duration_ms: u32,
    elapsed_ms: f32,
    interpolator: Arc<dyn Interpolator>,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).min(1.0)
    }

    fn value(&self) -> f32 {
        let eased = self.interpolator.interpolate(self.progress());
        self.start + (self.end - self.start) * eased
    }

    fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Runs tweens for animated properties
pub struct TweenScheduler {
    tweens: SlotMap<TweenId, Tween>,
    by_property: FxHashMap<AnimatedProperty, TweenId>,
    /// Last settled value of each property
    values: FxHashMap<AnimatedProperty, f32>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            by_property: FxHashMap::default(),
            values: FxHashMap::default(),
        }
    }

    /// Place a property without animating, cancelling any tween on it
    pub fn set_value(&mut self, property: AnimatedProperty, value: f32) {
        if let Some(id) = self.by_property.remove(&property) {
            self.tweens.remove(id);
        }
        self.values.insert(property, value);
    }

    /// Current value of a property, mid-tween if one is running
    pub fn value(&self, property: AnimatedProperty) -> Option<f32> {
        match self.by_property.get(&property).and_then(|id| self.tweens.get(*id)) {
            Some(tween) => Some(tween.value()),
            None => self.values.get(&property).copied(),
        }
    }

    /// Target of the running tween on a property
    pub fn target(&self, property: AnimatedProperty) -> Option<f32> {
        self.by_property
            .get(&property)
            .and_then(|id| self.tweens.get(*id))
            .map(|tween| tween.end)
    }

    /// Advance all tweens by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        let mut finished = Vec::new();
        for (id, tween) in self.tweens.iter_mut() {
            tween.elapsed_ms += dt_ms;
            if tween.is_finished() {
                finished.push(id);
            }
        }

        for id in finished {
            if let Some(tween) = self.tweens.remove(id) {
                tracing::trace!("tween on {} settled at {:.1}", tween.property, tween.end);
                self.by_property.remove(&tween.property);
                self.values.insert(tween.property, tween.end);
            }
        }
    }

    /// Check if any tweens are still running
    pub fn has_active_animations(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Number of running tweens
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine for TweenScheduler {
    fn animate(&mut self, command: AnimationCommand) {
        if command.is_snap() {
            self.set_value(command.property, command.target);
            return;
        }

        let start = self.value(command.property).unwrap_or(command.target);
        if let Some(id) = self.by_property.remove(&command.property) {
            self.tweens.remove(id);
            tracing::trace!("superseding tween on {}", command.property);
        }
        self.values.insert(command.property, start);

        let id = self.tweens.insert(Tween {
            property: command.property,
            start,
            end: command.target,
            duration_ms: command.duration_ms,
            elapsed_ms: 0.0,
            interpolator: command.interpolator,
        });
        self.by_property.insert(command.property, id);
    }

    fn is_animating(&self, property: AnimatedProperty) -> bool {
        self.target(property).is_some()
    }
}
