//! Easing curves and the interpolator strategy
//!
//! The visibility controller never looks up platform curves itself; the owner
//! injects an [`Interpolator`] for hiding and one for showing. [`Easing`] covers
//! the curves a mobile platform ships by default.

use std::fmt::Debug;

/// Maps linear animation progress to eased progress.
///
/// Implementations must return 0.0 at `t = 0.0` and 1.0 at `t = 1.0`.
pub trait Interpolator: Debug + Send + Sync {
    /// Apply the curve to a progress value (0.0 to 1.0)
    fn interpolate(&self, t: f32) -> f32;
}

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start and end, fast middle (cosine curve)
    AccelerateDecelerate,
    /// Quadratic ease-in
    Accelerate,
    /// Quadratic ease-out
    Decelerate,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Material "linear out, slow in" curve used for showing
    pub const fn linear_out_slow_in() -> Self {
        Easing::CubicBezier(0.0, 0.0, 0.2, 1.0)
    }

    /// Material "fast out, linear in" curve used for hiding
    pub const fn fast_out_linear_in() -> Self {
        Easing::CubicBezier(0.4, 0.0, 1.0, 1.0)
    }

    /// Material "fast out, slow in" curve
    pub const fn fast_out_slow_in() -> Self {
        Easing::CubicBezier(0.4, 0.0, 0.2, 1.0)
    }

    /// Resolve a curve by name, as written in control configuration files.
    ///
    /// Accepts `linear`, `accelerate_decelerate`, `accelerate`, `decelerate`,
    /// `linear_out_slow_in`, `fast_out_linear_in` and `fast_out_slow_in`.
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Easing::Linear,
            "accelerate_decelerate" => Easing::AccelerateDecelerate,
            "accelerate" => Easing::Accelerate,
            "decelerate" => Easing::Decelerate,
            "linear_out_slow_in" => Self::linear_out_slow_in(),
            "fast_out_linear_in" => Self::fast_out_linear_in(),
            "fast_out_slow_in" => Self::fast_out_slow_in(),
            _ => return None,
        };
        Some(easing)
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

impl Interpolator for Easing {
    fn interpolate(&self, t: f32) -> f32 {
        self.apply(t.clamp(0.0, 1.0))
    }
}

/// Polynomial coefficients of one axis of a unit cubic bezier whose end
/// points are (0,0) and (1,1): `B(s) = ((a*s + b)*s + c)*s`.
#[derive(Clone, Copy)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn sample(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    #[inline]
    fn slope(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

const BEZIER_EPSILON: f64 = 1e-7;

/// Evaluate a platform path curve at progress `t`.
///
/// Finds the curve parameter whose X equals `t` (Newton steps, then
/// bisection when the slope flattens out) and returns the Y there.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x_axis = BezierAxis::new(x1, x2);
    let y_axis = BezierAxis::new(y1, y2);
    let x = t as f64;

    let s = newton_solve(&x_axis, x).unwrap_or_else(|| bisect_solve(&x_axis, x));
    y_axis.sample(s) as f32
}

fn newton_solve(axis: &BezierAxis, x: f64) -> Option<f64> {
    let mut s = x;
    for _ in 0..8 {
        let err = axis.sample(s) - x;
        if err.abs() < BEZIER_EPSILON {
            return Some(s);
        }
        let slope = axis.slope(s);
        if slope.abs() < BEZIER_EPSILON {
            return None;
        }
        s -= err / slope;
    }
    None
}

fn bisect_solve(axis: &BezierAxis, x: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut s = x;
    for _ in 0..20 {
        let sampled = axis.sample(s);
        if (sampled - x).abs() < BEZIER_EPSILON {
            break;
        }
        if sampled < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}
