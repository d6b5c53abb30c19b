//! Stock interpolation functions.
//!
//! Every function maps a progress fraction through `[0, 1]` to an eased
//! fraction, then lerps. `Cosine` runs from the end value back toward the
//! start (its factor begins at 1), which is intended: paired with `Sine`
//! it gives mirror-image ease curves.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

/// Basic parametric lerp; every stock function reduces to this.
#[inline]
pub fn lerp(start: f32, end: f32, percent: f32) -> f32 {
    start + (end - start) * percent
}

/// The stock interpolation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenFunction {
    /// Straight lerp.
    #[default]
    Linear,
    /// `3p² − 2p³`, eases both ends.
    Smoothstep,
    /// `p²`, accelerating from zero.
    QuadraticEaseIn,
    /// `2p − p²`, decelerating to zero.
    QuadraticEaseOut,
    /// `sin(pπ/2)`.
    Sine,
    /// `cos(pπ/2)`.
    Cosine,
}

impl TweenFunction {
    /// The eased fraction for a raw progress fraction.
    pub fn factor(self, percent: f32) -> f32 {
        let p = percent;
        match self {
            TweenFunction::Linear => p,
            TweenFunction::Smoothstep => 3.0 * p * p - 2.0 * p * p * p,
            TweenFunction::QuadraticEaseIn => p * p,
            TweenFunction::QuadraticEaseOut => 2.0 * p - p * p,
            TweenFunction::Sine => (p * FRAC_PI_2).sin(),
            TweenFunction::Cosine => (p * FRAC_PI_2).cos(),
        }
    }

    pub fn eval(self, start: f32, end: f32, percent: f32) -> f32 {
        lerp(start, end, self.factor(percent))
    }
}

/// A value a tween can animate. Vector, list and color values
/// interpolate elementwise.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vec2(Vec2),
    /// An arbitrary sequence of floats. Mismatched lengths interpolate
    /// pairwise up to the shorter list.
    List(Vec<f32>),
    /// RGBA, each channel in `[0, 1]`.
    Color([f32; 4]),
}

impl TweenValue {
    /// Interpolate between two values of the same kind. Mismatched kinds
    /// are a caller bug; the start value is returned unchanged.
    pub fn interpolate(
        function: TweenFunction,
        start: &TweenValue,
        end: &TweenValue,
        percent: f32,
    ) -> TweenValue {
        match (start, end) {
            (TweenValue::Scalar(s), TweenValue::Scalar(e)) => {
                TweenValue::Scalar(function.eval(*s, *e, percent))
            }
            (TweenValue::Vec2(s), TweenValue::Vec2(e)) => TweenValue::Vec2(Vec2::new(
                function.eval(s.x, e.x, percent),
                function.eval(s.y, e.y, percent),
            )),
            (TweenValue::List(s), TweenValue::List(e)) => TweenValue::List(
                s.iter()
                    .zip(e.iter())
                    .map(|(&s, &e)| function.eval(s, e, percent))
                    .collect(),
            ),
            (TweenValue::Color(s), TweenValue::Color(e)) => {
                let mut out = [0.0; 4];
                for i in 0..4 {
                    out[i] = function.eval(s[i], e[i], percent);
                }
                TweenValue::Color(out)
            }
            (start, end) => {
                log::warn!("tween kind mismatch: {:?} vs {:?}", start, end);
                start.clone()
            }
        }
    }
}
