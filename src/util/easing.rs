//! Easing curves for reshaping scroll progress.
//!
//! The pose interpolator is strictly linear in progress. Any easing is
//! applied here, upstream, by remapping the clamped progress before it is
//! published. Every curve maps 0 to 0 and 1 to 1 exactly so the boundary
//! poses are unaffected by the choice of curve.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for progress curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Identity mapping (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Hermite smoothstep, `3t² - 2t³`.
    SmoothStep,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Evaluate the curve at `t`.
    ///
    /// Input is clamped to [0.0, 1.0]; NaN evaluates to 0.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}
