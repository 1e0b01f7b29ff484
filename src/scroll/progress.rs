use std::fmt;

/// Normalized scroll advancement through the tracked region.
///
/// Every constructor clamps into `[0, 1]` and maps NaN to 0, so holding a
/// `Progress` is proof that the invariant `0 ≤ p ≤ 1` holds. Upstream values
/// are never trusted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f32);

impl Progress {
    /// Fully assembled.
    pub const START: Self = Self(0.0);
    /// Fully exploded.
    pub const END: Self = Self(1.0);

    /// Clamp a raw value into a progress.
    #[must_use]
    pub fn new(raw: f32) -> Self {
        if raw.is_nan() {
            Self::START
        } else {
            Self(raw.clamp(0.0, 1.0))
        }
    }

    /// Ratio `numerator / denominator`, clamped.
    ///
    /// Returns [`Progress::START`] when the denominator is not strictly
    /// positive or either operand is non-finite.
    #[must_use]
    pub fn ratio(numerator: f32, denominator: f32) -> Self {
        if !numerator.is_finite()
            || !denominator.is_finite()
            || denominator <= 0.0
        {
            return Self::START;
        }
        Self::new(numerator / denominator)
    }

    /// The underlying value.
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether the progress has reached `threshold` (inclusive).
    #[inline]
    #[must_use]
    pub fn reached(self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

impl From<f32> for Progress {
    fn from(raw: f32) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Progress::new(-3.0).value(), 0.0);
        assert_eq!(Progress::new(7.5).value(), 1.0);
        assert_eq!(Progress::new(0.25).value(), 0.25);
        assert_eq!(Progress::new(f32::NAN), Progress::START);
        assert_eq!(Progress::new(f32::INFINITY), Progress::END);
    }

    #[test]
    fn ratio_guards_degenerate_denominators() {
        assert_eq!(Progress::ratio(10.0, 0.0), Progress::START);
        assert_eq!(Progress::ratio(10.0, -5.0), Progress::START);
        assert_eq!(Progress::ratio(0.0, 0.0), Progress::START);
        assert_eq!(Progress::ratio(f32::INFINITY, 2.0), Progress::START);
        assert_eq!(Progress::ratio(1.0, 4.0).value(), 0.25);
    }

    #[test]
    fn reached_is_inclusive() {
        assert!(Progress::new(0.5).reached(0.5));
        assert!(!Progress::new(0.499_99).reached(0.5));
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(Progress::new(0.5).to_string(), "50.0%");
    }
}
