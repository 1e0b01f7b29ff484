//! Linear interpolation primitives with exact endpoints.
//!
//! `a + (b - a) * t` does not reproduce `b` at `t = 1` in floating point,
//! so the helpers here use forms that hit both boundaries bit-for-bit.

use glam::Vec3;

/// `base + offset * t`; exactly `base` at 0 and exactly `base + offset`
/// at 1.
#[inline]
#[must_use]
pub fn offset_by(base: Vec3, offset: Vec3, t: f32) -> Vec3 {
    base + offset * t
}

/// Blend from `start` to `end`; exactly `start` at 0 and exactly `end` at 1.
#[inline]
#[must_use]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Scale an Euler offset by `t`.
#[inline]
#[must_use]
pub fn scale_angles(offset: Vec3, t: f32) -> Vec3 {
    offset * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_hits_both_endpoints_exactly() {
        let base = Vec3::new(-1.6, 0.1, 0.0);
        let offset = Vec3::new(-1.5, 0.4, -1.0);
        assert_eq!(offset_by(base, offset, 0.0), base);
        assert_eq!(offset_by(base, offset, 1.0), base + offset);
    }

    #[test]
    fn lerp_hits_both_endpoints_exactly() {
        for (a, b) in [(0.2_f32, 1.0_f32), (0.3, 0.7), (0.1, 0.9)] {
            assert_eq!(lerp_f32(a, b, 0.0), a);
            assert_eq!(lerp_f32(a, b, 1.0), b);
        }
    }

    #[test]
    fn lerp_is_linear_in_between() {
        assert!((lerp_f32(0.0, 100.0, 0.25) - 25.0).abs() < 1e-4);
        assert!((lerp_f32(0.2, 1.0, 0.5) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn angles_scale_from_zero() {
        let offset = Vec3::new(0.0, 0.0, 0.4);
        assert_eq!(scale_angles(offset, 0.0), Vec3::ZERO);
        assert_eq!(scale_angles(offset, 1.0), offset);
    }
}
