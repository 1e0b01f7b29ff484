use crate::options::MotionOptions;
use crate::scroll::Progress;

/// Whole-object yaw, split into two independent contributions.
///
/// The idle term depends only on wall-clock time and keeps the garment
/// breathing while the page is stationary; the scroll term depends only on
/// progress. They are summed at render time and never stored together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMotion {
    idle_frequency: f32,
    idle_amplitude: f32,
    scroll_turn: f32,
}

impl Default for ObjectMotion {
    fn default() -> Self {
        Self::from_options(&MotionOptions::default())
    }
}

impl ObjectMotion {
    /// Motion parameters from options.
    #[must_use]
    pub fn from_options(options: &MotionOptions) -> Self {
        Self {
            idle_frequency: options.idle_frequency,
            idle_amplitude: options.idle_amplitude,
            scroll_turn: options.scroll_turn,
        }
    }

    /// `sin(seconds · frequency) · amplitude`.
    #[must_use]
    pub fn idle_yaw(&self, seconds: f32) -> f32 {
        (seconds * self.idle_frequency).sin() * self.idle_amplitude
    }

    /// Yaw contributed by scroll progress.
    #[must_use]
    pub fn scroll_yaw(&self, progress: Progress) -> f32 {
        progress.value() * self.scroll_turn
    }

    /// Total yaw at `seconds` since mount and `progress`.
    #[must_use]
    pub fn yaw(&self, seconds: f32, progress: Progress) -> f32 {
        self.idle_yaw(seconds) + self.scroll_yaw(progress)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn idle_yaw_oscillates_within_amplitude() {
        let motion = ObjectMotion::default();
        assert_eq!(motion.idle_yaw(0.0), 0.0);
        for i in 0..200 {
            let yaw = motion.idle_yaw(i as f32 * 0.37);
            assert!(yaw.abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn idle_continues_when_scroll_is_stationary() {
        let motion = ObjectMotion::default();
        let p = Progress::new(0.5);
        assert_ne!(motion.yaw(1.0, p), motion.yaw(2.0, p));
        let scroll_only = motion.yaw(1.0, p) - motion.idle_yaw(1.0);
        assert!((scroll_only - motion.scroll_yaw(p)).abs() < 1e-6);
    }

    #[test]
    fn scroll_yaw_is_time_independent() {
        let motion = ObjectMotion::default();
        assert_eq!(motion.scroll_yaw(Progress::START), 0.0);
        assert!((motion.scroll_yaw(Progress::END) - PI * 0.3).abs() < 1e-6);
    }
}
