use web_time::{Duration, Instant};

/// Wall-clock bookkeeping for the render loop.
///
/// Tracks seconds elapsed since mount (the input of the idle rotation) and
/// a smoothed FPS estimate. Scroll progress never reads this clock.
pub struct FrameClock {
    /// Mount timestamp; elapsed time is measured from here.
    started: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames counted since mount.
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a clock at an explicit instant.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Seconds elapsed between mount and `now` (0 if `now` precedes mount).
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    /// Record a frame at `now` and update the FPS estimate.
    pub fn tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        if elapsed > Duration::ZERO {
            let instant_fps = 1.0 / elapsed.as_secs_f32();
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of frames recorded since mount.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_measured_from_mount() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start);
        let later = start + Duration::from_millis(1500);
        assert!((clock.elapsed_at(later) - 1.5).abs() < 1e-6);
        assert_eq!(clock.elapsed_at(start), 0.0);
    }

    #[test]
    fn ticks_count_frames_and_track_fps() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=120 {
            clock.tick(start + Duration::from_micros(16_667 * i));
        }
        assert_eq!(clock.frames(), 120);
        assert!((clock.fps() - 60.0).abs() < 1.0);
    }

    #[test]
    fn duplicate_timestamps_do_not_poison_fps() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick(start);
        assert!(clock.fps().is_finite());
    }
}
