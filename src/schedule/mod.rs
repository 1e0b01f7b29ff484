//! Frame scheduling and teardown.
//!
//! Everything runs on one thread. The host's animation-frame callback and
//! its unmount path share a [`Liveness`] flag; once the flag is cleared,
//! any tick that was already queued returns without touching the scene.

use std::cell::Cell;
use std::rc::Rc;

/// Shared "still mounted" flag.
///
/// Clones observe the same flag. Cancelling is idempotent.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    /// A live flag.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// Whether the owner is still mounted.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    /// Mark the owner as torn down.
    pub fn cancel(&self) {
        if self.0.replace(false) {
            log::debug!("frame loop cancelled");
        }
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame callback ran; the host should request another frame.
    Rendered,
    /// The loop has been torn down; the host must not reschedule.
    Cancelled,
}

/// Gate around a per-frame callback.
///
/// The callback receives the host timestamp in milliseconds (as passed to
/// `requestAnimationFrame` callbacks or derived from a native clock).
pub struct FrameLoop<F> {
    liveness: Liveness,
    frame: F,
    ticks: u64,
}

impl<F: FnMut(f64)> FrameLoop<F> {
    /// Loop over `frame`, stopped by `liveness`.
    pub fn new(liveness: Liveness, frame: F) -> Self {
        Self {
            liveness,
            frame,
            ticks: 0,
        }
    }

    /// Run one frame unless the loop has been cancelled.
    pub fn tick(&mut self, timestamp: f64) -> FrameOutcome {
        if !self.liveness.is_alive() {
            log::trace!("late frame at {timestamp:.1}ms ignored");
            return FrameOutcome::Cancelled;
        }
        self.ticks += 1;
        (self.frame)(timestamp);
        FrameOutcome::Rendered
    }

    /// Frames actually run.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handle to the flag this loop watches.
    #[must_use]
    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn runs_frames_while_alive() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut frames = FrameLoop::new(Liveness::new(), move |t| sink.borrow_mut().push(t));
        assert_eq!(frames.tick(16.0), FrameOutcome::Rendered);
        assert_eq!(frames.tick(32.0), FrameOutcome::Rendered);
        assert_eq!(*seen.borrow(), [16.0, 32.0]);
        assert_eq!(frames.ticks(), 2);
    }

    #[test]
    fn no_frames_after_teardown() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let liveness = Liveness::new();
        let mut frames = FrameLoop::new(liveness.clone(), move |_| counter.set(counter.get() + 1));
        let _ = frames.tick(0.0);
        liveness.cancel();
        for t in [16.0, 32.0, 48.0] {
            assert_eq!(frames.tick(t), FrameOutcome::Cancelled);
        }
        assert_eq!(count.get(), 1);
        assert_eq!(frames.ticks(), 1);
    }

    #[test]
    fn tick_queued_before_teardown_is_a_no_op() {
        // The host captured the loop in an already-scheduled callback, then
        // unmounted before that callback fired.
        let touched = Rc::new(Cell::new(false));
        let flag = Rc::clone(&touched);
        let liveness = Liveness::new();
        let pending = Rc::new(RefCell::new(FrameLoop::new(liveness.clone(), move |_| {
            flag.set(true);
        })));
        let queued = Rc::clone(&pending);

        liveness.cancel();
        let outcome = queued.borrow_mut().tick(100.0);

        assert_eq!(outcome, FrameOutcome::Cancelled);
        assert!(!touched.get());
    }

    #[test]
    fn cancel_is_idempotent_and_shared() {
        let a = Liveness::new();
        let b = a.clone();
        assert!(b.is_alive());
        a.cancel();
        a.cancel();
        assert!(!b.is_alive());
    }
}
