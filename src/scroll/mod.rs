//! Scroll progress tracking.
//!
//! Turns host scroll/viewport geometry into a single clamped
//! [`Progress`] value. Two strategies share one interface
//! ([`TrackingMode`]): full-page scrolling and an element embedded in a
//! longer page. Degenerate geometry (nothing to scroll) resolves to
//! progress 0 locally and is never reported as an error.

mod progress;
mod tracker;

pub use progress::Progress;
pub use tracker::{ScrollSample, ScrollTracker, TrackingMode};
