//! Shared utilities for the exploded view.

/// Easing curves applied to scroll progress.
pub mod easing;
/// Frame clock and FPS tracking.
pub mod frame_timing;
