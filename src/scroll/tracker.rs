use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::progress::Progress;
use crate::util::easing::EasingFunction;

/// Raw scroll and viewport geometry reported by the host, in CSS pixels.
///
/// Only the fields relevant to the active [`TrackingMode`] are read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSample {
    /// Vertical scroll offset of the document.
    pub scroll_top: f32,
    /// Height of the visible viewport.
    pub viewport_height: f32,
    /// Total height of the document.
    pub document_height: f32,
    /// Top of the tracked element relative to the viewport.
    pub element_top: f32,
    /// Height of the tracked element.
    pub element_height: f32,
}

impl ScrollSample {
    /// Sample for a full-page tracker.
    #[must_use]
    pub fn page(
        scroll_top: f32,
        viewport_height: f32,
        document_height: f32,
    ) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
            ..Self::default()
        }
    }

    /// Sample for a windowed tracker.
    #[must_use]
    pub fn element(
        element_top: f32,
        element_height: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            element_top,
            element_height,
            viewport_height,
            ..Self::default()
        }
    }
}

/// How scroll geometry is turned into progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// The whole document scrolls the view from assembled to exploded.
    #[default]
    FullPage,
    /// Progress follows an element embedded in a longer page, from fully
    /// below the viewport to fully above it.
    Windowed,
}

impl TrackingMode {
    /// Clamped, un-eased progress for `sample`.
    #[must_use]
    pub fn progress(self, sample: &ScrollSample) -> Progress {
        match self {
            Self::FullPage => {
                let scrollable =
                    sample.document_height - sample.viewport_height;
                if scrollable <= 0.0 {
                    log::debug!(
                        "document not scrollable ({scrollable}px), progress \
                         pinned to 0"
                    );
                }
                Progress::ratio(sample.scroll_top, scrollable)
            }
            Self::Windowed => {
                let total = sample.viewport_height + sample.element_height;
                if total <= 0.0 {
                    log::debug!(
                        "tracked element has no travel ({total}px), \
                         progress pinned to 0"
                    );
                }
                let traveled = sample.viewport_height - sample.element_top;
                Progress::ratio(traveled, total)
            }
        }
    }
}

/// Stateful progress source: strategy, upstream easing and the last
/// published value.
///
/// Consumers compare [`generation`](Self::generation) against the value
/// they last saw to detect a change without subscribing callbacks.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    mode: TrackingMode,
    easing: EasingFunction,
    progress: Progress,
    generation: u64,
}

impl ScrollTracker {
    /// Tracker with linear progress.
    #[must_use]
    pub fn new(mode: TrackingMode) -> Self {
        Self::with_easing(mode, EasingFunction::Linear)
    }

    /// Tracker that reshapes progress with `easing` before publishing it.
    #[must_use]
    pub fn with_easing(mode: TrackingMode, easing: EasingFunction) -> Self {
        Self {
            mode,
            easing,
            progress: Progress::START,
            generation: 0,
        }
    }

    /// Active strategy.
    #[must_use]
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Swap strategy and easing. The published progress is kept until the
    /// next sample.
    pub fn reconfigure(&mut self, mode: TrackingMode, easing: EasingFunction) {
        self.mode = mode;
        self.easing = easing;
    }

    /// Recompute progress from fresh host geometry and publish it.
    pub fn sample(&mut self, sample: &ScrollSample) -> Progress {
        let linear = self.mode.progress(sample);
        let eased = Progress::new(self.easing.evaluate(linear.value()));
        log::trace!("scroll sample {sample:?} -> {eased}");
        self.publish(eased)
    }

    /// Publish an externally computed progress (clamped on the way in).
    pub fn set(&mut self, raw: f32) -> Progress {
        self.publish(Progress::new(raw))
    }

    fn publish(&mut self, next: Progress) -> Progress {
        if next != self.progress {
            self.progress = next;
            self.generation += 1;
        }
        self.progress
    }

    /// Last published progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Incremented every time the published progress changes.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_progress_is_scroll_over_scrollable_height() {
        let sample = ScrollSample::page(500.0, 1000.0, 3000.0);
        assert_eq!(TrackingMode::FullPage.progress(&sample).value(), 0.25);
    }

    #[test]
    fn full_page_clamps_overscroll() {
        let scrollable = 2000.0;
        let below = ScrollSample::page(-500.0, 1000.0, 3000.0);
        let above = ScrollSample::page(scrollable + 1000.0, 1000.0, 3000.0);
        assert_eq!(TrackingMode::FullPage.progress(&below), Progress::START);
        assert_eq!(TrackingMode::FullPage.progress(&above), Progress::END);
    }

    #[test]
    fn full_page_without_scrollable_height_is_zero() {
        let short_page = ScrollSample::page(40.0, 1000.0, 800.0);
        let exact_fit = ScrollSample::page(40.0, 1000.0, 1000.0);
        assert_eq!(
            TrackingMode::FullPage.progress(&short_page),
            Progress::START
        );
        assert_eq!(
            TrackingMode::FullPage.progress(&exact_fit),
            Progress::START
        );
    }

    #[test]
    fn windowed_progress_spans_below_to_above_viewport() {
        let mode = TrackingMode::Windowed;
        // Element top at the bottom edge of the viewport: nothing traveled.
        let entering = ScrollSample::element(800.0, 400.0, 800.0);
        // Element bottom at the top edge of the viewport: fully traveled.
        let leaving = ScrollSample::element(-400.0, 400.0, 800.0);
        let halfway = ScrollSample::element(200.0, 400.0, 800.0);
        assert_eq!(mode.progress(&entering), Progress::START);
        assert_eq!(mode.progress(&leaving), Progress::END);
        assert_eq!(mode.progress(&halfway).value(), 0.5);
    }

    #[test]
    fn windowed_clamps_outside_travel() {
        let mode = TrackingMode::Windowed;
        let far_below = ScrollSample::element(5000.0, 400.0, 800.0);
        let far_above = ScrollSample::element(-5000.0, 400.0, 800.0);
        assert_eq!(mode.progress(&far_below), Progress::START);
        assert_eq!(mode.progress(&far_above), Progress::END);
    }

    #[test]
    fn windowed_degenerate_geometry_is_zero_not_nan() {
        let sample = ScrollSample::element(0.0, 0.0, 0.0);
        let p = TrackingMode::Windowed.progress(&sample);
        assert_eq!(p, Progress::START);
        assert!(p.value().is_finite());
    }

    #[test]
    fn tracker_bumps_generation_only_on_change() {
        let mut tracker = ScrollTracker::new(TrackingMode::FullPage);
        let sample = ScrollSample::page(1000.0, 1000.0, 3000.0);
        assert_eq!(tracker.sample(&sample).value(), 0.5);
        assert_eq!(tracker.generation(), 1);
        let _ = tracker.sample(&sample);
        assert_eq!(tracker.generation(), 1);
        let _ = tracker.set(2.0);
        assert_eq!(tracker.progress(), Progress::END);
        assert_eq!(tracker.generation(), 2);
    }

    #[test]
    fn easing_reshapes_progress_upstream() {
        let mut tracker = ScrollTracker::with_easing(
            TrackingMode::FullPage,
            EasingFunction::QuadraticIn,
        );
        let sample = ScrollSample::page(1000.0, 1000.0, 3000.0);
        assert_eq!(tracker.sample(&sample).value(), 0.25);
        let end = ScrollSample::page(2000.0, 1000.0, 3000.0);
        assert_eq!(tracker.sample(&end), Progress::END);
    }
}
