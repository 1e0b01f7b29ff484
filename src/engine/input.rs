//! Host events: scroll and resize.

use glam::UVec2;

use super::ExplodedViewEngine;
use crate::scroll::{Progress, ScrollSample};

impl ExplodedViewEngine {
    /// Feed fresh scroll geometry. Returns the published progress.
    ///
    /// Cheap enough to call on every scroll event; nothing is drawn until
    /// the next frame.
    pub fn handle_scroll(&mut self, sample: &ScrollSample) -> Progress {
        self.tracker.sample(sample)
    }

    /// Drive progress directly (clamped to `[0, 1]`), bypassing scroll
    /// geometry.
    pub fn set_progress(&mut self, raw: f32) -> Progress {
        self.tracker.set(raw)
    }

    /// The viewport changed: update camera aspect, surface and depth
    /// buffer. The garment is not rebuilt.
    ///
    /// `width` and `height` are logical (CSS pixels / window points);
    /// `device_ratio` is the display's pixel ratio before capping.
    pub fn resize(&mut self, width: u32, height: u32, device_ratio: f64) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized viewport {width}x{height}");
            return;
        }
        self.viewport = UVec2::new(width, height);
        self.device_ratio = device_ratio;
        self.rig.resize(width, height);
        let size = self.surface_size();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size);
        }
        log::debug!(
            "viewport {width}x{height} @{device_ratio}, surface {}x{}",
            size.width,
            size.height
        );
    }
}
