//! Options methods for ExplodedViewEngine

use super::ExplodedViewEngine;
use crate::animation::ObjectMotion;
use crate::options::Options;

impl ExplodedViewEngine {
    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to tracker, camera, motion, overlay and
    /// renderer.
    pub fn apply_options(&mut self) {
        let scroll = &self.options.scroll;
        self.tracker.reconfigure(scroll.mode, scroll.easing);
        self.rig.set_options(self.options.camera.clone());
        self.motion = ObjectMotion::from_options(&self.options.motion);
        self.overlay.set_enabled(self.options.render.show_labels);
        self.apply_render();
    }

    /// Push lighting, background and pixel-ratio cap to the renderer.
    fn apply_render(&mut self) {
        let size = self.surface_size();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_lighting(&self.options.lighting);
            renderer.set_background(self.options.render.background);
            renderer.resize(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::ExplodedViewEngine;
    use crate::options::Options;
    use crate::scroll::{Progress, ScrollSample, TrackingMode};

    #[test]
    fn switching_tracking_mode_keeps_progress_until_next_sample() {
        let mut engine = ExplodedViewEngine::new(Options::default(), 800, 600);
        let _ = engine.set_progress(0.4);

        let mut options = engine.options().clone();
        options.scroll.mode = TrackingMode::Windowed;
        engine.set_options(options);
        assert_eq!(engine.progress(), Progress::new(0.4));

        let p = engine.handle_scroll(&ScrollSample::element(200.0, 400.0, 800.0));
        assert_eq!(p.value(), 0.5);
    }

    #[test]
    fn camera_options_apply_immediately() {
        let mut engine = ExplodedViewEngine::new(Options::default(), 800, 600);
        let mut options = Options::default();
        options.camera.base_z = 10.0;
        engine.set_options(options);
        assert_eq!(engine.camera().eye.z, 10.0);
    }
}
