//! The exploded-view engine: scene state, frame computation and teardown.

mod accessors;
mod input;
mod options;

use glam::{Mat4, UVec2};
use web_time::Instant;

use crate::animation::{interpolate, ObjectMotion, Poses};
use crate::camera::{Camera, CameraRig};
use crate::garment::{build_garment, Garment};
use crate::gpu::render_context::SurfaceSize;
use crate::options::Options;
use crate::overlay::{LabelAnnotation, LabelOverlay};
use crate::renderer::{InstanceBatches, Renderer};
use crate::schedule::Liveness;
use crate::scroll::{Progress, ScrollTracker};
use crate::util::frame_timing::FrameClock;

/// Everything computed for one frame, before any GPU work.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    /// Progress the frame was evaluated at.
    pub progress: Progress,
    /// Seconds since mount.
    pub elapsed: f32,
    /// Whole-object yaw (idle plus scroll-driven).
    pub yaw: f32,
    /// Whole-object world matrix.
    pub object: Mat4,
    /// Camera for this frame.
    pub camera: Camera,
    /// Part poses.
    pub poses: Poses,
    /// Label annotations (empty when labels are disabled).
    pub labels: Vec<LabelAnnotation>,
}

/// The scroll-driven exploded view.
///
/// Owns the garment, the progress tracker, the camera rig, object motion,
/// the label overlay and, once attached, the GPU [`Renderer`].
///
/// # Frame loop
///
/// Scroll and resize events go to [`handle_scroll`](Self::handle_scroll)
/// and [`resize`](Self::resize) at whatever rate the host delivers them.
/// Once per display frame the host calls [`render`](Self::render), which
/// reads the latest progress, computes poses, camera, yaw and labels, and
/// draws them. Without a renderer the frame is still computed.
///
/// # Teardown
///
/// [`unmount`](Self::unmount) cancels the shared [`Liveness`] flag and
/// drops the renderer. Schedulers holding a clone of the flag stop on
/// their next tick.
pub struct ExplodedViewEngine {
    garment: Garment,
    tracker: ScrollTracker,
    rig: CameraRig,
    motion: ObjectMotion,
    overlay: LabelOverlay,
    clock: FrameClock,
    liveness: Liveness,
    options: Options,
    /// Logical viewport in CSS pixels / window points.
    viewport: UVec2,
    device_ratio: f64,
    renderer: Option<Renderer>,
}

impl ExplodedViewEngine {
    /// Build the scene for a logical viewport of `width × height`.
    ///
    /// The garment is built once here and never rebuilt.
    #[must_use]
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let garment = build_garment();
        let viewport = UVec2::new(width.max(1), height.max(1));
        let mut overlay = LabelOverlay::with_defaults(&garment);
        overlay.set_enabled(options.render.show_labels);
        log::debug!(
            "exploded view: {} parts, {} primitives, viewport {}x{}",
            garment.len(),
            garment.primitive_count(),
            viewport.x,
            viewport.y
        );
        Self {
            tracker: ScrollTracker::with_easing(
                options.scroll.mode,
                options.scroll.easing,
            ),
            rig: CameraRig::new(
                options.camera.clone(),
                viewport.x as f32 / viewport.y as f32,
            ),
            motion: ObjectMotion::from_options(&options.motion),
            overlay,
            clock: FrameClock::new(),
            liveness: Liveness::new(),
            viewport,
            device_ratio: 1.0,
            renderer: None,
            garment,
            options,
        }
    }

    /// Attach a GPU renderer. Replaces any previous one.
    ///
    /// The surface is resized to the current viewport, which may have
    /// changed while the renderer was being created.
    pub fn attach(&mut self, mut renderer: Renderer) {
        if !self.liveness.is_alive() {
            log::debug!("renderer attached after unmount, dropping it");
            return;
        }
        renderer.resize(self.surface_size());
        self.renderer = Some(renderer);
    }

    /// Compute the frame at `now` and advance the frame clock.
    pub fn frame(&mut self, now: Instant) -> FrameState {
        self.clock.tick(now);
        self.frame_at(self.clock.elapsed_at(now))
    }

    /// Compute the frame for `elapsed` seconds since mount without touching
    /// the clock.
    #[must_use]
    pub fn frame_at(&self, elapsed: f32) -> FrameState {
        let progress = self.tracker.progress();
        let poses = interpolate(&self.garment, progress);
        let yaw = self.motion.yaw(elapsed, progress);
        let object = self.garment.object().matrix(yaw);
        let camera = self.rig.camera_at(progress);
        let labels = self.overlay.update(
            &poses,
            object,
            camera.build_matrix(),
            self.viewport,
            progress,
        );
        FrameState {
            progress,
            elapsed,
            yaw,
            object,
            camera,
            poses,
            labels,
        }
    }

    /// Compute and draw the frame at `now`.
    ///
    /// An unrecoverable surface error detaches the renderer; the engine
    /// keeps producing frames without drawing.
    pub fn render(&mut self, now: Instant) -> FrameState {
        let frame = self.frame(now);
        let failure = self.renderer.as_mut().and_then(|renderer| {
            let batches =
                InstanceBatches::build(&self.garment, &frame.poses, frame.object);
            renderer.render(&frame.camera, &batches).err()
        });
        if let Some(e) = failure {
            log::error!("render failed ({e}), renderer disabled");
            self.renderer = None;
        }
        frame
    }

    /// Tear down: cancel the frame loop and release GPU resources.
    pub fn unmount(&mut self) {
        self.liveness.cancel();
        if self.renderer.take().is_some() {
            log::debug!("renderer released");
        }
    }

    /// Physical surface size for the current viewport and pixel ratio.
    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::from_logical(
            f64::from(self.viewport.x),
            f64::from(self.viewport.y),
            self.device_ratio,
            self.options.render.max_pixel_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::garment::names;
    use crate::scroll::ScrollSample;

    fn engine() -> ExplodedViewEngine {
        ExplodedViewEngine::new(Options::default(), 1280, 720)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn assembled_at_top_of_page() {
        let mut engine = engine();
        let _ = engine.handle_scroll(&ScrollSample::page(0.0, 800.0, 4000.0));
        let frame = engine.frame_at(0.0);

        assert_eq!(frame.progress, Progress::START);
        for (part, pose) in engine.garment().parts().iter().zip(frame.poses.as_slice()) {
            assert_eq!(pose.position, part.assembled_position());
            assert_eq!(pose.rotation, part.assembled_rotation());
        }
        assert!(approx(frame.camera.eye, Vec3::new(0.0, 0.0, 7.0)));
        assert!(frame.labels.iter().all(|l| !l.visible));
        assert_eq!(frame.yaw, 0.0);
    }

    #[test]
    fn exploded_at_bottom_of_page() {
        let mut engine = engine();
        let _ = engine.handle_scroll(&ScrollSample::page(3200.0, 800.0, 4000.0));
        let frame = engine.frame_at(0.0);

        assert_eq!(frame.progress, Progress::END);
        for (part, pose) in engine.garment().parts().iter().zip(frame.poses.as_slice()) {
            assert!(approx(pose.position, part.exploded_position()));
        }
        let lining = engine.garment().find(names::LINING).unwrap();
        assert_eq!(frame.poses.get(lining.index()).unwrap().opacity, 1.0);
        assert!(approx(frame.camera.eye, Vec3::new(0.0, 1.5, 5.0)));
        assert_eq!(frame.labels.len(), 4);
        assert!(frame.labels.iter().all(|l| l.visible));
    }

    #[test]
    fn idle_rotation_runs_without_scrolling() {
        let engine = engine();
        let still = engine.frame_at(0.0);
        let later = engine.frame_at(5.0);
        assert_eq!(still.progress, later.progress);
        assert_ne!(still.yaw, later.yaw);
        assert_eq!(still.poses, later.poses);
        assert_eq!(still.camera, later.camera);
    }

    #[test]
    fn resize_keeps_scene_and_progress() {
        let mut engine = engine();
        let _ = engine.set_progress(0.6);
        let before = engine.frame_at(1.0);
        engine.resize(640, 640, 3.0);
        let after = engine.frame_at(1.0);

        assert_eq!(before.poses, after.poses);
        assert_eq!(after.camera.aspect, 1.0);
        assert_eq!(engine.progress(), Progress::new(0.6));
        assert_eq!(
            engine.surface_size(),
            SurfaceSize { width: 1280, height: 1280 }
        );
    }

    #[test]
    fn labels_can_be_switched_off() {
        let mut options = Options::default();
        options.render.show_labels = false;
        let mut engine = ExplodedViewEngine::new(options, 800, 600);
        let _ = engine.set_progress(1.0);
        assert!(engine.frame_at(0.0).labels.is_empty());
    }

    #[test]
    fn unmount_cancels_shared_liveness() {
        let mut engine = engine();
        let handle = engine.liveness();
        assert!(engine.is_mounted());
        engine.unmount();
        assert!(!handle.is_alive());
        assert!(!engine.has_renderer());
    }

    #[test]
    fn frames_queued_before_unmount_never_run() {
        use std::{cell::RefCell, rc::Rc};

        use crate::schedule::{FrameLoop, FrameOutcome};

        let engine = Rc::new(RefCell::new(engine()));
        let target = Rc::clone(&engine);
        let mut frames = FrameLoop::new(engine.borrow().liveness(), move |_| {
            let _ = target.borrow_mut().render(Instant::now());
        });
        engine.borrow_mut().unmount();

        assert_eq!(frames.tick(16.0), FrameOutcome::Cancelled);
        assert_eq!(engine.borrow().frames(), 0);
    }

    #[test]
    fn frame_advances_clock() {
        let mut engine = engine();
        let now = Instant::now();
        let _ = engine.frame(now);
        let _ = engine.frame(now);
        assert_eq!(engine.frames(), 2);
    }
}
