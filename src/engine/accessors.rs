//! Read-only queries for [`ExplodedViewEngine`].

use super::ExplodedViewEngine;
use crate::camera::Camera;
use crate::garment::Garment;
use crate::options::Options;
use crate::schedule::Liveness;
use crate::scroll::Progress;

impl ExplodedViewEngine {
    /// Current progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.tracker.progress()
    }

    /// Changes every time progress changes.
    #[must_use]
    pub fn progress_generation(&self) -> u64 {
        self.tracker.generation()
    }

    /// The built garment.
    #[must_use]
    pub fn garment(&self) -> &Garment {
        &self.garment
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Camera at the current progress.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.rig.camera_at(self.progress())
    }

    /// Handle to the mount's liveness flag, for the host's frame scheduler.
    #[must_use]
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Whether [`unmount`](Self::unmount) has not been called yet.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Whether a GPU renderer is attached and active.
    #[must_use]
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Frames computed since mount.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }
}
