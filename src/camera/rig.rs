use std::f32::consts::PI;

use glam::Vec3;

use super::core::Camera;
use crate::options::CameraOptions;
use crate::scroll::Progress;

/// Scroll-driven camera path.
///
/// Three independent closed-form axes, each a function of progress only:
/// a dolly towards the garment, a rise, and a lateral arc that peaks
/// halfway and returns to centre. No wall-clock input, so reloading
/// mid-scroll reproduces the same framing.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    options: CameraOptions,
    aspect: f32,
}

impl CameraRig {
    /// Rig with the given path parameters and initial aspect ratio.
    #[must_use]
    pub fn new(options: CameraOptions, aspect: f32) -> Self {
        Self {
            options,
            aspect: sanitize_aspect(aspect),
        }
    }

    /// Path parameters.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Replace the path parameters (keeps the aspect ratio).
    pub fn set_options(&mut self, options: CameraOptions) {
        self.options = options;
    }

    /// Current viewport aspect ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Update the aspect ratio from viewport dimensions. Zero-sized
    /// viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Dolly axis: `base_z - p · dolly_range`.
    #[must_use]
    pub fn depth(&self, progress: Progress) -> f32 {
        self.options.base_z - progress.value() * self.options.dolly_range
    }

    /// Vertical pan axis: `p · pan_range`.
    #[must_use]
    pub fn height(&self, progress: Progress) -> f32 {
        progress.value() * self.options.pan_range
    }

    /// Lateral arc axis: `sin(p · π) · arc_range`.
    #[must_use]
    pub fn lateral(&self, progress: Progress) -> f32 {
        (progress.value() * PI).sin() * self.options.arc_range
    }

    /// Eye position at `progress`.
    #[must_use]
    pub fn eye(&self, progress: Progress) -> Vec3 {
        Vec3::new(
            self.lateral(progress),
            self.height(progress),
            self.depth(progress),
        )
    }

    /// Full camera at `progress`, looking straight down −Z.
    #[must_use]
    pub fn camera_at(&self, progress: Progress) -> Camera {
        let eye = self.eye(progress);
        Camera {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy: self.options.fovy,
            znear: self.options.znear,
            zfar: self.options.zfar,
        }
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
