//! Camera for the exploded view.
//!
//! The camera has no user input: its position is a closed-form function of
//! scroll progress ([`CameraRig`]), and its orientation is fixed.

/// GPU uniform buffer and bind group for the camera.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
mod rig;

pub use controller::CameraBinding;
pub use core::{Camera, CameraUniform};
pub use rig::CameraRig;
