//! Progress-driven pose interpolation.
//!
//! Pure functions from `(Part, Progress)` to a transform. Nothing here
//! mutates the garment or keeps state between calls, so evaluating the
//! same progress twice always yields identical poses.

pub mod interpolation;
mod motion;
mod pose;

pub use motion::ObjectMotion;
pub use pose::{interpolate, pose_at, PartPose, Poses};
