use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scroll::TrackingMode;
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll", inline)]
#[serde(default)]
/// How scroll position becomes progress.
pub struct ScrollOptions {
    /// Full-page or embedded-element tracking.
    #[schemars(title = "Tracking")]
    pub mode: TrackingMode,
    /// Curve applied to progress before it reaches the scene.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Document height in viewport heights for hosts without a real
    /// document (the native viewer scrolls a virtual page this tall).
    #[schemars(title = "Page Length", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub virtual_page_screens: f32,
    /// Pixels scrolled per wheel line in the native viewer.
    #[schemars(skip)]
    pub wheel_line_pixels: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            mode: TrackingMode::FullPage,
            easing: EasingFunction::Linear,
            virtual_page_screens: 5.0,
            wheel_line_pixels: 60.0,
        }
    }
}
