use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Whole-object rotation: time-driven idle sway plus scroll-driven turn.
pub struct MotionOptions {
    /// Idle oscillation frequency in radians per second.
    #[schemars(title = "Idle Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub idle_frequency: f32,
    /// Idle oscillation amplitude in radians.
    #[schemars(title = "Idle Sway", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub idle_amplitude: f32,
    /// Yaw added by scrolling from progress 0 to 1, in radians.
    #[schemars(title = "Scroll Turn", range(min = 0.0, max = 6.3), extend("step" = 0.05))]
    pub scroll_turn: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            idle_frequency: 0.3,
            idle_amplitude: 0.15,
            scroll_turn: std::f32::consts::PI * 0.3,
        }
    }
}
