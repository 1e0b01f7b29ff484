use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Studio lighting rig: ambient fill, key and rim directionals, top spot.
pub struct LightingOptions {
    /// Uniform ambient term.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub ambient: f32,
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.5), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Key light position (directional, aimed at the origin).
    #[schemars(skip)]
    pub key_position: [f32; 3],
    /// Back/rim light intensity.
    #[schemars(title = "Rim Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub rim_intensity: f32,
    /// Back/rim light position.
    #[schemars(skip)]
    pub rim_position: [f32; 3],
    /// Overhead spot intensity.
    #[schemars(title = "Top Spot", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub spot_intensity: f32,
    /// Overhead spot position.
    #[schemars(skip)]
    pub spot_position: [f32; 3],
    /// Half-angle of the spot cone in radians.
    #[schemars(skip)]
    pub spot_angle: f32,
    /// Fraction of the cone that fades out at the edge (0 = hard edge).
    #[schemars(skip)]
    pub spot_penumbra: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            key_intensity: 1.5,
            key_position: [5.0, 5.0, 5.0],
            rim_intensity: 0.5,
            rim_position: [-5.0, 3.0, -5.0],
            spot_intensity: 0.8,
            spot_position: [0.0, 8.0, 0.0],
            spot_angle: 0.6,
            spot_penumbra: 1.0,
        }
    }
}
