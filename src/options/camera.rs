use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Scroll-driven camera path and projection parameters.
pub struct CameraOptions {
    /// Camera depth at progress 0.
    #[schemars(title = "Base Distance", range(min = 2.0, max = 20.0), extend("step" = 0.1))]
    pub base_z: f32,
    /// How far the camera dollies in by progress 1.
    #[schemars(title = "Dolly", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub dolly_range: f32,
    /// How far the camera rises by progress 1.
    #[schemars(title = "Pan", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub pan_range: f32,
    /// Peak lateral offset of the arc, reached at progress 0.5.
    #[schemars(title = "Arc", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub arc_range: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            base_z: 7.0,
            dolly_range: 2.0,
            pan_range: 1.5,
            arc_range: 1.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
