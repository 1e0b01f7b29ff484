use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
/// Surface and frame-loop settings.
pub struct RenderOptions {
    /// Upper bound on the device pixel ratio used for the surface.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f64,
    /// Clear colour as packed sRGB `0xRRGGBB`.
    #[schemars(skip)]
    pub background: u32,
    /// Whether label annotations are produced each frame.
    #[schemars(title = "Show Labels")]
    pub show_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            background: 0xff_f4_e2,
            show_labels: true,
        }
    }
}
