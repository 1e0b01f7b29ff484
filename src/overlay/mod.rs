//! Screen-space annotations that ride along with the 3D scene.
//!
//! The overlay produces data only (text, anchor, pixel position,
//! visibility); drawing the text is left to the host page or window.

pub mod legend;
mod label;

pub use label::{
    project_to_viewport, LabelAnnotation, LabelOverlay, LabelSpec, LabelVisibility,
};
pub use legend::{layer_states, progress_bar_percent, Layer, LayerState, LAYERS};
