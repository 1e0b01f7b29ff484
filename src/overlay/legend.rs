//! Layer indicator and progress bar driven by the same progress signal as
//! the scene.

use crate::scroll::Progress;

/// Distance before a layer's mark at which it lights up.
const LEAD_IN: f32 = 0.1;
/// Distance after a layer's mark for which it stays current.
const HOLD: f32 = 0.2;

/// One entry of the layer indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    /// Short ordinal shown in the marker ("01").
    pub icon: &'static str,
    /// Layer title.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// The four construction layers of the jacket, outermost first.
pub const LAYERS: [Layer; 4] = [
    Layer {
        icon: "01",
        name: "Full-Grain Leather",
        description: "Hand-selected cowhide, naturally tanned for durability.",
    },
    Layer {
        icon: "02",
        name: "Viscose Lining",
        description: "Breathable, temperature-regulating interior.",
    },
    Layer {
        icon: "03",
        name: "Brass Hardware",
        description: "YKK zippers, custom snaps built to last.",
    },
    Layer {
        icon: "04",
        name: "Double Stitching",
        description: "Reinforced seams at every stress point.",
    },
];

/// Display state of one layer marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerState {
    /// The layer.
    pub layer: Layer,
    /// Progress has reached (or nearly reached) the layer.
    pub active: bool,
    /// The layer is the one being shown right now.
    pub current: bool,
}

impl LayerState {
    /// `{icon, name, description, active, current}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "icon": self.layer.icon,
            "name": self.layer.name,
            "description": self.layer.description,
            "active": self.active,
            "current": self.current,
        })
    }
}

/// Progress mark of layer `index` out of `count`, evenly spaced over
/// `[0, 1]`.
#[must_use]
pub fn layer_mark(index: usize, count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }
    index as f32 / (count - 1) as f32
}

/// State of every layer in `layers` at `progress`.
#[must_use]
pub fn layer_states(layers: &[Layer], progress: Progress) -> Vec<LayerState> {
    let p = progress.value();
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let mark = layer_mark(i, layers.len());
            let active = p >= mark - LEAD_IN;
            LayerState {
                layer: *layer,
                active,
                current: active && p < mark + HOLD,
            }
        })
        .collect()
}

/// Width of the top progress bar in percent.
#[must_use]
pub fn progress_bar_percent(progress: Progress) -> f32 {
    progress.value() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(p: f32) -> Vec<(bool, bool)> {
        layer_states(&LAYERS, Progress::new(p))
            .into_iter()
            .map(|s| (s.active, s.current))
            .collect()
    }

    #[test]
    fn marks_are_evenly_spaced() {
        assert_eq!(layer_mark(0, 4), 0.0);
        assert_eq!(layer_mark(3, 4), 1.0);
        assert!((layer_mark(1, 4) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(layer_mark(0, 1), 0.0);
    }

    #[test]
    fn first_layer_is_current_at_start() {
        assert_eq!(
            flags(0.0),
            [(true, true), (false, false), (false, false), (false, false)]
        );
    }

    #[test]
    fn layer_lights_up_before_its_mark() {
        // Second mark is 1/3; lead-in starts at ~0.233.
        let states = flags(0.25);
        assert_eq!(states[1], (true, true));
        assert_eq!(states[0], (true, false));
    }

    #[test]
    fn every_layer_active_at_end_and_only_last_current() {
        assert_eq!(
            flags(1.0),
            [(true, false), (true, false), (true, false), (true, true)]
        );
    }

    #[test]
    fn layer_json_carries_flags() {
        let states = layer_states(&LAYERS, Progress::START);
        let first = states[0].to_json();
        assert_eq!(first["icon"], "01");
        assert_eq!(first["name"], "Full-Grain Leather");
        assert_eq!(first["current"], true);
        assert_eq!(states[3].to_json()["active"], false);
    }

    #[test]
    fn progress_bar_tracks_progress() {
        assert_eq!(progress_bar_percent(Progress::START), 0.0);
        assert_eq!(progress_bar_percent(Progress::new(0.25)), 25.0);
        assert_eq!(progress_bar_percent(Progress::new(3.0)), 100.0);
    }
}
