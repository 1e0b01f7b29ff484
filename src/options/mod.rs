//! Centralized renderer options with TOML preset support.
//!
//! All tweakable settings (scroll tracking, camera path, motion, lighting,
//! surface) are consolidated here. Options serialize to/from TOML so a host
//! page can ship a preset next to its assets.

mod camera;
mod lighting;
mod motion;
mod render;
mod scroll;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use motion::MotionOptions;
pub use render::RenderOptions;
use schemars::JsonSchema;
pub use scroll::ScrollOptions;
use serde::{Deserialize, Serialize};

use crate::error::AtelierError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scroll tracking strategy and easing.
    pub scroll: ScrollOptions,
    /// Camera path and projection.
    pub camera: CameraOptions,
    /// Whole-object idle and scroll rotation.
    pub motion: MotionOptions,
    /// Lighting rig.
    pub lighting: LightingOptions,
    /// Surface and overlay settings.
    pub render: RenderOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::OptionsParse`] on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self, AtelierError> {
        toml::from_str(text).map_err(|e| AtelierError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, AtelierError> {
        let content = std::fs::read_to_string(path).map_err(AtelierError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), AtelierError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AtelierError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AtelierError::Io)?;
        }
        std::fs::write(path, content).map_err(AtelierError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::TrackingMode;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[scroll]
mode = "windowed"
easing = "smooth_step"

[camera]
arc_range = 0.5
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.scroll.mode, TrackingMode::Windowed);
        assert_eq!(opts.scroll.easing, EasingFunction::SmoothStep);
        assert_eq!(opts.camera.arc_range, 0.5);
        assert_eq!(opts.camera.base_z, 7.0);
        assert_eq!(opts.lighting, LightingOptions::default());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nbase_z = ").unwrap_err();
        assert!(matches!(err, AtelierError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir()
            .join(format!("atelier-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.camera.dolly_range = 3.25;
        opts.motion.idle_amplitude = 0.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["scroll", "camera", "motion", "lighting", "render"] {
            assert!(props.contains_key(section), "missing {section}");
        }

        let camera = &props["camera"]["properties"];
        assert!(camera.get("arc_range").is_some());
        assert!(camera.get("znear").is_none());
    }
}
