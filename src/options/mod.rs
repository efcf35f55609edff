//! Viewer options with TOML preset support.
//!
//! Camera defaults, mouse sensitivities, display toggles and key bindings
//! are consolidated here. Options serialize to/from TOML so a session can
//! start from a preset file.

mod camera;
mod controls;
mod display;
mod keybindings;

use std::path::Path;

pub use camera::{CameraOptions, FreeOptions, OrbitalOptions};
pub use controls::ControlOptions;
pub use display::DisplayOptions;
pub use keybindings::{KeybindingOptions, SHIFT_PREFIX};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MannequinError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Starting state of both cameras.
    pub camera: CameraOptions,
    /// Mouse sensitivities.
    pub controls: ControlOptions,
    /// Window and drawing toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self, MannequinError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| MannequinError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MannequinError> {
        let content = std::fs::read_to_string(path).map_err(MannequinError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MannequinError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MannequinError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MannequinError::Io)?;
        }
        std::fs::write(path, content).map_err(MannequinError::Io)
    }

    /// Reject values that would produce a degenerate view.
    pub fn validate(&self) -> Result<(), MannequinError> {
        if let Some(problem) = self.camera.problems() {
            return Err(MannequinError::InvalidOptions(problem));
        }
        let c = &self.controls;
        if [c.orbit_sensitivity, c.joint_sensitivity, c.torso_sensitivity, c.zoom_step]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(MannequinError::InvalidOptions(
                "control sensitivities must be finite".to_owned(),
            ));
        }
        if !c.initial_joint.is_articulated() {
            return Err(MannequinError::InvalidOptions(format!(
                "controls.initial_joint: {} has no joint",
                c.initial_joint.name()
            )));
        }
        if self.display.window_width == 0 || self.display.window_height == 0 {
            return Err(MannequinError::InvalidOptions(
                "window size must be non-zero".to_owned(),
            ));
        }
        if let Some(key) = self.keybindings.duplicate_key() {
            return Err(MannequinError::InvalidOptions(format!(
                "key {key} is bound to more than one action"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ActiveCamera;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
initial = "free"

[camera.orbital]
distance = 6.0

[keybindings]
quit = "Escape"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.camera.initial, ActiveCamera::Free);
        assert_eq!(opts.camera.orbital.distance, 6.0);
        // Everything else should be default
        assert_eq!(opts.camera.orbital.far, -10.0);
        assert_eq!(opts.controls.zoom_step, 0.1);
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(
            opts.keybindings.lookup("Tab"),
            Some(KeyAction::CycleJoint)
        );
    }

    #[test]
    fn rejects_positive_near_plane() {
        let toml_str = "[camera.orbital]\nnear = 0.1\n";
        let err = Options::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, MannequinError::InvalidOptions(_)));
    }

    #[test]
    fn rejects_far_in_front_of_near() {
        let mut opts = Options::default();
        opts.camera.free.far = -0.001;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_torso_as_initial_joint() {
        let err = Options::from_toml_str("[controls]\ninitial_joint = \"torso\"\n")
            .unwrap_err();
        assert!(matches!(err, MannequinError::InvalidOptions(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[camera\n").unwrap_err();
        assert!(matches!(err, MannequinError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "mannequin-save-then-load-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.display.show_edges = false;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(opts, loaded);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));

        let display = &props["display"]["properties"];
        assert!(display.get("show_info").is_some());
        assert!(display.get("window_width").is_none());
    }
}
