use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Prefix marking a binding that only fires while Shift is held.
pub const SHIFT_PREFIX: &str = "Shift+";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    from = "HashMap<KeyAction, String>",
    into = "HashMap<KeyAction, String>"
)]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Serialized as a flat table; entries present in a file override the
/// defaults, missing ones keep them:
/// ```toml
/// [keybindings]
/// toggle_camera = "KeyC"
/// move_downwards = "Shift+Space"
/// ```
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `Quit` → `"KeyQ"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ToggleCamera, "KeyC".into()),
            (KeyAction::Quit, "KeyQ".into()),
            (KeyAction::MoveForward, "KeyW".into()),
            (KeyAction::MoveLeft, "KeyA".into()),
            (KeyAction::MoveBackward, "KeyS".into()),
            (KeyAction::MoveRight, "KeyD".into()),
            (KeyAction::MoveUpwards, "Space".into()),
            (KeyAction::MoveDownwards, format!("{SHIFT_PREFIX}Space")),
            (KeyAction::Perspective, "KeyP".into()),
            (KeyAction::Orthographic, "KeyO".into()),
            (KeyAction::ToggleInfo, "KeyH".into()),
            (KeyAction::CycleJoint, "Tab".into()),
            (KeyAction::ResetPose, "KeyR".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl From<HashMap<KeyAction, String>> for KeybindingOptions {
    fn from(overrides: HashMap<KeyAction, String>) -> Self {
        let mut opts = Self::default();
        opts.bindings.extend(overrides);
        opts.rebuild_reverse_map();
        opts
    }
}

impl From<KeybindingOptions> for HashMap<KeyAction, String> {
    fn from(opts: KeybindingOptions) -> Self {
        opts.bindings
    }
}

impl KeybindingOptions {
    /// Rebind `action`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }

    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for an exact key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Look up a key press, preferring a `Shift+` binding while Shift is
    /// held and falling back to the plain key.
    #[must_use]
    pub fn lookup_with_shift(&self, key: &str, shift: bool) -> Option<KeyAction> {
        if shift {
            if let Some(action) = self.lookup(&format!("{SHIFT_PREFIX}{key}")) {
                return Some(action);
            }
        }
        self.lookup(key)
    }

    /// First key string bound to more than one action, if any.
    #[must_use]
    pub fn duplicate_key(&self) -> Option<&str> {
        if self.key_to_action.len() == self.bindings.len() {
            return None;
        }
        let mut seen = HashMap::with_capacity(self.bindings.len());
        for key in self.bindings.values() {
            if seen.insert(key.as_str(), ()).is_some() {
                return Some(key.as_str());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_binding_wins_over_plain_key() {
        let keys = KeybindingOptions::default();
        assert_eq!(keys.lookup_with_shift("Space", false), Some(KeyAction::MoveUpwards));
        assert_eq!(keys.lookup_with_shift("Space", true), Some(KeyAction::MoveDownwards));
        // No Shift+W binding: shift falls through to the plain key.
        assert_eq!(keys.lookup_with_shift("KeyW", true), Some(KeyAction::MoveForward));
        assert_eq!(keys.lookup_with_shift("KeyZ", true), None);
    }

    #[test]
    fn overrides_merge_onto_defaults() {
        let keys = KeybindingOptions::from(HashMap::from([(
            KeyAction::Quit,
            "Escape".to_owned(),
        )]));
        assert_eq!(keys.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(keys.lookup("KeyQ"), None);
        assert_eq!(keys.lookup("KeyC"), Some(KeyAction::ToggleCamera));
    }

    #[test]
    fn detects_duplicate_keys() {
        let mut keys = KeybindingOptions::default();
        assert!(keys.duplicate_key().is_none());
        keys.bind(KeyAction::ResetPose, "KeyC");
        assert_eq!(keys.duplicate_key(), Some("KeyC"));
    }
}
