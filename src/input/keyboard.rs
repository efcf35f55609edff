use serde::{Deserialize, Serialize};

use crate::camera::Movement;
use crate::engine::Command;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings]
/// toggle_camera = "KeyC"
/// move_downwards = "Shift+Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Swap between orbital and free camera.
    ToggleCamera,
    /// Close the viewer.
    Quit,
    /// Step the camera forward.
    MoveForward,
    /// Step the camera backward.
    MoveBackward,
    /// Step the camera left.
    MoveLeft,
    /// Step the camera right.
    MoveRight,
    /// Step the camera up.
    MoveUpwards,
    /// Step the camera down.
    MoveDownwards,
    /// Switch to perspective projection.
    Perspective,
    /// Switch to orthographic projection.
    Orthographic,
    /// Show or hide the info text.
    ToggleInfo,
    /// Target the next joint with the joint drag.
    CycleJoint,
    /// Return the figure to its rest pose.
    ResetPose,
}

impl KeyAction {
    /// Whether a held key keeps issuing this action on OS key repeat.
    /// Only camera steps repeat; toggles fire once per press.
    #[must_use]
    pub fn repeats(self) -> bool {
        matches!(
            self,
            Self::MoveForward
                | Self::MoveBackward
                | Self::MoveLeft
                | Self::MoveRight
                | Self::MoveUpwards
                | Self::MoveDownwards
        )
    }

    /// The command this action issues.
    #[must_use]
    pub fn to_command(self) -> Command {
        match self {
            Self::ToggleCamera => Command::ToggleCamera,
            Self::Quit => Command::Quit,
            Self::MoveForward => Command::MoveCamera(Movement::Forward),
            Self::MoveBackward => Command::MoveCamera(Movement::Backward),
            Self::MoveLeft => Command::MoveCamera(Movement::Left),
            Self::MoveRight => Command::MoveCamera(Movement::Right),
            Self::MoveUpwards => Command::MoveCamera(Movement::Upwards),
            Self::MoveDownwards => Command::MoveCamera(Movement::Downwards),
            Self::Perspective => Command::SetPerspective(true),
            Self::Orthographic => Command::SetPerspective(false),
            Self::ToggleInfo => Command::ToggleInfoText,
            Self::CycleJoint => Command::CycleJoint,
            Self::ResetPose => Command::ResetPose,
        }
    }
}
