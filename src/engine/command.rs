//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a key press, a
//! mouse drag or a programmatic call, is a [`Command`]. Consumers build
//! commands and pass them to [`SceneState::execute`](super::SceneState::execute).

use glam::Vec2;

use crate::camera::Movement;

/// One discrete change to the scene.
///
/// Drag deltas are in physical pixels; the scene scales them by the
/// configured sensitivities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Left drag: change the active camera's angles.
    OrbitCamera {
        /// Cursor movement since the last event.
        delta: Vec2,
    },
    /// Scroll: change the active camera's distance.
    Zoom {
        /// Scroll lines, positive away from the user.
        delta: f32,
    },
    /// Right drag: rotate the selected joint.
    RotateJoint {
        /// Cursor movement since the last event.
        delta: Vec2,
    },
    /// Middle drag: move the torso in the XY plane.
    MoveTorso {
        /// Cursor movement since the last event.
        delta: Vec2,
    },
    /// Step the active camera.
    MoveCamera(Movement),
    /// Swap between the orbital and free cameras.
    ToggleCamera,
    /// Choose perspective (`true`) or orthographic projection.
    SetPerspective(bool),
    /// Show or hide the info text.
    ToggleInfoText,
    /// Target the next joint with the joint drag.
    CycleJoint,
    /// Zero every joint angle and the torso offset.
    ResetPose,
    /// Close the viewer.
    Quit,
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep rendering.
    Continue,
    /// Shut the viewer down.
    Exit,
}
