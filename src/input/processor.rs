//! Converts raw platform events into scene commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and
//! [`SceneState::execute`](crate::engine::SceneState::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::Command;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`Command`]s.
///
/// # Usage
///
/// ```ignore
/// for cmd in input.handle_event(event) {
///     scene.execute(cmd);
/// }
///
/// if let Some(cmd) = input.handle_key_press("KeyC") {
///     scene.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position in physical pixels; `None` until the first
    /// move so the first sample never produces a jump.
    cursor: Option<Vec2>,
    left: bool,
    right: bool,
    middle: bool,
    shift_pressed: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether `button` is currently held.
    #[must_use]
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    ///
    /// `key` uses the `winit::keyboard::KeyCode` debug format (`"KeyW"`,
    /// `"Space"`, `"Tab"`).
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<Command> {
        let action = self.key_bindings.lookup_with_shift(key, self.shift_pressed);
        if action.is_none() {
            log::trace!("unbound key {key}");
        }
        action.map(super::KeyAction::to_command)
    }

    /// Like [`handle_key_press`](Self::handle_key_press) for an OS key
    /// repeat: only actions that repeat produce a command.
    #[must_use]
    pub fn handle_key_repeat(&self, key: &str) -> Option<Command> {
        self.key_bindings
            .lookup_with_shift(key, self.shift_pressed)
            .filter(|action| action.repeats())
            .map(super::KeyAction::to_command)
    }

    /// Process a raw input event. A cursor move while several buttons are
    /// held yields one command per held button.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(Vec2::new(x, y)),
            InputEvent::MouseButton { button, pressed } => {
                self.set_pressed(button, pressed);
                Vec::new()
            }
            InputEvent::Scroll { delta } => vec![Command::Zoom { delta }],
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                Vec::new()
            }
        }
    }

    /// Forget held buttons, e.g. when the window loses focus mid-drag.
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.middle = false;
    }

    fn set_pressed(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Middle => self.middle = pressed,
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) -> Vec<Command> {
        let delta = self.cursor.map_or(Vec2::ZERO, |last| position - last);
        self.cursor = Some(position);

        if delta == Vec2::ZERO {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if self.left {
            commands.push(Command::OrbitCamera { delta });
        }
        if self.right {
            commands.push(Command::RotateJoint { delta });
        }
        if self.middle {
            commands.push(Command::MoveTorso { delta });
        }
        commands
    }
}
