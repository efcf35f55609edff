use glam::Vec2;

use super::command::{Command, Outcome};
use crate::camera::{ActiveCamera, Camera, CameraRig};
use crate::options::{ControlOptions, Options};
use crate::scene::{FrameMatrices, LimbId, PoseBuilder, PoseState};

/// Everything the user can change, passed explicitly to whoever needs it.
///
/// Commands mutate this state to completion; [`frame`](Self::frame) then
/// reads it to produce the frame's matrices. Nothing here touches the GPU,
/// so the whole interaction model is testable headless.
#[derive(Debug)]
pub struct SceneState {
    rig: CameraRig,
    pose: PoseState,
    builder: PoseBuilder,
    controls: ControlOptions,
    show_info: bool,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&Options::default(), 1.0)
    }
}

impl SceneState {
    /// Build the scene from options for a surface of the given aspect
    /// ratio.
    #[must_use]
    pub fn new(options: &Options, aspect: f32) -> Self {
        let mut pose = PoseState::new();
        pose.select(options.controls.initial_joint);
        Self {
            rig: CameraRig::from_options(&options.camera, aspect),
            pose,
            builder: PoseBuilder::new(),
            controls: options.controls.clone(),
            show_info: options.display.show_info,
        }
    }

    /// Camera rig.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// The camera currently driving the view.
    #[must_use]
    pub fn camera(&self) -> &dyn Camera {
        self.rig.active()
    }

    /// Figure pose.
    #[must_use]
    pub fn pose(&self) -> &PoseState {
        &self.pose
    }

    /// Mutable figure pose, for programmatic posing.
    pub fn pose_mut(&mut self) -> &mut PoseState {
        &mut self.pose
    }

    /// Whether the info text is shown.
    #[must_use]
    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Replace mouse sensitivities.
    pub fn set_controls(&mut self, controls: ControlOptions) {
        self.controls = controls;
    }

    /// Apply one command.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::OrbitCamera { delta } => {
                let k = self.controls.orbit_sensitivity;
                let camera = self.rig.active_mut();
                camera.set_theta(camera.theta() - k * delta.x);
                camera.set_phi(camera.phi() - k * delta.y);
            }
            Command::Zoom { delta } => {
                let camera = self.rig.active_mut();
                camera.set_distance(camera.distance() - self.controls.zoom_step * delta);
            }
            Command::RotateJoint { delta } => {
                let k = self.controls.joint_sensitivity;
                self.pose.rotate_selected(k * delta.y, -k * delta.x);
            }
            Command::MoveTorso { delta } => {
                let k = self.controls.torso_sensitivity;
                self.pose.torso_position += Vec2::new(k * delta.x, -k * delta.y);
            }
            Command::MoveCamera(movement) => self.rig.active_mut().apply_movement(movement),
            Command::ToggleCamera => {
                let _ = self.rig.toggle();
            }
            Command::SetPerspective(perspective) => {
                self.rig.active_mut().set_perspective(perspective);
            }
            Command::ToggleInfoText => self.show_info = !self.show_info,
            Command::CycleJoint => {
                let limb = self.pose.cycle_selection();
                log::info!("joint drag now moves the {}", limb.name());
            }
            Command::ResetPose => self.pose.reset(),
            Command::Quit => return Outcome::Exit,
        }
        Outcome::Continue
    }

    /// Apply commands in order, stopping at the first that asks to exit.
    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Outcome {
        for command in commands {
            if self.execute(command) == Outcome::Exit {
                return Outcome::Exit;
            }
        }
        Outcome::Continue
    }

    /// New surface size; only the active camera's aspect ratio changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.rig.resize(width, height);
    }

    /// View, projection and every limb's model matrix for the current
    /// state.
    pub fn frame(&mut self) -> FrameMatrices {
        let camera = self.rig.active();
        FrameMatrices {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            limbs: self.builder.build(&self.pose),
        }
    }

    /// Which camera is active.
    #[must_use]
    pub fn active_camera(&self) -> ActiveCamera {
        self.rig.active_kind()
    }

    /// Limb targeted by the joint drag.
    #[must_use]
    pub fn selected_joint(&self) -> LimbId {
        self.pose.selected()
    }
}

#[cfg(test)]
mod tests {
    use crate::camera::Movement;

    use super::*;

    #[test]
    fn left_drag_changes_camera_angles() {
        let mut scene = SceneState::default();
        let _ = scene.execute(Command::OrbitCamera {
            delta: Vec2::new(10.0, -20.0),
        });
        assert!((scene.camera().theta() + 0.1).abs() < 1e-6);
        assert!((scene.camera().phi() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn right_drag_rotates_selected_joint() {
        let mut scene = SceneState::default();
        assert_eq!(scene.selected_joint(), LimbId::LeftForearm);
        let _ = scene.execute(Command::RotateJoint {
            delta: Vec2::new(5.0, 30.0),
        });
        let angles = scene.pose().angles(LimbId::LeftForearm);
        assert!((angles.x - 0.3).abs() < 1e-6);
        assert!((angles.z + 0.05).abs() < 1e-6);
    }

    #[test]
    fn horizontal_drag_turns_head() {
        let mut scene = SceneState::default();
        scene.pose_mut().select(LimbId::Head);
        let before = scene.frame().limbs[1].model;
        let _ = scene.execute(Command::RotateJoint {
            delta: Vec2::new(50.0, 0.0),
        });
        let head = scene.pose().angles(LimbId::Head);
        assert!((head.y + 0.5).abs() < 1e-6);
        assert_eq!(head.z, 0.0);
        let after = scene.frame().limbs[1];
        assert_eq!(after.limb, LimbId::Head);
        assert!(!after.model.abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn starts_from_configured_camera_and_joint() {
        let options = Options::from_toml_str(
            "[camera]\ninitial = \"free\"\n[controls]\ninitial_joint = \"right_hand\"\n",
        )
        .unwrap();
        let scene = SceneState::new(&options, 1.0);
        assert_eq!(scene.active_camera(), ActiveCamera::Free);
        assert_eq!(scene.selected_joint(), LimbId::RightHand);
    }

    #[test]
    fn middle_drag_moves_torso() {
        let mut scene = SceneState::default();
        let _ = scene.execute(Command::MoveTorso {
            delta: Vec2::new(20.0, 10.0),
        });
        assert!(scene
            .pose()
            .torso_position
            .abs_diff_eq(Vec2::new(0.2, -0.1), 1e-6));
        let frame = scene.frame();
        let torso = frame.limbs[0].model.w_axis;
        assert!((torso.x - 0.2).abs() < 1e-6);
        assert!((torso.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn scroll_zooms_active_camera() {
        let mut scene = SceneState::default();
        let _ = scene.execute(Command::Zoom { delta: 5.0 });
        assert!((scene.camera().distance() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn toggle_swaps_camera_and_keeps_aspect() {
        let mut scene = SceneState::new(&Options::default(), 1.5);
        scene.resize(900, 300);
        let _ = scene.execute(Command::ToggleCamera);
        assert_eq!(scene.active_camera(), ActiveCamera::Free);
        assert_eq!(scene.camera().screen_ratio(), 3.0);
    }

    #[test]
    fn projection_keys_affect_only_active_camera() {
        let mut scene = SceneState::default();
        let _ = scene.execute(Command::SetPerspective(false));
        assert_eq!(scene.frame().projection.z_axis.w, 0.0);
        let _ = scene.execute(Command::ToggleCamera);
        assert_eq!(scene.frame().projection.z_axis.w, -1.0);
    }

    #[test]
    fn frame_always_has_every_limb() {
        let mut scene = SceneState::default();
        let _ = scene.execute_all([
            Command::RotateJoint { delta: Vec2::new(40.0, -70.0) },
            Command::CycleJoint,
            Command::RotateJoint { delta: Vec2::new(-3.0, 9.0) },
            Command::MoveCamera(Movement::Left),
        ]);
        let frame = scene.frame();
        assert_eq!(frame.limbs.len(), LimbId::COUNT);
        assert_eq!(frame.view, scene.camera().view_matrix());
    }

    #[test]
    fn quit_stops_batch() {
        let mut scene = SceneState::default();
        let outcome = scene.execute_all([
            Command::ToggleInfoText,
            Command::Quit,
            Command::ToggleInfoText,
        ]);
        assert_eq!(outcome, Outcome::Exit);
        assert!(!scene.show_info());
    }

    #[test]
    fn reset_restores_rest_pose() {
        let mut scene = SceneState::default();
        let rest = scene.frame().limbs;
        let _ = scene.execute(Command::RotateJoint { delta: Vec2::ONE });
        let _ = scene.execute(Command::MoveTorso { delta: Vec2::ONE });
        assert_ne!(scene.frame().limbs, rest);
        let _ = scene.execute(Command::ResetPose);
        assert_eq!(scene.frame().limbs, rest);
    }
}
