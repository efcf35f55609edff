//! Joint-angle state and the per-frame pose builder.

use glam::{Mat4, Vec2};

use super::matrix_stack::MatrixStack;
use super::skeleton::{Axis, LimbId};

/// Rotation angles (radians) of one joint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    /// Angle about X.
    pub x: f32,
    /// Angle about Y.
    pub y: f32,
    /// Angle about Z.
    pub z: f32,
}

impl JointAngles {
    /// Angle for the given axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Mutable angle for the given axis.
    pub fn get_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Mutable figure state: joint angles, torso offset, and which joint the
/// joint-drag control targets.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseState {
    angles: [JointAngles; LimbId::COUNT],
    /// Torso offset in the XY plane, added before the torso's fixed offset.
    pub torso_position: Vec2,
    selected: LimbId,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            angles: [JointAngles::default(); LimbId::COUNT],
            torso_position: Vec2::ZERO,
            selected: LimbId::LeftForearm,
        }
    }
}

impl PoseState {
    /// Canonical pose: all angles zero, torso at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Joint angles of `limb`.
    #[must_use]
    pub fn angles(&self, limb: LimbId) -> JointAngles {
        self.angles[limb.index()]
    }

    /// Mutable joint angles of `limb`.
    pub fn angles_mut(&mut self, limb: LimbId) -> &mut JointAngles {
        &mut self.angles[limb.index()]
    }

    /// Joint targeted by the joint-drag control.
    #[must_use]
    pub fn selected(&self) -> LimbId {
        self.selected
    }

    /// Target a different joint. The torso has no joint and is ignored.
    pub fn select(&mut self, limb: LimbId) {
        if limb.is_articulated() {
            self.selected = limb;
        } else {
            log::warn!("{} has no joint to select", limb.name());
        }
    }

    /// Advance the selection to the next articulated limb, wrapping around.
    pub fn cycle_selection(&mut self) -> LimbId {
        let start = self.selected.index();
        for step in 1..=LimbId::COUNT {
            let candidate = LimbId::ALL[(start + step) % LimbId::COUNT];
            if candidate.is_articulated() {
                self.selected = candidate;
                break;
            }
        }
        self.selected
    }

    /// Rotate the selected joint: `bend` about X, `swing` about the joint's
    /// other axis (Z for limbs, Y for the head).
    pub fn rotate_selected(&mut self, bend: f32, swing: f32) {
        let selected = self.selected;
        let swing_axis = selected
            .node()
            .axes
            .iter()
            .copied()
            .find(|&axis| axis != Axis::X)
            .unwrap_or(Axis::Z);
        let angles = self.angles_mut(selected);
        angles.x += bend;
        *angles.get_mut(swing_axis) += swing;
    }

    /// Return every angle and the torso offset to zero, keeping the
    /// selection.
    pub fn reset(&mut self) {
        self.angles = [JointAngles::default(); LimbId::COUNT];
        self.torso_position = Vec2::ZERO;
    }

    /// Local joint rotation of `limb`, composed in the node's axis order.
    #[must_use]
    pub fn joint_rotation(&self, limb: LimbId) -> Mat4 {
        let angles = self.angles(limb);
        limb.node()
            .axes
            .iter()
            .fold(Mat4::IDENTITY, |acc, &axis| acc * axis.rotation(angles.get(axis)))
    }
}

/// Final model matrix of one limb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbTransform {
    /// Which box this matrix places.
    pub limb: LimbId,
    /// Limb-local to world transform, box scale included.
    pub model: Mat4,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrices {
    /// World to camera.
    pub view: Mat4,
    /// Camera to clip.
    pub projection: Mat4,
    /// One entry per limb, in emission order.
    pub limbs: Vec<LimbTransform>,
}

/// Walks the skeleton and produces one model matrix per limb.
///
/// The running model matrix is saved on the [`MatrixStack`] before each
/// subtree that hangs off a branch point and restored afterwards, so
/// siblings always start from their parent's frame. Single-child chains
/// keep composing onto the same running matrix.
#[derive(Debug, Default)]
pub struct PoseBuilder {
    stack: MatrixStack,
}

impl PoseBuilder {
    /// Create a builder with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose the model matrix of every limb for `pose`.
    pub fn build(&mut self, pose: &PoseState) -> Vec<LimbTransform> {
        let mut out = Vec::with_capacity(LimbId::COUNT);
        self.build_into(pose, &mut out);
        out
    }

    /// Like [`build`](Self::build) but reuses `out`'s allocation.
    pub fn build_into(&mut self, pose: &PoseState, out: &mut Vec<LimbTransform>) {
        out.clear();
        let depth_before = self.stack.depth();
        let underflows_before = self.stack.underflows();

        let mut model = Mat4::from_translation(pose.torso_position.extend(0.0));
        self.compose(LimbId::Torso, pose, &mut model, out);

        debug_assert_eq!(
            self.stack.depth(),
            depth_before,
            "unbalanced matrix stack after pose pass"
        );
        debug_assert_eq!(
            self.stack.underflows(),
            underflows_before,
            "matrix stack underflow during pose pass"
        );
    }

    /// Current stack depth (zero between passes).
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    fn compose(
        &mut self,
        limb: LimbId,
        pose: &PoseState,
        model: &mut Mat4,
        out: &mut Vec<LimbTransform>,
    ) {
        let node = limb.node();
        *model = *model
            * Mat4::from_translation(node.offset)
            * pose.joint_rotation(limb);
        out.push(LimbTransform {
            limb,
            model: *model * Mat4::from_scale(node.scale),
        });

        let branching = node.child_count() > 1;
        for child in node.children() {
            if branching {
                self.stack.push(*model);
            }
            self.compose(child, pose, model, out);
            if branching {
                *model = self.stack.pop();
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec3;

    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    fn find(limbs: &[LimbTransform], id: LimbId) -> Mat4 {
        limbs
            .iter()
            .find(|t| t.limb == id)
            .map(|t| t.model)
            .unwrap()
    }

    #[test]
    fn emits_fourteen_limbs_in_fixed_order() {
        let mut builder = PoseBuilder::new();
        let mut pose = PoseState::new();
        let order: Vec<_> = builder.build(&pose).iter().map(|t| t.limb).collect();
        assert_eq!(order, LimbId::ALL.to_vec());

        pose.angles_mut(LimbId::LeftForearm).x = 1.3;
        pose.angles_mut(LimbId::Head).y = -0.4;
        pose.torso_position = Vec2::new(0.3, -0.2);
        let order: Vec<_> = builder.build(&pose).iter().map(|t| t.limb).collect();
        assert_eq!(order.len(), 14);
        assert_eq!(order, LimbId::ALL.to_vec());
    }

    #[test]
    fn canonical_pose_matches_reference() {
        let limbs = PoseBuilder::new().build(&PoseState::new());
        let root = Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0));

        let torso = root * Mat4::from_scale(Vec3::new(0.8, 1.0, 0.4));
        assert!(approx(find(&limbs, LimbId::Torso), torso));

        let head = root
            * Mat4::from_translation(Vec3::new(0.0, 0.45, 0.0))
            * Mat4::from_scale(Vec3::splat(0.4));
        assert!(approx(find(&limbs, LimbId::Head), head));

        let left_foot = root
            * Mat4::from_translation(Vec3::new(-0.2, -1.05, 0.0))
            * Mat4::from_translation(Vec3::new(0.0, -0.4, 0.0))
            * Mat4::from_translation(Vec3::new(0.0, -0.4, 0.1))
            * Mat4::from_scale(Vec3::new(0.2, 0.1, 0.3));
        assert!(approx(find(&limbs, LimbId::LeftFoot), left_foot));
    }

    #[test]
    fn stack_is_balanced_after_pass() {
        let mut builder = PoseBuilder::new();
        assert_eq!(builder.stack_depth(), 0);
        let _ = builder.build(&PoseState::new());
        assert_eq!(builder.stack_depth(), 0);
        assert_eq!(builder.stack.underflows(), 0);
    }

    #[test]
    fn siblings_do_not_inherit_chain_rotation() {
        let mut pose = PoseState::new();
        pose.angles_mut(LimbId::LeftUpperArm).x = FRAC_PI_2;
        pose.angles_mut(LimbId::LeftForearm).x = FRAC_PI_2;

        let bent = PoseBuilder::new().build(&pose);
        let straight = PoseBuilder::new().build(&PoseState::new());

        // The whole left arm chain moved...
        assert!(!approx(
            find(&bent, LimbId::LeftHand),
            find(&straight, LimbId::LeftHand)
        ));
        // ...but every later sibling branch is unaffected.
        for id in [
            LimbId::RightUpperArm,
            LimbId::RightHand,
            LimbId::LeftUpperLeg,
            LimbId::RightFoot,
        ] {
            assert!(approx(find(&bent, id), find(&straight, id)), "{id:?}");
        }
    }

    #[test]
    fn chain_composes_parent_rotation() {
        let mut pose = PoseState::new();
        pose.angles_mut(LimbId::RightUpperArm).x = FRAC_PI_2;
        let limbs = PoseBuilder::new().build(&pose);

        let elbow = Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0))
            * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0))
            * Mat4::from_rotation_x(FRAC_PI_2)
            * Mat4::from_translation(Vec3::new(0.0, -0.4, 0.0));
        let expected = elbow * Mat4::from_scale(Vec3::new(0.2, 0.4, 0.2));
        assert!(approx(find(&limbs, LimbId::RightForearm), expected));

        // Rotating the shoulder a quarter turn about X swings the elbow
        // from below the shoulder to in front of it.
        let elbow_pos = elbow.transform_point3(Vec3::ZERO);
        assert!(elbow_pos.abs_diff_eq(Vec3::new(0.5, 0.5, -0.4), 1e-5));
    }

    #[test]
    fn head_rotates_x_then_y() {
        let mut pose = PoseState::new();
        pose.angles_mut(LimbId::Head).x = 0.3;
        pose.angles_mut(LimbId::Head).y = 0.7;
        let rotation = pose.joint_rotation(LimbId::Head);
        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.7);
        assert!(approx(rotation, expected));
    }

    #[test]
    fn torso_position_shifts_every_limb() {
        let mut pose = PoseState::new();
        pose.torso_position = Vec2::new(0.25, -0.5);
        let moved = PoseBuilder::new().build(&pose);
        let base = PoseBuilder::new().build(&PoseState::new());
        let shift = Mat4::from_translation(Vec3::new(0.25, -0.5, 0.0));
        for (m, b) in moved.iter().zip(&base) {
            assert!(approx(m.model, shift * b.model), "{:?}", m.limb);
        }
    }

    #[test]
    fn selection_skips_torso() {
        let mut pose = PoseState::new();
        pose.select(LimbId::RightFoot);
        assert_eq!(pose.cycle_selection(), LimbId::Head);

        pose.select(LimbId::Torso);
        assert_eq!(pose.selected(), LimbId::Head);
    }

    #[test]
    fn reset_clears_angles_and_offset() {
        let mut pose = PoseState::new();
        pose.rotate_selected(0.4, -0.2);
        pose.torso_position = Vec2::ONE;
        pose.reset();
        assert_eq!(pose, PoseState::new());
    }

    #[test]
    fn build_into_reuses_buffer() {
        let mut builder = PoseBuilder::new();
        let mut out = Vec::new();
        builder.build_into(&PoseState::new(), &mut out);
        builder.build_into(&PoseState::new(), &mut out);
        assert_eq!(out.len(), LimbId::COUNT);
    }

    #[test]
    fn swing_follows_joint_axes() {
        let mut pose = PoseState::new();
        pose.rotate_selected(0.4, -0.2);
        let forearm = pose.angles(LimbId::LeftForearm);
        assert_eq!((forearm.x, forearm.y, forearm.z), (0.4, 0.0, -0.2));

        pose.select(LimbId::Head);
        pose.rotate_selected(0.1, 0.3);
        let head = pose.angles(LimbId::Head);
        assert_eq!((head.x, head.y, head.z), (0.1, 0.3, 0.0));
    }
}
