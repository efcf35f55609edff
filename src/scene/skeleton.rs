//! Fixed limb hierarchy of the figure.
//!
//! The hierarchy is a compile-time table rather than a runtime graph. Table
//! order is the emission order, and each node's parent precedes it, so a
//! depth-first walk over the table visits nodes in table order.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier of one drawable box of the figure.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LimbId {
    /// Root of the hierarchy.
    Torso,
    /// Head, rotates about X then Y.
    Head,
    /// Left shoulder to elbow.
    LeftUpperArm,
    /// Left elbow to wrist.
    LeftForearm,
    /// Left hand.
    LeftHand,
    /// Right shoulder to elbow.
    RightUpperArm,
    /// Right elbow to wrist.
    RightForearm,
    /// Right hand.
    RightHand,
    /// Left hip to knee.
    LeftUpperLeg,
    /// Left knee to ankle.
    LeftLowerLeg,
    /// Left foot.
    LeftFoot,
    /// Right hip to knee.
    RightUpperLeg,
    /// Right knee to ankle.
    RightLowerLeg,
    /// Right foot.
    RightFoot,
}

impl LimbId {
    /// Number of limbs in the figure.
    pub const COUNT: usize = 14;

    /// Every limb, in emission order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Torso,
        Self::Head,
        Self::LeftUpperArm,
        Self::LeftForearm,
        Self::LeftHand,
        Self::RightUpperArm,
        Self::RightForearm,
        Self::RightHand,
        Self::LeftUpperLeg,
        Self::LeftLowerLeg,
        Self::LeftFoot,
        Self::RightUpperLeg,
        Self::RightLowerLeg,
        Self::RightFoot,
    ];

    /// Position of this limb in [`LimbId::ALL`] and in the skeleton table.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in logs and overlay text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Torso => "torso",
            Self::Head => "head",
            Self::LeftUpperArm => "left upper arm",
            Self::LeftForearm => "left forearm",
            Self::LeftHand => "left hand",
            Self::RightUpperArm => "right upper arm",
            Self::RightForearm => "right forearm",
            Self::RightHand => "right hand",
            Self::LeftUpperLeg => "left upper leg",
            Self::LeftLowerLeg => "left lower leg",
            Self::LeftFoot => "left foot",
            Self::RightUpperLeg => "right upper leg",
            Self::RightLowerLeg => "right lower leg",
            Self::RightFoot => "right foot",
        }
    }

    /// Static description of this limb.
    #[must_use]
    pub fn node(self) -> &'static LimbNode {
        &SKELETON[self.index()]
    }

    /// Whether this limb carries at least one joint angle.
    #[must_use]
    pub fn is_articulated(self) -> bool {
        !self.node().axes.is_empty()
    }
}

/// Rotation axis of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rotation about the local X axis.
    X,
    /// Rotation about the local Y axis.
    Y,
    /// Rotation about the local Z axis.
    Z,
}

impl Axis {
    /// Rotation matrix of `angle` radians about this axis.
    #[must_use]
    pub fn rotation(self, angle: f32) -> Mat4 {
        match self {
            Self::X => Mat4::from_rotation_x(angle),
            Self::Y => Mat4::from_rotation_y(angle),
            Self::Z => Mat4::from_rotation_z(angle),
        }
    }
}

/// One node of the limb table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbNode {
    /// Which limb this node describes.
    pub id: LimbId,
    /// Parent limb, `None` for the root.
    pub parent: Option<LimbId>,
    /// Translation from the parent's joint frame to this joint's origin.
    pub offset: Vec3,
    /// Box dimensions applied only when emitting this limb.
    pub scale: Vec3,
    /// Rotations applied after the offset, in order.
    pub axes: &'static [Axis],
}

impl LimbNode {
    /// Children of this node, in emission order.
    pub fn children(&self) -> impl Iterator<Item = LimbId> + '_ {
        SKELETON
            .iter()
            .filter(move |node| node.parent == Some(self.id))
            .map(|node| node.id)
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children().count()
    }
}

const HEAD_AXES: &[Axis] = &[Axis::X, Axis::Y];
const LIMB_AXES: &[Axis] = &[Axis::Z, Axis::X];

const ARM: Vec3 = Vec3::new(0.2, 0.4, 0.2);
const HAND: Vec3 = Vec3::new(0.15, 0.2, 0.15);
const FOOT: Vec3 = Vec3::new(0.2, 0.1, 0.3);
const LINK: Vec3 = Vec3::new(0.0, -0.4, 0.0);
const ANKLE: Vec3 = Vec3::new(0.0, -0.4, 0.1);

const fn limb(
    id: LimbId,
    parent: LimbId,
    offset: Vec3,
    scale: Vec3,
) -> LimbNode {
    LimbNode {
        id,
        parent: Some(parent),
        offset,
        scale,
        axes: LIMB_AXES,
    }
}

/// The figure, indexed by [`LimbId::index`].
pub static SKELETON: [LimbNode; LimbId::COUNT] = [
    LimbNode {
        id: LimbId::Torso,
        parent: None,
        offset: Vec3::new(0.0, 0.5, 0.0),
        scale: Vec3::new(0.8, 1.0, 0.4),
        axes: &[],
    },
    LimbNode {
        id: LimbId::Head,
        parent: Some(LimbId::Torso),
        offset: Vec3::new(0.0, 0.45, 0.0),
        scale: Vec3::splat(0.4),
        axes: HEAD_AXES,
    },
    limb(LimbId::LeftUpperArm, LimbId::Torso, Vec3::new(-0.5, 0.0, 0.0), ARM),
    limb(LimbId::LeftForearm, LimbId::LeftUpperArm, LINK, ARM),
    limb(LimbId::LeftHand, LimbId::LeftForearm, LINK, HAND),
    limb(LimbId::RightUpperArm, LimbId::Torso, Vec3::new(0.5, 0.0, 0.0), ARM),
    limb(LimbId::RightForearm, LimbId::RightUpperArm, LINK, ARM),
    limb(LimbId::RightHand, LimbId::RightForearm, LINK, HAND),
    limb(LimbId::LeftUpperLeg, LimbId::Torso, Vec3::new(-0.2, -1.05, 0.0), ARM),
    limb(LimbId::LeftLowerLeg, LimbId::LeftUpperLeg, LINK, ARM),
    limb(LimbId::LeftFoot, LimbId::LeftLowerLeg, ANKLE, FOOT),
    limb(LimbId::RightUpperLeg, LimbId::Torso, Vec3::new(0.2, -1.05, 0.0), ARM),
    limb(LimbId::RightLowerLeg, LimbId::RightUpperLeg, LINK, ARM),
    limb(LimbId::RightFoot, LimbId::RightLowerLeg, ANKLE, FOOT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_limb_id() {
        for (i, node) in SKELETON.iter().enumerate() {
            assert_eq!(node.id.index(), i);
            assert_eq!(LimbId::ALL[i], node.id);
        }
    }

    #[test]
    fn parents_precede_children() {
        for node in &SKELETON {
            if let Some(parent) = node.parent {
                assert!(parent.index() < node.id.index(), "{:?}", node.id);
            }
        }
        assert_eq!(
            SKELETON.iter().filter(|n| n.parent.is_none()).count(),
            1
        );
    }

    #[test]
    fn torso_has_five_children() {
        let children: Vec<_> = LimbId::Torso.node().children().collect();
        assert_eq!(
            children,
            vec![
                LimbId::Head,
                LimbId::LeftUpperArm,
                LimbId::RightUpperArm,
                LimbId::LeftUpperLeg,
                LimbId::RightUpperLeg,
            ]
        );
    }

    #[test]
    fn chains_are_linear() {
        assert_eq!(LimbId::LeftUpperArm.node().child_count(), 1);
        assert_eq!(LimbId::RightLowerLeg.node().child_count(), 1);
        assert_eq!(LimbId::LeftHand.node().child_count(), 0);
        assert_eq!(LimbId::Head.node().child_count(), 0);
    }

    #[test]
    fn only_torso_is_rigid() {
        assert!(!LimbId::Torso.is_articulated());
        assert!(LimbId::ALL[1..].iter().all(|l| l.is_articulated()));
    }
}
