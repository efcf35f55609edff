//! The articulated figure: limb table, transform stack and pose builder.
//!
//! [`skeleton`] declares the fixed hierarchy, [`PoseState`] holds the
//! joint angles the user edits, and [`PoseBuilder`] turns both into one
//! model matrix per limb every frame using a [`MatrixStack`].

pub mod matrix_stack;
pub mod pose;
pub mod skeleton;

pub use matrix_stack::MatrixStack;
pub use pose::{
    FrameMatrices, JointAngles, LimbTransform, PoseBuilder, PoseState,
};
pub use skeleton::{Axis, LimbId, LimbNode, SKELETON};
