use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::LimbId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Mouse sensitivities, per pixel of drag or per scroll line.
pub struct ControlOptions {
    /// Camera angle change per pixel of left drag (radians).
    #[schemars(title = "Orbit Sensitivity", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub orbit_sensitivity: f32,
    /// Joint angle change per pixel of right drag (radians).
    #[schemars(title = "Joint Sensitivity", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub joint_sensitivity: f32,
    /// Torso translation per pixel of middle drag.
    #[schemars(title = "Torso Sensitivity", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub torso_sensitivity: f32,
    /// Distance change per scroll line.
    #[schemars(title = "Zoom Step", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub zoom_step: f32,
    /// Joint the right drag targets at startup. Must not be the torso.
    #[schemars(title = "Initial Joint")]
    pub initial_joint: LimbId,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.01,
            joint_sensitivity: 0.01,
            torso_sensitivity: 0.01,
            zoom_step: 0.1,
            initial_joint: LimbId::LeftForearm,
        }
    }
}
