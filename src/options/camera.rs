use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::ActiveCamera;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Starting state of both cameras.
pub struct CameraOptions {
    /// Camera active at startup.
    #[schemars(title = "Initial Camera")]
    pub initial: ActiveCamera,
    /// Vertical field of view in degrees, shared by both cameras.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Orbital camera parameters.
    pub orbital: OrbitalOptions,
    /// Free camera parameters.
    pub free: FreeOptions,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            initial: ActiveCamera::Orbital,
            fovy: 60.0,
            orbital: OrbitalOptions::default(),
            free: FreeOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbital Camera", inline)]
#[serde(default)]
/// Orbital camera parameters. Angles in radians, planes as negative
/// view-space z.
pub struct OrbitalOptions {
    /// Starting azimuth.
    pub theta: f32,
    /// Starting elevation.
    pub phi: f32,
    /// Starting distance to the target.
    #[schemars(range(min = 0.1, max = 50.0))]
    pub distance: f32,
    /// Look-at point.
    pub target: [f32; 3],
    /// Near plane z.
    #[schemars(skip)]
    pub near: f32,
    /// Far plane z.
    #[schemars(skip)]
    pub far: f32,
    /// Step size of movement keys.
    #[schemars(title = "Move Speed", range(min = 0.05, max = 5.0), extend("step" = 0.05))]
    pub speed: f32,
}

impl Default for OrbitalOptions {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            distance: 3.5,
            target: [0.0; 3],
            near: -0.01,
            far: -10.0,
            speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Free Camera", inline)]
#[serde(default)]
/// Free camera parameters. Angles in radians, planes as negative
/// view-space z.
pub struct FreeOptions {
    /// Starting azimuth.
    pub theta: f32,
    /// Starting elevation.
    pub phi: f32,
    /// Starting position.
    pub position: [f32; 3],
    /// Near plane z.
    #[schemars(skip)]
    pub near: f32,
    /// Far plane z.
    #[schemars(skip)]
    pub far: f32,
    /// Step size of movement keys.
    #[schemars(title = "Move Speed", range(min = 0.05, max = 5.0), extend("step" = 0.05))]
    pub speed: f32,
    /// Distance that sizes the orthographic view volume.
    #[schemars(title = "Ortho Distance", range(min = 0.1, max = 100.0))]
    pub ortho_reference_distance: f32,
}

impl Default for FreeOptions {
    fn default() -> Self {
        Self {
            theta: -std::f32::consts::FRAC_PI_2,
            phi: 0.0,
            position: [-10.0, 0.0, 0.0],
            near: -0.01,
            far: -1000.0,
            speed: 0.5,
            ortho_reference_distance: 10.0,
        }
    }
}

impl CameraOptions {
    /// Describe the first value the cameras cannot use, if any.
    pub(super) fn problems(&self) -> Option<String> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Some(format!("camera.fovy must be in (0, 180), got {}", self.fovy));
        }
        let planes = [
            ("orbital", self.orbital.near, self.orbital.far),
            ("free", self.free.near, self.free.far),
        ];
        for (name, near, far) in planes {
            if near >= 0.0 {
                return Some(format!("camera.{name}.near must be negative, got {near}"));
            }
            if far >= near {
                return Some(format!(
                    "camera.{name}.far must lie beyond near ({far} >= {near})"
                ));
            }
        }
        if self.orbital.distance <= 0.0 {
            return Some(format!(
                "camera.orbital.distance must be positive, got {}",
                self.orbital.distance
            ));
        }
        if self.orbital.speed <= 0.0 || self.free.speed <= 0.0 {
            return Some("camera speeds must be positive".to_owned());
        }
        if self.free.ortho_reference_distance <= 0.0 {
            return Some("camera.free.ortho_reference_distance must be positive".to_owned());
        }
        None
    }
}
