//! Camera system for viewing the figure.
//!
//! Two cameras share one [`Camera`] contract: an [`OrbitalCamera`] that
//! circles a target point and a [`FreeCamera`] that flies through the
//! scene. A [`CameraRig`] owns both and tracks which one is active.

/// Free-fly camera.
pub mod free;
/// Projection parameters and matrix construction.
pub mod lens;
/// Camera orbiting a target point.
pub mod orbital;

use std::f32::consts::FRAC_PI_2;

pub use free::FreeCamera;
use glam::{Mat4, Vec3};
pub use lens::Lens;
pub use orbital::OrbitalCamera;
use serde::{Deserialize, Serialize};

use crate::options::CameraOptions;

/// Elevation is kept strictly inside (−π/2, π/2) by this margin so the
/// view direction never lines up with the up vector.
pub const PHI_LIMIT: f32 = FRAC_PI_2 - 1e-3;

/// Unit vector at azimuth `theta` (around +Y, measured from +Z) and
/// elevation `phi`.
#[must_use]
pub fn spherical_offset(theta: f32, phi: f32) -> Vec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vec3::new(cos_p * sin_t, sin_p, cos_p * cos_t)
}

pub(crate) fn clamp_phi(phi: f32) -> f32 {
    phi.clamp(-PHI_LIMIT, PHI_LIMIT)
}

/// Discrete camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Toward what the camera looks at.
    Forward,
    /// Away from what the camera looks at.
    Backward,
    /// Along the negative right vector.
    Left,
    /// Along the right vector.
    Right,
    /// Along world up.
    Upwards,
    /// Along negative world up.
    Downwards,
}

/// Shared contract of every camera.
pub trait Camera {
    /// Azimuth in radians.
    fn theta(&self) -> f32;
    /// Set the azimuth.
    fn set_theta(&mut self, theta: f32);
    /// Elevation in radians.
    fn phi(&self) -> f32;
    /// Set the elevation, clamped to ±[`PHI_LIMIT`].
    fn set_phi(&mut self, phi: f32);
    /// Distance used for zoom and orthographic sizing.
    fn distance(&self) -> f32;
    /// Set the distance. Cameras without a zoom distance ignore this.
    fn set_distance(&mut self, distance: f32);

    /// Projection parameters.
    fn lens(&self) -> &Lens;
    /// Mutable projection parameters.
    fn lens_mut(&mut self) -> &mut Lens;

    /// Camera position in world space.
    fn eye(&self) -> Vec3;
    /// Unit viewing direction.
    fn forward(&self) -> Vec3;
    /// World up vector passed to the look-at.
    fn up(&self) -> Vec3;

    /// Apply one step of `movement`.
    fn apply_movement(&mut self, movement: Movement);

    /// Viewport width / height.
    fn screen_ratio(&self) -> f32 {
        self.lens().aspect
    }

    /// Set the viewport width / height.
    fn set_screen_ratio(&mut self, ratio: f32) {
        self.lens_mut().aspect = ratio;
    }

    /// Whether the projection is perspective.
    fn is_perspective(&self) -> bool {
        self.lens().perspective
    }

    /// Switch between perspective and orthographic projection.
    fn set_perspective(&mut self, perspective: bool) {
        self.lens_mut().perspective = perspective;
    }

    /// World-to-camera transform.
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye(), self.forward(), self.up())
    }

    /// Camera-to-clip transform.
    fn projection_matrix(&self) -> Mat4 {
        self.lens().projection(self.distance())
    }

    /// Step forward.
    fn move_forward(&mut self) {
        self.apply_movement(Movement::Forward);
    }

    /// Step backward.
    fn move_backward(&mut self) {
        self.apply_movement(Movement::Backward);
    }

    /// Step left.
    fn move_left(&mut self) {
        self.apply_movement(Movement::Left);
    }

    /// Step right.
    fn move_right(&mut self) {
        self.apply_movement(Movement::Right);
    }

    /// Step up.
    fn move_upwards(&mut self) {
        self.apply_movement(Movement::Upwards);
    }

    /// Step down.
    fn move_downwards(&mut self) {
        self.apply_movement(Movement::Downwards);
    }
}

/// Which camera of a [`CameraRig`] drives the view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActiveCamera {
    /// The [`OrbitalCamera`].
    #[default]
    Orbital,
    /// The [`FreeCamera`].
    Free,
}

impl ActiveCamera {
    /// The other camera.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Orbital => Self::Free,
            Self::Free => Self::Orbital,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Orbital => "orbital",
            Self::Free => "free",
        }
    }
}

/// Owns both cameras for the lifetime of the scene.
#[derive(Debug, Clone)]
pub struct CameraRig {
    orbital: OrbitalCamera,
    free: FreeCamera,
    active: ActiveCamera,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(OrbitalCamera::default(), FreeCamera::default(), ActiveCamera::Orbital)
    }
}

impl CameraRig {
    /// Assemble a rig from two cameras.
    #[must_use]
    pub fn new(orbital: OrbitalCamera, free: FreeCamera, active: ActiveCamera) -> Self {
        Self {
            orbital,
            free,
            active,
        }
    }

    /// Build both cameras from options.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let fovy = options.fovy.to_radians();
        let mut orbital = OrbitalCamera::from_options(&options.orbital, fovy);
        let mut free = FreeCamera::from_options(&options.free, fovy);
        orbital.set_screen_ratio(aspect);
        free.set_screen_ratio(aspect);
        Self::new(orbital, free, options.initial)
    }

    /// Which camera is active.
    #[must_use]
    pub fn active_kind(&self) -> ActiveCamera {
        self.active
    }

    /// The active camera.
    #[must_use]
    pub fn active(&self) -> &dyn Camera {
        match self.active {
            ActiveCamera::Orbital => &self.orbital,
            ActiveCamera::Free => &self.free,
        }
    }

    /// The active camera, mutably.
    pub fn active_mut(&mut self) -> &mut dyn Camera {
        match self.active {
            ActiveCamera::Orbital => &mut self.orbital,
            ActiveCamera::Free => &mut self.free,
        }
    }

    /// The orbital camera, whether active or not.
    #[must_use]
    pub fn orbital(&self) -> &OrbitalCamera {
        &self.orbital
    }

    /// The free camera, whether active or not.
    #[must_use]
    pub fn free(&self) -> &FreeCamera {
        &self.free
    }

    /// Make `kind` the active camera, handing over the screen ratio.
    pub fn activate(&mut self, kind: ActiveCamera) {
        if kind == self.active {
            return;
        }
        let ratio = self.active().screen_ratio();
        self.active = kind;
        self.active_mut().set_screen_ratio(ratio);
        log::info!("switched to {} camera", kind.label());
    }

    /// Swap to the other camera.
    pub fn toggle(&mut self) -> ActiveCamera {
        self.activate(self.active.other());
        self.active
    }

    /// Update the active camera's aspect ratio for a new surface size.
    /// Zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.active_mut()
            .set_screen_ratio(width as f32 / height as f32);
    }
}
