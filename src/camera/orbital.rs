use std::f32::consts::FRAC_PI_3;

use glam::Vec3;

use super::{clamp_phi, spherical_offset, Camera, Lens, Movement};
use crate::options::OrbitalOptions;

/// Smallest distance the camera may approach its target.
pub const MIN_DISTANCE: f32 = 1e-3;

/// Camera circling a target point at a given distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalCamera {
    theta: f32,
    phi: f32,
    distance: f32,
    target: Vec3,
    up: Vec3,
    speed: f32,
    lens: Lens,
}

impl Default for OrbitalCamera {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            distance: 3.5,
            target: Vec3::ZERO,
            up: Vec3::Y,
            speed: 0.5,
            lens: Lens {
                near: -0.01,
                far: -10.0,
                fovy: FRAC_PI_3,
                aspect: 1.0,
                perspective: true,
            },
        }
    }
}

impl OrbitalCamera {
    /// Build from the `[camera.orbital]` options section.
    #[must_use]
    pub fn from_options(options: &OrbitalOptions, fovy: f32) -> Self {
        Self {
            theta: options.theta,
            phi: clamp_phi(options.phi),
            distance: options.distance.max(MIN_DISTANCE),
            target: Vec3::from_array(options.target),
            up: Vec3::Y,
            speed: options.speed,
            lens: Lens {
                near: options.near,
                far: options.far,
                fovy,
                aspect: 1.0,
                perspective: true,
            },
        }
    }

    /// Point the camera looks at.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the look-at point.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Step size for movement commands.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Horizontal right vector; independent of elevation.
    fn right(&self) -> Vec3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Vec3::new(cos_t, 0.0, -sin_t)
    }
}

impl Camera for OrbitalCamera {
    fn theta(&self) -> f32 {
        self.theta
    }

    fn set_theta(&mut self, theta: f32) {
        self.theta = theta;
    }

    fn phi(&self) -> f32 {
        self.phi
    }

    fn set_phi(&mut self, phi: f32) {
        self.phi = clamp_phi(phi);
    }

    fn distance(&self) -> f32 {
        self.distance
    }

    fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(MIN_DISTANCE);
    }

    fn lens(&self) -> &Lens {
        &self.lens
    }

    fn lens_mut(&mut self) -> &mut Lens {
        &mut self.lens
    }

    fn eye(&self) -> Vec3 {
        self.target + self.distance * spherical_offset(self.theta, self.phi)
    }

    fn forward(&self) -> Vec3 {
        -spherical_offset(self.theta, self.phi)
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn apply_movement(&mut self, movement: Movement) {
        match movement {
            Movement::Forward => self.set_distance(self.distance - self.speed),
            Movement::Backward => self.set_distance(self.distance + self.speed),
            Movement::Left => self.target -= self.speed * self.right(),
            Movement::Right => self.target += self.speed * self.right(),
            Movement::Upwards => self.target += self.speed * self.up,
            Movement::Downwards => self.target -= self.speed * self.up,
        }
    }
}
