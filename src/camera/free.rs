use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::Vec3;

use super::{clamp_phi, spherical_offset, Camera, Lens, Movement};
use crate::options::FreeOptions;

/// First-person camera that flies along its own viewing direction.
///
/// Looks along `-spherical_offset(theta, phi)`, the same direction an
/// [`OrbitalCamera`](super::OrbitalCamera) with equal angles looks, so
/// mouse look feels identical on both.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    theta: f32,
    phi: f32,
    position: Vec3,
    up: Vec3,
    speed: f32,
    ortho_distance: f32,
    lens: Lens,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self {
            theta: -FRAC_PI_2,
            phi: 0.0,
            position: Vec3::new(-10.0, 0.0, 0.0),
            up: Vec3::Y,
            speed: 0.5,
            ortho_distance: 10.0,
            lens: Lens {
                near: -0.01,
                far: -1000.0,
                fovy: FRAC_PI_3,
                aspect: 1.0,
                perspective: true,
            },
        }
    }
}

impl FreeCamera {
    /// Build from the `[camera.free]` options section.
    #[must_use]
    pub fn from_options(options: &FreeOptions, fovy: f32) -> Self {
        Self {
            theta: options.theta,
            phi: clamp_phi(options.phi),
            position: Vec3::from_array(options.position),
            up: Vec3::Y,
            speed: options.speed,
            ortho_distance: options.ortho_reference_distance,
            lens: Lens {
                near: options.near,
                far: options.far,
                fovy,
                aspect: 1.0,
                perspective: true,
            },
        }
    }

    /// Camera position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Unit right vector in the horizontal plane.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }
}

impl Camera for FreeCamera {
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
        self.ortho_distance
    }

    fn set_distance(&mut self, _distance: f32) {}

    fn lens(&self) -> &Lens {
        &self.lens
    }

    fn lens_mut(&mut self) -> &mut Lens {
        &mut self.lens
    }

    fn eye(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        -spherical_offset(self.theta, self.phi)
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn apply_movement(&mut self, movement: Movement) {
        let step = match movement {
            Movement::Forward => self.forward(),
            Movement::Backward => -self.forward(),
            Movement::Left => -self.right(),
            Movement::Right => self.right(),
            Movement::Upwards => self.up,
            Movement::Downwards => -self.up,
        };
        self.position += self.speed * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_faces_the_origin() {
        let camera = FreeCamera::default();
        assert!(camera.forward().abs_diff_eq(Vec3::X, 1e-6));
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-4);
        assert!(origin.y.abs() < 1e-4);
        assert!((origin.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn inverse_view_recovers_position() {
        let mut camera = FreeCamera::default();
        camera.set_position(Vec3::new(1.0, 2.0, -3.0));
        camera.set_theta(2.1);
        camera.set_phi(0.4);
        let eye = camera.view_matrix().inverse().transform_point3(Vec3::ZERO);
        assert!(eye.abs_diff_eq(Vec3::new(1.0, 2.0, -3.0), 1e-4));
    }

    #[test]
    fn moves_along_view_basis() {
        let mut camera = FreeCamera::default();
        camera.move_forward();
        assert!(camera.position().abs_diff_eq(Vec3::new(-9.5, 0.0, 0.0), 1e-5));
        camera.move_right();
        assert!(camera.position().abs_diff_eq(Vec3::new(-9.5, 0.0, 0.5), 1e-5));
        camera.move_left();
        camera.move_backward();
        camera.move_upwards();
        assert!(camera.position().abs_diff_eq(Vec3::new(-10.0, 0.5, 0.0), 1e-5));
        camera.move_downwards();
        assert!(camera.position().abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn distance_is_fixed_reference() {
        let mut camera = FreeCamera::default();
        camera.set_distance(1.0);
        assert_eq!(camera.distance(), 10.0);
    }

    #[test]
    fn right_stays_horizontal_when_looking_down() {
        let mut camera = FreeCamera::default();
        camera.set_phi(1.2);
        assert!(camera.right().y.abs() < 1e-6);
        assert!((camera.right().length() - 1.0).abs() < 1e-5);
    }
}
