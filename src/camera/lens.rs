use glam::{Mat4, Vec4};

/// Projection parameters shared by every camera.
///
/// `near` and `far` are signed view-space z values. The camera looks down
/// −Z, so both are negative and `far < near`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Near plane z (negative).
    pub near: f32,
    /// Far plane z (negative, beyond `near`).
    pub far: f32,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Viewport width / height.
    pub aspect: f32,
    /// Perspective when `true`, orthographic otherwise.
    pub perspective: bool,
}

impl Lens {
    /// Projection matrix for this lens.
    ///
    /// `reference_distance` sizes the orthographic view volume so that an
    /// object at that distance keeps roughly the size it has in
    /// perspective. It is ignored in perspective mode.
    #[must_use]
    pub fn projection(&self, reference_distance: f32) -> Mat4 {
        let half_fov = (self.fovy * 0.5).tan();
        if self.perspective {
            let top = self.near.abs() * half_fov;
            let right = top * self.aspect;
            perspective(-right, right, -top, top, self.near, self.far)
        } else {
            let top = reference_distance.abs() * half_fov;
            let right = top * self.aspect;
            orthographic(-right, right, -top, top, self.near, self.far)
        }
    }
}

/// Orthographic projection onto the cube `[-1, 1]³`.
///
/// Maps `z = near` to −1 and `z = far` to +1 (OpenGL clip convention).
#[must_use]
pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 / (right - left), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / (top - bottom), 0.0, 0.0),
        Vec4::new(0.0, 0.0, 2.0 / (far - near), 0.0),
        Vec4::new(
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            1.0,
        ),
    )
}

/// Perspective projection for the frustum bounded by `left..right`,
/// `bottom..top` on the near plane.
///
/// Built as a perspective divide matrix followed by
/// [`orthographic`], negated so that `w` is positive in front of the
/// camera. The bottom row is `(0, 0, -1, 0)`.
#[must_use]
pub fn perspective(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let squash = Mat4::from_cols(
        Vec4::new(near, 0.0, 0.0, 0.0),
        Vec4::new(0.0, near, 0.0, 0.0),
        Vec4::new(0.0, 0.0, near + far, 1.0),
        Vec4::new(0.0, 0.0, -far * near, 0.0),
    );
    (orthographic(left, right, bottom, top, near, far) * squash).mul_scalar(-1.0)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_3;

    use glam::Vec3;

    use super::*;

    fn lens(perspective: bool) -> Lens {
        Lens {
            near: -0.01,
            far: -10.0,
            fovy: FRAC_PI_3,
            aspect: 1.0,
            perspective,
        }
    }

    fn ndc_z(m: Mat4, z: f32) -> f32 {
        m.project_point3(Vec3::new(0.0, 0.0, z)).z
    }

    #[test]
    fn orthographic_maps_planes_to_unit_range() {
        let m = orthographic(-2.0, 2.0, -1.0, 1.0, -0.5, -5.0);
        assert!((ndc_z(m, -0.5) + 1.0).abs() < 1e-5);
        assert!((ndc_z(m, -5.0) - 1.0).abs() < 1e-5);
        let corner = m.project_point3(Vec3::new(2.0, 1.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_maps_planes_to_unit_range() {
        let m = lens(true).projection(3.5);
        assert!((ndc_z(m, -0.01) + 1.0).abs() < 1e-4);
        assert!((ndc_z(m, -10.0) - 1.0).abs() < 1e-4);
        // w equals distance in front of the camera.
        let clip = m * Vec4::new(0.0, 0.0, -4.0, 1.0);
        assert!((clip.w - 4.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_shrinks_with_distance() {
        let m = lens(true).projection(3.5);
        let near = m.project_point3(Vec3::new(1.0, 0.0, -2.0));
        let far = m.project_point3(Vec3::new(1.0, 0.0, -4.0));
        assert!((near.x - 2.0 * far.x).abs() < 1e-4);
        // At unit aspect and 60° fov, x = |z|·tan(30°) lands on the edge.
        let edge = m.project_point3(Vec3::new(2.0 * (FRAC_PI_3 * 0.5).tan(), 0.0, -2.0));
        assert!((edge.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn projection_modes_differ_in_bottom_row() {
        let p = lens(true).projection(3.5);
        let o = lens(false).projection(3.5);
        assert_ne!(p, o);
        assert!((p.z_axis.w + 1.0).abs() < 1e-6);
        assert!(o.z_axis.w.abs() < 1e-6);
        assert!((o.w_axis.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_extent_follows_reference_distance() {
        let half = (FRAC_PI_3 * 0.5).tan() * 3.5;
        let o = lens(false).projection(3.5);
        let edge = o.project_point3(Vec3::new(half, half, -1.0));
        assert!((edge.x - 1.0).abs() < 1e-4);
        assert!((edge.y - 1.0).abs() < 1e-4);
    }
}
