//! Info text: Euler angles, projection mode, frame rate, and the
//! model → world → camera → NDC → pixel walk of a single point.

use std::fmt::Write as _;

use glam::{Mat4, Vec4};

use crate::scene::{JointAngles, LimbId};

/// `Euler Angles rotation matrix = Z(z)*Y(y)*X(x)` for a joint.
#[must_use]
pub fn euler_line(angles: JointAngles) -> String {
    format!(
        "Euler Angles rotation matrix = Z({:.2})*Y({:.2})*X({:.2})",
        angles.z, angles.y, angles.x
    )
}

/// Name of the projection in use.
#[must_use]
pub fn projection_label(perspective: bool) -> &'static str {
    if perspective {
        "Perspective"
    } else {
        "Orthographic"
    }
}

/// Maps NDC `[-1, 1]²` onto a `width × height` pixel grid with the origin
/// at the bottom-left corner. Depth passes through.
#[must_use]
pub fn viewport_matrix(width: u32, height: u32) -> Mat4 {
    let (w, h) = (width as f32, height as f32);
    Mat4::from_cols(
        Vec4::new(w / 2.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, h / 2.0, 0.0, 0.0),
        Vec4::Z,
        Vec4::new(w / 2.0, h / 2.0, 0.0, 1.0),
    )
}

/// Render `m · v = r` as four text rows, `precision` decimals per entry.
#[must_use]
pub fn matrix_vector_rows(m: Mat4, v: Vec4, r: Vec4, precision: usize) -> [String; 4] {
    let width = precision + 4;
    std::array::from_fn(|row| {
        let m_row = m.row(row);
        let mut line = String::from("[ ");
        for col in 0..4 {
            let _ = write!(line, "{:>width$.precision$} ", m_row[col]);
        }
        let sep = if row == 1 { "=" } else { " " };
        let _ = write!(
            line,
            "][ {:>width$.precision$} ] {sep} [ {:>width$.precision$} ]",
            v[row], r[row]
        );
        line
    })
}

/// One model-space point carried through every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MvpReport {
    /// Point in limb-local coordinates.
    pub model: Vec4,
    /// After the model matrix.
    pub world: Vec4,
    /// After the view matrix.
    pub camera: Vec4,
    /// After the projection matrix.
    pub clip: Vec4,
    /// After the perspective divide.
    pub ndc: Vec4,
    /// After the viewport mapping.
    pub pixel: Vec4,
}

impl MvpReport {
    /// Carry `point` through `model`, `view`, `projection` and a viewport
    /// of the given size.
    #[must_use]
    pub fn new(
        point: Vec4,
        model: Mat4,
        view: Mat4,
        projection: Mat4,
        viewport: (u32, u32),
    ) -> Self {
        let world = model * point;
        let camera = view * world;
        let clip = projection * camera;
        let ndc = clip / clip.w;
        let pixel = viewport_matrix(viewport.0, viewport.1) * ndc;
        Self {
            model: point,
            world,
            camera,
            clip,
            ndc,
            pixel,
        }
    }

    /// Multi-line text of the whole walk, matrices included.
    #[must_use]
    pub fn lines(&self, model: Mat4, view: Mat4, projection: Mat4, viewport: (u32, u32)) -> Vec<String> {
        let stages = [
            (" Model matrix             Model     In World Coords.", model, self.model, self.world, 2),
            (" View matrix              World     In Camera Coords.", view, self.world, self.camera, 2),
            (" Projection matrix        Camera                    In NDC", projection, self.camera, self.ndc, 2),
            (
                " Viewport matrix           NDC      In Pixel Coords.",
                viewport_matrix(viewport.0, viewport.1),
                self.ndc,
                self.pixel,
                5,
            ),
        ];
        let mut out = Vec::with_capacity(stages.len() * 5);
        for (title, m, v, r, precision) in stages {
            out.push(title.to_owned());
            out.extend(matrix_vector_rows(m, v, r, precision));
        }
        out
    }
}

/// Everything the info text shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoText {
    /// Joint the Euler line describes.
    pub joint: LimbId,
    /// Euler-angle line of `joint`.
    pub euler: String,
    /// `"Perspective"` or `"Orthographic"`.
    pub projection: &'static str,
    /// Frame-rate label.
    pub fps: String,
    /// Active camera name.
    pub camera: &'static str,
}

impl InfoText {
    /// Single line suitable for a window title.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "mannequin | {} camera | {} | {} | {}: {}",
            self.camera,
            self.projection,
            self.fps,
            self.joint.name(),
            self.euler
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::{Camera, OrbitalCamera};

    #[test]
    fn euler_line_lists_z_then_y_then_x() {
        let line = euler_line(JointAngles {
            x: 0.5,
            y: -1.25,
            z: 3.0,
        });
        assert_eq!(
            line,
            "Euler Angles rotation matrix = Z(3.00)*Y(-1.25)*X(0.50)"
        );
    }

    #[test]
    fn viewport_maps_ndc_corners() {
        let vp = viewport_matrix(800, 600);
        let low = vp * Vec4::new(-1.0, -1.0, 0.3, 1.0);
        let high = vp * Vec4::new(1.0, 1.0, 0.3, 1.0);
        assert_eq!(low, Vec4::new(0.0, 0.0, 0.3, 1.0));
        assert_eq!(high, Vec4::new(800.0, 600.0, 0.3, 1.0));
    }

    #[test]
    fn target_lands_in_screen_centre() {
        let camera = OrbitalCamera::default();
        let report = MvpReport::new(
            Vec4::W,
            Mat4::IDENTITY,
            camera.view_matrix(),
            camera.projection_matrix(),
            (800, 800),
        );
        assert!(report.camera.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, -3.5), 1e-5));
        assert!((report.pixel.x - 400.0).abs() < 1e-3);
        assert!((report.pixel.y - 400.0).abs() < 1e-3);
        assert!((report.ndc.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn report_has_four_stages() {
        let report = MvpReport::new(Vec4::W, Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, (2, 2));
        let lines = report.lines(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, (2, 2));
        assert_eq!(lines.len(), 20);
        assert!(lines[1].starts_with("[ "));
        assert!(lines[2].contains(" = "));
    }

    #[test]
    fn projection_labels() {
        assert_eq!(projection_label(true), "Perspective");
        assert_eq!(projection_label(false), "Orthographic");
    }
}
