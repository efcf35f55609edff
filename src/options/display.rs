use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window and drawing toggles.
pub struct DisplayOptions {
    /// Show matrices, Euler angles, projection and frame rate.
    #[schemars(title = "Show Info Text")]
    pub show_info: bool,
    /// Draw each limb's local XYZ axes.
    #[schemars(title = "Show Axes")]
    pub show_axes: bool,
    /// Draw black cube edges.
    #[schemars(title = "Show Edges")]
    pub show_edges: bool,
    /// Frame-rate cap; 0 renders as fast as the surface allows.
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
    /// Initial window width in logical pixels.
    #[schemars(skip)]
    pub window_width: u32,
    /// Initial window height in logical pixels.
    #[schemars(skip)]
    pub window_height: u32,
    /// Background color (linear RGB).
    #[schemars(title = "Clear Color")]
    pub clear_color: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_info: true,
            show_axes: true,
            show_edges: true,
            target_fps: 0,
            window_width: 800,
            window_height: 800,
            clear_color: [1.0, 1.0, 1.0],
        }
    }
}
