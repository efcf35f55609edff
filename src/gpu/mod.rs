//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, the depth target, and the
//! instanced cube renderer that draws the figure.

/// Cube mesh, pipelines and per-frame upload.
pub mod cube;
/// Shared wgpu boilerplate for the cube pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment sized to the surface.
pub mod texture;

pub use cube::{CubeRenderer, CubeStyle};
pub use render_context::{RenderContext, RenderContextError};
