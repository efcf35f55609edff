// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]


//! Articulated cube figure with a hierarchical transform stack and
//! switchable cameras, rendered with wgpu.
//!
//! A humanoid built from fourteen scaled boxes is posed every frame by
//! walking a fixed limb table with a [`scene::MatrixStack`]. Two cameras,
//! an orbital one and a free-fly one, share one [`camera::Camera`]
//! contract and either perspective or orthographic projection.
//!
//! # Key entry points
//!
//! - [`scene::PoseBuilder`] - turns joint angles into one model matrix per
//!   limb
//! - [`camera::CameraRig`] - both cameras and which one is active
//! - [`engine::SceneState`] - headless state mutated by
//!   [`engine::Command`]s
//! - [`engine::MannequinEngine`] - the same state drawn into a wgpu surface
//! - [`options::Options`] - TOML-loadable configuration
//!
//! # Frame flow
//!
//! Window events go through [`input::InputProcessor`], which emits
//! commands. Each command runs to completion against the scene state.
//! [`engine::SceneState::frame`] then asks the active camera for view and
//! projection matrices, runs the pose builder, and hands the resulting
//! [`scene::FrameMatrices`] to the cube renderer.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{Command, MannequinEngine, Outcome, SceneState};
pub use error::MannequinError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
