//! The windowed engine: scene state, input, and the GPU renderer.
//!
//! [`SceneState`] is the headless core that commands mutate.
//! [`MannequinEngine`] wraps it with a surface, the cube renderer and frame
//! timing so a window loop only has to forward events and call
//! [`render`](MannequinEngine::render).

/// The complete command vocabulary.
pub mod command;
mod state;

use glam::Vec4;

pub use self::command::{Command, Outcome};
pub use self::state::SceneState;
use crate::error::MannequinError;
use crate::gpu::{CubeRenderer, CubeStyle, RenderContext};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;
use crate::util::overlay::{self, InfoText, MvpReport};

/// Scene state plus everything needed to draw it into a window.
pub struct MannequinEngine {
    /// GPU device, queue and surface.
    pub context: RenderContext,
    cubes: CubeRenderer,
    scene: SceneState,
    input: InputProcessor,
    /// Once-per-second frame-rate measurement.
    pub frame_timing: FrameTiming,
    options: Options,
}

impl MannequinEngine {
    /// Create the GPU context for `window` and build the scene from
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns [`MannequinError::Gpu`] if no usable adapter, device or
    /// surface configuration is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, MannequinError> {
        let context = RenderContext::new(window, size).await?;
        let (width, height) = context.size();
        let cubes = CubeRenderer::new(&context, style_from(&options));
        let scene = SceneState::new(&options, width as f32 / height as f32);
        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        log::info!("engine ready at {width}x{height}");

        Ok(Self {
            context,
            cubes,
            scene,
            input,
            frame_timing: FrameTiming::new(options.display.target_fps),
            options,
        })
    }

    /// Headless scene state.
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options. Camera poses are kept; sensitivities, bindings
    /// and display toggles take effect immediately.
    pub fn set_options(&mut self, options: Options) {
        self.scene.set_controls(options.controls.clone());
        *self.input.key_bindings_mut() = options.keybindings.clone();
        self.cubes.style = style_from(&options);
        self.frame_timing = FrameTiming::new(options.display.target_fps);
        self.options = options;
    }

    /// New surface size in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.cubes.resize(&self.context.device, width, height);
        self.scene.resize(width, height);
    }

    /// Run one command against the scene.
    pub fn execute(&mut self, command: Command) -> Outcome {
        log::trace!("{command:?}");
        self.scene.execute(command)
    }

    /// Feed a pointer event through the input processor.
    pub fn handle_input(&mut self, event: InputEvent) -> Outcome {
        let commands = self.input.handle_event(event);
        self.scene.execute_all(commands)
    }

    /// Feed a key press (`KeyCode` debug name) through the bindings.
    /// OS repeats of a held key only drive camera movement.
    pub fn handle_key(&mut self, key: &str, repeat: bool) -> Outcome {
        let command = if repeat {
            self.input.handle_key_repeat(key)
        } else {
            self.input.handle_key_press(key)
        };
        match command {
            Some(command) => self.execute(command),
            None => Outcome::Continue,
        }
    }

    /// Whether the frame limiter allows another frame now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// Build the pose, upload it and draw one frame.
    ///
    /// # Errors
    ///
    /// Returns the surface error if no swapchain texture could be
    /// acquired; callers should [`resize`](Self::resize) on `Lost` or
    /// `Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.scene.frame();
        self.cubes.prepare(&self.context.queue, &frame);

        let output = self.context.get_next_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        let [r, g, b] = self.options.display.clear_color;
        let clear = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };
        self.cubes.draw(&mut encoder, &view, clear);
        self.context.submit(encoder);
        output.present();

        if self.frame_timing.end_frame() && self.scene.show_info() {
            self.log_info(&frame);
        }
        Ok(())
    }

    /// Info text for the current frame, `None` while hidden.
    #[must_use]
    pub fn info_text(&self) -> Option<InfoText> {
        if !self.scene.show_info() {
            return None;
        }
        let joint = self.scene.selected_joint();
        Some(InfoText {
            joint,
            euler: overlay::euler_line(self.scene.pose().angles(joint)),
            projection: overlay::projection_label(self.scene.camera().is_perspective()),
            fps: self.frame_timing.label(),
            camera: self.scene.active_camera().label(),
        })
    }

    /// Window title reflecting the info text.
    #[must_use]
    pub fn title(&self) -> String {
        self.info_text()
            .map_or_else(|| "mannequin".to_owned(), |info| info.title())
    }

    fn log_info(&self, frame: &crate::scene::FrameMatrices) {
        let joint = self.scene.selected_joint();
        let Some(limb) = frame.limbs.iter().find(|t| t.limb == joint) else {
            return;
        };
        let viewport = self.context.size();
        let report = MvpReport::new(Vec4::W, limb.model, frame.view, frame.projection, viewport);
        log::debug!("{} joint origin:", joint.name());
        for line in report.lines(limb.model, frame.view, frame.projection, viewport) {
            log::debug!("{line}");
        }
    }
}

fn style_from(options: &Options) -> CubeStyle {
    CubeStyle {
        axes: options.display.show_axes,
        edges: options.display.show_edges,
    }
}
