//! Standalone window backed by winit.
//!
//! The window title doubles as the info display: projection mode, frame
//! rate and the selected joint's Euler angles.
//!
//! ```no_run
//! # use mannequin::Viewer;
//! Viewer::builder()
//!     .with_title("mannequin")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::{MannequinEngine, Outcome},
    error::MannequinError,
    input::{InputEvent, MouseButton},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: "mannequin".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Title shown while the info text is hidden.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the posable figure.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the quit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`MannequinError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), MannequinError> {
        let event_loop =
            EventLoop::new().map_err(|e| MannequinError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            shown_title: String::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MannequinError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<MannequinEngine>,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
    /// Last title pushed to the window, to avoid redundant updates.
    shown_title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn refresh_title(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let title = engine
            .info_text()
            .map_or_else(|| self.title.clone(), |info| info.title());
        if title != self.shown_title {
            window.set_title(&title);
            self.shown_title = title;
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine) else {
            return;
        };
        if engine.should_render() {
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    let (w, h) = viewport_size(window.inner_size());
                    engine.resize(w, h);
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }
        window.request_redraw();
        self.refresh_title();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                options.display.window_width,
                options.display.window_height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(MannequinEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        let outcome = match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                engine.resize(w, h);
                Outcome::Continue
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                Outcome::Continue
            }
            WindowEvent::MouseInput { button, state, .. } => {
                MouseButton::from_winit(button).map_or(Outcome::Continue, |button| {
                    engine.handle_input(InputEvent::MouseButton {
                        button,
                        pressed: state == ElementState::Pressed,
                    })
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                engine.handle_input(InputEvent::scroll_from_winit(delta))
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                engine.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                })
            }
            WindowEvent::KeyboardInput { event, .. } => {
                match (event.state, event.physical_key) {
                    (ElementState::Pressed, PhysicalKey::Code(code)) => {
                        engine.handle_key(&format!("{code:?}"), event.repeat)
                    }
                    _ => Outcome::Continue,
                }
            }
            _ => Outcome::Continue,
        };

        if outcome == Outcome::Exit {
            log::info!("quit requested");
            event_loop.exit();
        }
    }
}
