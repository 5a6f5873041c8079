//! Window creation and event handling via winit.
//!
//! Provides [`OrreryApp`] which implements winit's [`ApplicationHandler`]
//! trait, and [`run_with_config`] to start the event loop. Each
//! `RedrawRequested` runs one animation tick - compose, render, request
//! the next redraw - so the loop stays aligned with the host's frame
//! scheduling. Stopping is simply not requesting another redraw.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use orrery_config::Config;
use orrery_input::InputController;
use orrery_render::{FrameRenderer, RenderContext, SurfaceError, init_render_context_blocking};
use orrery_scene::{FrameComposer, SceneParams, ViewState};

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state: window, GPU context, scene composer, and input.
pub struct OrreryApp {
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<FrameRenderer>,
    composer: FrameComposer,
    view: ViewState,
    input: InputController,
    scene_params: SceneParams,
    config: Config,
}

impl OrreryApp {
    /// Create the application from a validated-or-not config.
    ///
    /// The configured initial zoom is fed through the view's clamped
    /// setter, so out-of-range values leave the default in place.
    pub fn new(config: Config) -> Self {
        let mut view = ViewState::new();
        view.apply_scale_delta(config.scene.scale - 1.0);

        Self {
            window: None,
            gpu: None,
            renderer: None,
            composer: FrameComposer::new(config.window.width, config.window.height),
            view,
            input: InputController::new(),
            scene_params: scene_params_from_config(&config),
            config,
        }
    }

    /// Current view state (for inspection in tests).
    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

/// Map the configuration surface onto the composer's scene parameters.
pub fn scene_params_from_config(config: &Config) -> SceneParams {
    SceneParams {
        earth_radius: config.scene.earth_radius,
        moon_radius: config.scene.moon_radius,
        moon_distance: config.scene.moon_distance,
        width_segments: config.scene.width_segments,
        height_segments: config.scene.height_segments,
        trace_segments: config.scene.trace_segments,
        earth_color: config.scene.earth_color,
        color_seed: config.scene.color_seed,
        wireframe: config.debug.wireframe,
    }
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.composer.set_viewport(size.width, size.height);

        // A missing graphics context is fatal at startup; no partial
        // rendering is attempted.
        let gpu = match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => gpu,
            Err(err) => {
                error!("GPU initialization failed: {err}");
                event_loop.exit();
                return;
            }
        };
        let renderer = match FrameRenderer::new(&gpu) {
            Ok(renderer) => renderer,
            Err(err) => {
                error!("Shader compilation failed: {err}");
                event_loop.exit();
                return;
            }
        };

        info!(
            "Orrery started: {}x{} surface",
            size.width.max(1),
            size.height.max(1)
        );
        window.request_redraw();
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.composer.set_viewport(new_size.width, new_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.on_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .on_cursor_moved(position.x, position.y, &mut self.view);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.on_scroll(delta, &mut self.view);
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.on_cursor_left();
            }
            WindowEvent::RedrawRequested => {
                let (Some(gpu), Some(renderer)) = (self.gpu.as_ref(), self.renderer.as_ref())
                else {
                    return;
                };

                let submissions = self.composer.compose(&self.view, &self.scene_params);
                match renderer.render(gpu, &submissions) {
                    Ok(()) => {}
                    Err(SurfaceError::Timeout) => {
                        warn!("Surface timeout, skipping frame");
                    }
                    Err(err) => {
                        error!("Rendering failed: {err}");
                        event_loop.exit();
                        return;
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the application with the given config.
///
/// This function blocks until the window is closed.
pub fn run_with_config(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = OrreryApp::new(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
