//! Window, GL context, and the winit-driven frame loop.
//!
//! winit owns the outer loop; the core [`FrameLoop`] state machine decides
//! when it ends. Every `RedrawRequested` renders one frame, presents it by
//! swapping buffers, and immediately requests the next redraw, so the loop
//! runs as fast as the platform allows with no pacing beyond the swap's
//! implicit vsync wait. An escape key-press (or a close request) destroys
//! the renderer's GL objects and exits.

use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use quadblur_core::frame::{FrameLoop, InputEvent, Key};
use quadblur_core::render::pipeline::{FrameRenderer, SinglePassRenderer, TwoPassRenderer};
use quadblur_core::scene;

use crate::error::AppError;

/// Which of the two demo pipelines to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Two quads drawn straight at the window.
    SinglePass,
    /// Two quads rendered offscreen, then blurred onto the window.
    TwoPass,
}

/// Opens the window and runs the chosen demo until escape or close.
///
/// # Errors
///
/// Returns [`AppError::Window`] if the event loop, GL context, or surface
/// cannot be created or a present fails, and [`AppError::Render`] if the
/// demo's GPU resources fail to build.
pub fn run(variant: Variant) -> Result<(), AppError> {
    let event_loop = EventLoop::new()
        .map_err(|e| AppError::Window(format!("failed to create event loop: {e}")))?;

    let mut app = App::new(variant);
    event_loop
        .run_app(&mut app)
        .map_err(|e| AppError::Window(format!("event loop terminated: {e}")))?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => {
            log::info!(
                "exiting after {} presented frames",
                app.frame_loop.frames_presented()
            );
            Ok(())
        }
    }
}

/// Everything that only exists while the window and GL context are alive.
struct GlState {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: glow::Context,
    renderer: Box<dyn FrameRenderer>,
}

struct App {
    variant: Variant,
    frame_loop: FrameLoop,
    state: Option<GlState>,
    failure: Option<AppError>,
}

impl App {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            frame_loop: FrameLoop::new(),
            state: None,
            failure: None,
        }
    }

    /// Tears down the renderer's GL objects and ends the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            state.renderer.destroy(&state.gl);
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.renderer.render(&state.gl);

        match state.surface.swap_buffers(&state.context) {
            Ok(()) => {
                self.frame_loop.frame_presented();
                state.window.request_redraw();
            }
            Err(e) => {
                self.failure = Some(AppError::Window(format!("failed to present frame: {e}")));
                self.shutdown(event_loop);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match create_gl_state(event_loop, self.variant) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("GL initialization failed: {e}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.frame_loop
                    .handle_event(Some(InputEvent::KeyPress(map_key(code))));
                if !self.frame_loop.is_running() {
                    log::debug!(
                        "escape pressed after {} frames",
                        self.frame_loop.frames_presented()
                    );
                    self.shutdown(event_loop);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        other => Key::Other(other as u32),
    }
}

/// Creates the window, GL display, context, and surface, loads the glow
/// function pointers, and builds the chosen renderer.
#[allow(unsafe_code)]
fn create_gl_state(event_loop: &ActiveEventLoop, variant: Variant) -> Result<GlState, AppError> {
    let attrs = Window::default_attributes()
        .with_title("quadblur")
        .with_inner_size(PhysicalSize::new(scene::WINDOW_WIDTH, scene::WINDOW_HEIGHT))
        .with_resizable(false);

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(attrs))
        .build(event_loop, ConfigTemplateBuilder::new(), |mut configs| {
            configs
                .next()
                .expect("glutin offered an empty config iterator")
        })
        .map_err(|e| AppError::Window(format!("failed to create GL display: {e}")))?;

    let window =
        window.ok_or_else(|| AppError::Window("display builder returned no window".into()))?;

    let raw_handle = window
        .window_handle()
        .map_err(|e| AppError::Window(format!("window handle unavailable: {e}")))?
        .as_raw();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_handle));

    let display = gl_config.display();

    // SAFETY: the raw window handle stays valid for the lifetime of
    // `window`, which outlives the context and surface in GlState.
    let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
        .map_err(|e| AppError::Window(format!("failed to create GL context: {e}")))?;

    let surface_attrs = window
        .build_surface_attributes(Default::default())
        .map_err(|e| AppError::Window(format!("failed to build surface attributes: {e}")))?;

    // SAFETY: same handle-lifetime argument as create_context above.
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
        .map_err(|e| AppError::Window(format!("failed to create window surface: {e}")))?;

    let context = not_current
        .make_current(&surface)
        .map_err(|e| AppError::Window(format!("failed to make GL context current: {e}")))?;

    // Vsync is the only frame pacing; not every platform supports setting it.
    if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
        log::warn!("failed to set swap interval: {e}");
    }

    // SAFETY: the display is current on this thread and outlives `gl`.
    let gl =
        unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

    let renderer: Box<dyn FrameRenderer> = match variant {
        Variant::SinglePass => Box::new(SinglePassRenderer::new(
            &gl,
            scene::WINDOW_WIDTH,
            scene::WINDOW_HEIGHT,
        )?),
        Variant::TwoPass => Box::new(TwoPassRenderer::new(
            &gl,
            scene::WINDOW_WIDTH,
            scene::WINDOW_HEIGHT,
        )?),
    };

    log::info!(
        "running {variant:?} at {}x{}",
        scene::WINDOW_WIDTH,
        scene::WINDOW_HEIGHT
    );

    Ok(GlState {
        window,
        surface,
        context,
        gl,
        renderer,
    })
}
