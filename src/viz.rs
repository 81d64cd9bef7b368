//! Visualization builder and runner.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::config::{Capacities, DeviceClass, DeviceHints};
use crate::error::VizError;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::router::Router;
use crate::theme::Theme;
use crate::time::Time;

/// An interactive sphere visualization builder.
///
/// Use method chaining to configure, then call `.run()` to open the
/// window and block until it is closed.
///
/// ```no_run
/// use sphera::Visualization;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Visualization::new().run()?;
///     Ok(())
/// }
/// ```
pub struct Visualization {
    hints: DeviceHints,
    theme: Theme,
    seed: Option<u64>,
    title: String,
}

impl Visualization {
    /// Create a visualization with capacities detected from the local
    /// machine and the default theme.
    pub fn new() -> Self {
        Self {
            hints: DeviceHints::local(1280),
            theme: Theme::default(),
            seed: None,
            title: "sphera".to_string(),
        }
    }

    /// Override the detected device hints (and with them the particle
    /// capacities).
    pub fn with_device_hints(mut self, hints: DeviceHints) -> Self {
        self.hints = hints;
        self
    }

    /// Set the starting theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Seed the scatter/burst jitter for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Run the visualization. Blocks until the window is closed.
    pub fn run(self) -> Result<(), VizError> {
        let caps = Capacities::for_class(DeviceClass::from_hints(self.hints));
        let seed = self.seed.unwrap_or_else(rand::random);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(caps, self.theme, seed, self.title);
        event_loop.run_app(&mut app)?;

        match app.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Visualization {
    fn default() -> Self {
        Self::new()
    }
}

/// A grabbable cursor over the sphere, a plain pointer elsewhere.
fn hover_cursor(hovering: bool) -> CursorIcon {
    if hovering {
        CursorIcon::Grab
    } else {
        CursorIcon::Pointer
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    router: Option<Router>,
    input: Input,
    time: Time,
    caps: Capacities,
    theme: Theme,
    seed: u64,
    title: String,
    last_scroll: f32,
    fatal: Option<VizError>,
}

impl App {
    fn new(caps: Capacities, theme: Theme, seed: u64, title: String) -> Self {
        Self {
            window: None,
            gpu_state: None,
            router: None,
            input: Input::new(1280, 720),
            time: Time::new(),
            caps,
            theme,
            seed,
            title,
            last_scroll: 0.0,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), VizError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        window.set_cursor(hover_cursor(false));

        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);

        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        self.router = Some(Router::new(&self.caps, aspect, self.seed, self.theme));

        self.gpu_state = Some(pollster::block_on(GpuState::new(
            window.clone(),
            &self.caps,
        ))?);
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event, self.time.elapsed());

        match event {
            WindowEvent::CloseRequested => {
                if let Some(router) = &mut self.router {
                    router.dispose();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.input
                    .set_window_size(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(router) = &mut self.router {
                    let aspect =
                        physical_size.width.max(1) as f32 / physical_size.height.max(1) as f32;
                    router.resize(aspect);
                }
            }

            WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                if let Some(router) = &mut self.router {
                    match self.input.cursor_ndc() {
                        Some(ndc) => router.on_pointer_move(ndc),
                        None => router.on_pointer_left(),
                    }
                }
            }

            WindowEvent::MouseWheel { .. } => {
                let fraction = self.input.scroll_fraction();
                if fraction != self.last_scroll {
                    self.last_scroll = fraction;
                    if let Some(router) = &mut self.router {
                        router.on_scroll(fraction);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let (now, dt) = self.time.update();

                if let Some(router) = &mut self.router {
                    if self.input.double_clicked() {
                        router.on_double_click(now);
                    }
                    if self.input.toggle_pressed() {
                        router.toggle_mode();
                    }
                    router.tick(now, dt);

                    if let Some(window) = &self.window {
                        window.set_cursor(hover_cursor(router.hovering()));
                    }
                }
                self.input.begin_frame();

                if let (Some(gpu_state), Some(router)) = (&mut self.gpu_state, &self.router) {
                    match gpu_state.render(router, now, dt) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
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
