use std::fmt::Display;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context as _;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_caster::input::KeyTable;
use grid_caster::level;
use grid_caster::renderer::{self, Framebuffer, Viewport};
use grid_caster::settings::Settings;
use grid_caster::sim::{FrameClock, SimulationState};

// Windowing errors are not always Send + Sync, so go through their message
trait DisplayToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T, E: Display> DisplayToAnyhow<T> for Result<T, E> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    state: SimulationState,
    viewport: Viewport,

    // Input and timing
    keys: KeyTable,
    clock: FrameClock,
    started: Instant,

    // HUD
    frame_counter: u32,
    last_stats: Instant,

    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> anyhow::Result<Self> {
        let grid = level::grid().context("built-in level is malformed")?;
        log::info!("loaded {}x{} grid", grid.columns(), grid.rows());

        Ok(Self {
            window: None,
            surface: None,
            viewport: Viewport::new(0, 0, settings.res),
            clock: FrameClock::new(settings.max_frame_delta),
            state: SimulationState::new(grid, settings),

            keys: KeyTable::default(),
            started: Instant::now(),

            frame_counter: 0,
            last_stats: Instant::now(),

            error: None,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (w, h) = self.state.settings.window_size;
        let attributes = Window::default_attributes()
            .with_title(self.state.settings.title)
            .with_inner_size(LogicalSize::new(w, h));

        log::info!("creating window");
        let window = Rc::new(event_loop.create_window(attributes).ah()?);

        log::info!("creating surface");
        let context = softbuffer::Context::new(window.clone()).ah()?;
        let surface = Surface::new(&context, window.clone()).ah()?;

        let size = window.inner_size();
        self.viewport.resize(size.width as usize, size.height as usize);
        log::info!(
            "rendering {}x{} columns at res {}",
            self.viewport.internal_width,
            self.viewport.internal_height,
            self.viewport.res
        );

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, id: WindowId) -> anyhow::Result<()> {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let dt = self.clock.tick(now_ms);
        self.state.update(dt, &self.keys);

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };

        let (w, h) = (size.width as usize, size.height as usize);
        if (w, h) != (self.viewport.display_width, self.viewport.display_height) {
            self.viewport.resize(w, h);
        }

        surface.resize(dw, dh).ah()?;
        let mut buffer = surface.buffer_mut().ah()?;
        renderer::render_frame(
            &mut Framebuffer::new(&mut buffer, w, h),
            &self.viewport,
            &self.state,
        );
        buffer.present().ah()?;

        // FPS and resolution in the title, once a second
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_stats).as_secs_f64();
        if elapsed >= 1.0 {
            let fps = self.frame_counter as f64 / elapsed;
            let res = format!(
                "{}x{}",
                self.viewport.internal_width, self.viewport.internal_height
            );
            log::debug!("FPS: {fps:.1} ({res}), last frame {:.1}", self.clock.fps());
            window.set_title(&format!(
                "{} | FPS: {fps:.1} | {res}",
                self.state.settings.title
            ));
            self.frame_counter = 0;
            self.last_stats = now;
        }

        window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err.context("could not open window"));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match (code, state) {
                (KeyCode::Escape, ElementState::Pressed) => event_loop.exit(),
                (_, ElementState::Pressed) => self.keys.press(code),
                (_, ElementState::Released) => self.keys.release(code),
            },

            // Keys released while unfocused never arrive
            WindowEvent::Focused(false) => self.keys.clear(),

            WindowEvent::Resized(size) => {
                self.viewport.resize(size.width as usize, size.height as usize);
                log::info!(
                    "resized to {}x{}, internal {}x{}",
                    size.width,
                    size.height,
                    self.viewport.internal_width,
                    self.viewport.internal_height
                );
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(id) {
                    self.fail(event_loop, err.context("frame failed"));
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("GRID_CASTER_LOG");

    let event_loop = EventLoop::new().ah()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Settings::default())?;
    event_loop.run_app(&mut app).ah()?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
