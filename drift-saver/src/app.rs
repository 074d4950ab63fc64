//! Window, event loop and frame pacing around the simulation core.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use drift_core::{CanvasSize, Simulation};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::render::{FrameBuffer, Palette};
use crate::settings::SaverSettings;

const WINDOW_TITLE: &str = "Particle screen saver";
/// Used when the platform reports no monitor at all
const FALLBACK_DISPLAY: (u32, u32) = (1280, 720);

/// Everything that only exists once the window is up
struct Surface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    canvas: CanvasSize,
    simulation: Simulation,
}

struct FpsCounter {
    frames: u32,
    since: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed.as_secs() >= 1 {
            log::debug!("FPS: {:.1}", self.frames as f64 / elapsed.as_secs_f64());
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

pub struct SaverApp {
    settings: SaverSettings,
    palette: Palette,
    frame_interval: Duration,
    surface: Option<Surface>,
    last_frame: Instant,
    next_frame: Instant,
    fps: FpsCounter,
    error: Option<anyhow::Error>,
    finished: bool,
}

impl SaverApp {
    pub fn new(settings: SaverSettings) -> Self {
        let palette = settings.palette();
        let frame_interval = Duration::from_secs_f64(1.0 / settings.frame_rate.max(1) as f64);
        let now = Instant::now();
        Self {
            settings,
            palette,
            frame_interval,
            surface: None,
            last_frame: now,
            next_frame: now,
            fps: FpsCounter::new(),
            error: None,
            finished: false,
        }
    }

    /// True once the countdown ran out, as opposed to a user-requested exit.
    pub fn finished(&self) -> bool {
        self.finished
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let (display_width, display_height) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|monitor| {
                let size = monitor.size();
                (size.width, size.height)
            })
            .unwrap_or_else(|| {
                log::warn!("No monitor reported, assuming {:?}", FALLBACK_DISPLAY);
                FALLBACK_DISPLAY
            });
        let canvas = CanvasSize::fraction_of(
            display_width,
            display_height,
            self.settings.canvas_fraction,
        );
        log::info!(
            "Monitor {}x{}, canvas {}x{}",
            display_width,
            display_height,
            canvas.width,
            canvas.height
        );

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(canvas.width, canvas.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(canvas.width, canvas.height, surface_texture)
            .context("Failed to create pixel surface")?;

        let config = self.settings.simulation_config();
        let simulation = match self.settings.seed {
            Some(seed) => Simulation::with_seed(config, canvas, seed),
            None => Simulation::new(config, canvas),
        };

        Ok(Surface {
            window,
            pixels,
            canvas,
            simulation,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let canvas = surface.canvas;
        let frame = surface.simulation.advance(canvas, delta_time);
        let mut buffer = FrameBuffer::new(surface.pixels.frame_mut(), canvas.width, canvas.height)
            .context("Pixel buffer does not match the canvas size")?;
        buffer.draw_frame(&frame, &self.palette);

        if frame.finished {
            log::info!("Display time elapsed after {} frames", frame.index);
            self.finished = true;
        }

        surface.pixels.render().context("Failed to present frame")?;
        self.fps.tick();
        Ok(())
    }
}

impl ApplicationHandler for SaverApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match self.create_surface(event_loop) {
            Ok(surface) => {
                surface.window.request_redraw();
                self.surface = Some(surface);
                self.last_frame = Instant::now();
                self.next_frame = self.last_frame + self.frame_interval;
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Quit requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let resized = self
                    .surface
                    .as_mut()
                    .map(|surface| surface.pixels.resize_surface(size.width, size.height));
                if let Some(Err(error)) = resized {
                    let error = anyhow::Error::new(error).context("Failed to resize surface");
                    self.fail(event_loop, error);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error);
                } else if self.finished {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_frame {
            surface.window.request_redraw();
            self.next_frame += self.frame_interval;
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Open the window and run until the countdown ends or the user quits.
pub fn run(settings: SaverSettings) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = SaverApp::new(settings);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    if let Some(error) = app.error.take() {
        return Err(error);
    }
    if !app.finished() {
        log::info!("Closed before the countdown finished");
    }
    Ok(())
}
