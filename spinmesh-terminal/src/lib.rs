/// Terminal host for the spinmesh viewport
use crossterm::{
    cursor,
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinmesh_core::{InputHandler, Surface, Viewport, ViewportConfig};
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod events;
pub mod renderer;
pub mod surface;

pub use events::{EventTranslator, HostEvent};
pub use renderer::AsciiRenderer;
pub use surface::{drawable_size, TerminalSurface};

/// Main application struct for the terminal viewport
pub struct TerminalApp {
    viewport: Viewport<TerminalSurface<Stdout>>,
    translator: EventTranslator,
    term_size: (u16, u16),
    running: bool,
    frame_interval: Duration,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewportConfig, target_fps: u32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (width, height) = drawable_size(cols, rows, false);

        let mut rng = StdRng::from_entropy();
        let viewport = Viewport::generate(
            config,
            &mut rng,
            TerminalSurface::new(stdout()),
            width,
            height,
        )
        .map_err(io::Error::other)?;

        let now = Instant::now();
        Ok(Self {
            viewport,
            translator: EventTranslator::new(),
            term_size: (cols, rows),
            running: true,
            frame_interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        info!("terminal viewport started at {}x{} cells", self.term_size.0, self.term_size.1);

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;

        info!("terminal viewport stopped after {} frames", self.viewport.frame_count());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle every pending input before drawing
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(&event, Instant::now());
            }
            if !self.running {
                break;
            }

            // Update and render
            let elapsed = frame_start.duration_since(self.last_tick);
            self.last_tick = frame_start;
            let status = self.status_line();
            self.viewport.surface_mut().set_status(status);
            self.viewport.tick(elapsed).map_err(io::Error::other)?;

            // Frame timing
            self.frame_count += 1;
            let spent = frame_start.elapsed();
            if spent < self.frame_interval {
                std::thread::sleep(self.frame_interval - spent);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &event::Event, now: Instant) {
        for host_event in self.translator.translate(event, now) {
            match host_event {
                HostEvent::Input(input) => {
                    let was_fullscreen = self.viewport.surface().is_fullscreen();
                    self.viewport.dispatch(input);
                    if self.viewport.surface().is_fullscreen() != was_fullscreen {
                        self.apply_layout();
                    }
                }
                HostEvent::TerminalResized { cols, rows } => {
                    self.term_size = (cols, rows);
                    self.apply_layout();
                }
                HostEvent::Quit => self.running = false,
            }
        }
    }

    /// Resize the viewport to the area the current mode leaves for drawing
    fn apply_layout(&mut self) {
        let (cols, rows) = self.term_size;
        let fullscreen = self.viewport.surface().is_fullscreen();
        let (width, height) = drawable_size(cols, rows, fullscreen);
        debug!("layout: {cols}x{rows} cells, fullscreen={fullscreen}");
        self.viewport.resize(width, height);
    }

    fn status_line(&self) -> String {
        let rotation = self.viewport.rotation();
        format!(
            "spinmesh | FPS: {:.1} | zoom {:.2} | rot x {:.2} y {:.2} | drag=rotate wheel=zoom dblclick/F=fullscreen Q=quit",
            self.fps,
            self.viewport.zoom(),
            rotation.x,
            rotation.y,
        )
    }
}
