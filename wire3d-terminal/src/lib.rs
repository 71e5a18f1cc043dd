/// Interactive terminal frontend for the wire3d wireframe renderer
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use log::{debug, info};
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use wire3d_core::{render_frame, FrameParams, FrameStats, Mesh, RenderConfig};

pub mod renderer;

pub use renderer::TerminalCanvas;

/// Rotation speed of the model, radians per second
const SPIN_RATE: f32 = 1.5;

/// Per-keypress translation step, view-space units
const MOVE_STEP: f32 = 1.0;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Move { dx: f32, dy: f32, dz: f32 },
    ToggleVertices,
}

/// Map a key press to a command. Releases and repeats are ignored.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    let step = |dx, dy, dz| Some(Command::Move { dx, dy, dz });
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => step(0.0, 0.0, -MOVE_STEP),
            's' => step(0.0, 0.0, MOVE_STEP),
            'a' => step(MOVE_STEP, 0.0, 0.0),
            'd' => step(-MOVE_STEP, 0.0, 0.0),
            'q' => step(0.0, -MOVE_STEP, 0.0),
            'e' => step(0.0, MOVE_STEP, 0.0),
            'v' => Some(Command::ToggleVertices),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a RON render configuration; omitted fields keep their defaults
pub fn parse_config(text: &str) -> Result<RenderConfig> {
    let config: RenderConfig = ron::from_str(text).context("invalid render configuration")?;
    config.validate().context("invalid render configuration")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text)
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    mesh: Mesh,
    params: FrameParams,
    config: RenderConfig,
    canvas: TerminalCanvas,
    running: bool,
    last_tick: Instant,
    last_fps: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: RenderConfig, params: FrameParams) -> Result<Self> {
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        let now = Instant::now();

        let mut app = Self {
            mesh,
            params,
            config,
            canvas: TerminalCanvas::new(cols, rows),
            running: true,
            last_tick: now,
            last_fps: now,
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        };
        app.sync_canvas_size();
        Ok(app)
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(16);
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            let dt = frame_start.duration_since(self.last_tick).as_secs_f32();
            self.last_tick = frame_start;
            self.params.rotate(SPIN_RATE * dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if now.duration_since(self.last_fps).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / now.duration_since(self.last_fps).as_secs_f32();
                self.frame_count = 0;
                self.last_fps = now;
                debug!("{:.1} fps, {:?}", self.fps, self.stats);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(command) = command_for(key) {
                    self.apply(command);
                }
            }
            Event::Resize(cols, rows) => {
                self.canvas.resize(cols, rows);
                self.sync_canvas_size();
                debug!("resized to {}x{} pixels", self.config.width, self.config.height);
            }
            _ => {}
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Move { dx, dy, dz } => {
                self.params.translate(dx, dy, dz);
                info!("offset now {:?}", self.params.offset);
            }
            Command::ToggleVertices => self.config.draw_vertices = !self.config.draw_vertices,
        }
    }

    /// The canvas follows the terminal, so the configured size does too
    fn sync_canvas_size(&mut self) {
        self.config.width = self.canvas.width();
        self.config.height = self.canvas.height();
    }

    fn render(&mut self) -> Result<()> {
        {
            let mut buffer = self.canvas.buffer()?;
            self.stats = render_frame(&self.mesh, &self.params, &self.config, &mut buffer);
        }

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            SetBackgroundColor(TermColor::Black),
            Print(format!(
                "wire3d | FPS: {:.1} | {} tris | WASD/QE=Move V=Vertices Esc=Quit",
                self.fps, self.stats.triangles_drawn
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
