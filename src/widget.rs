use crate::graphics::{Canvas, Viewport};
use crate::state::PhysicsScene;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Space left around the wire, relative to its radius
const VIEW_MARGIN: f64 = 1.25;
/// Rows used by the status lines at the top
const HUD_ROWS: usize = 2;

/// Puts the terminal back the way it was, also on early return
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        Self::enter_with(out, terminal::enable_raw_mode, restore_terminal)
    }

    /// The guard exists as soon as raw mode is on, so a failed screen
    /// setup still restores the terminal
    fn enter_with(
        out: &mut impl Write,
        enable_raw_mode: fn() -> io::Result<()>,
        restore: fn(),
    ) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard { restore };
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// What a key press asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Interactive terminal view of the scene
pub struct SceneWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    /// Show the debug overlay
    debug: bool,
    canvas: Canvas,
}

impl Default for SceneWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWidget {
    pub fn new() -> Self {
        SceneWidget {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            debug: false,
            canvas: Canvas::new(0, 0),
        }
    }

    /// Runs the simulation loop at `fps` frames per second until the user quits
    pub fn run(&mut self, scene: &mut PhysicsScene, fps: u32) -> io::Result<()> {
        let mut out = io::stdout();
        let _guard = TerminalGuard::enter(&mut out)?;
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);

        self.paint(&mut out, scene)?;
        let mut last_frame = Instant::now();
        loop {
            let timeout = frame.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key, scene) == KeyAction::Quit {
                        log::debug!("quit requested at t = {:.3}", scene.time);
                        return Ok(());
                    }
                }
                continue;
            }
            last_frame = Instant::now();
            scene.simulate();
            self.paint(&mut out, scene)?;
        }
    }

    /// Applies a key press to the scene or the view
    pub fn handle_key(&mut self, key: KeyEvent, scene: &mut PhysicsScene) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => scene.toggle_pause(),
            KeyCode::Char('s') | KeyCode::Char('S') => scene.step(),
            KeyCode::Char('r') | KeyCode::Char('R') => scene.restart(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.debug = !self.debug,
            _ => {}
        }
        KeyAction::Continue
    }

    fn paint(&mut self, out: &mut impl Write, scene: &PhysicsScene) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let (width, height) = terminal_size()?;
        if width != self.canvas.width || height != self.canvas.height {
            self.canvas = Canvas::new(width, height);
            queue!(out, Clear(ClearType::All))?;
        }
        self.render(scene);

        for row in 0..self.canvas.height {
            queue!(out, MoveTo(0, row as u16), Print(self.canvas.row(row)))?;
        }
        out.flush()
    }

    /// Rasterizes the scene and the status text into the canvas
    fn render(&mut self, scene: &PhysicsScene) {
        let canvas = &mut self.canvas;
        canvas.clear();

        let scene_rows = canvas.height.saturating_sub(HUD_ROWS);
        let mut view = Viewport::fit(
            canvas.width,
            scene_rows,
            scene.wire_center,
            scene.wire_radius * VIEW_MARGIN,
        );
        // push the picture below the status lines
        view.origin.y += HUD_ROWS as f64 / view.scale_y.max(f64::EPSILON);

        canvas.draw_circle(&view, scene.wire_center, scene.wire_radius, '.');
        canvas.fill_disk(&view, scene.bead.pos, scene.bead.radius, 'O');
        canvas.fill_disk(
            &view,
            scene.analytic_world_pos(),
            0.5 * scene.analytic_bead.bead_radius,
            'x',
        );

        let readout = scene.readout;
        canvas.put_str(
            0,
            0,
            &format!(
                "constraint force: {:.3}   analytic force: {:.3}",
                readout.force, readout.analytic_force
            ),
        );
        canvas.put_str(0, 1, "[p] run/pause  [s] step  [r] restart  [d] debug  [q] quit");

        if self.debug {
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("t: {:.3} s", scene.time),
                format!("dt: {:.5}  substeps: {}", scene.dt, scene.num_steps),
                format!("angle: {:.3}", scene.analytic_bead.angle),
                format!(
                    "omega: {:.3} (constrained {:.3})",
                    readout.analytic_omega, readout.constrained_omega
                ),
                format!("deviation: {:.2e}", readout.deviation),
                format!("FPS: {:.2}", self.fps),
            ];
            for (i, line) in lines.iter().enumerate() {
                canvas.put_str(0, (HUD_ROWS + 1 + i) as isize, line);
            }
        }

        // Display 'Paused' if the simulation is paused
        if scene.paused {
            let text = "Paused";
            let col = (canvas.width as isize - text.len() as isize) / 2;
            let row = canvas.height as isize / 2;
            canvas.put_str(col, row, text);
        }
    }
}

/// Terminal size in cells, preferring `termsize` and falling back to crossterm
fn terminal_size() -> io::Result<(usize, usize)> {
    match termsize::get() {
        Some(size) if size.cols > 0 && size.rows > 0 => {
            Ok((size.cols as usize, size.rows as usize))
        }
        _ => {
            let (cols, rows) = terminal::size()?;
            Ok((cols as usize, rows as usize))
        }
    }
}
