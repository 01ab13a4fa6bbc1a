/// Terminal front end: interactive ASCII viewer and text pages
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use solidlab_core::catalog;
use solidlab_core::{ParamField, Ticker, ViewState};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub mod cli;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod views;

pub use renderer::AsciiRenderer;
pub use settings::Settings;

/// Pixel size assumed for one terminal cell when mapping mouse input
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

const KEY_ROTATION_STEP: f32 = 0.1;
const DOUBLE_CLICK: Duration = Duration::from_millis(400);
/// Rows kept free at the bottom for the properties panel
const PANEL_ROWS: u16 = 4;

/// Interactive viewer for one solid
pub struct TerminalApp {
    view: ViewState,
    renderer: AsciiRenderer,
    fps_target: u32,
    selected: usize,
    last_click: Option<Instant>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(view: ViewState, fps_target: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(view, width as usize, height as usize, fps_target))
    }

    /// Viewer with a fixed canvas size, not bound to the real terminal
    pub fn with_size(mut view: ViewState, width: usize, height: usize, fps_target: u32) -> Self {
        // Terminal cells are about twice as tall as they are wide.
        view.camera.aspect = width as f32 / (height.max(1) as f32 * 2.0);
        Self {
            view,
            renderer: AsciiRenderer::new(width, height),
            fps_target,
            selected: 0,
            last_click: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Parameter the bracket keys adjust
    pub fn selected_param(&self) -> ParamField {
        let specs = catalog::param_specs(self.view.kind());
        specs[self.selected % specs.len()].field
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut ticker = Ticker::new(self.fps_target);
        let handle = ticker.handle();

        let frames = ticker.run(|_frame| {
            while event::poll(Duration::from_millis(0))? {
                if !self.handle_event(event::read()?) {
                    handle.cancel();
                }
            }
            self.view.tick();
            self.render()?;
            self.count_frame();
            Ok::<_, io::Error>(())
        })?;

        debug!(frames, shape = %self.view.kind(), "viewer closed");
        Ok(())
    }

    fn count_frame(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if (now - self.last_frame).as_secs() >= 1 {
            self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
            self.frame_count = 0;
            self.last_frame = now;
        }
    }

    /// Apply one input event; returns false when the viewer should close
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                true
            }
            Event::Resize(width, height) => {
                self.resize(width as usize, height as usize);
                true
            }
            _ => true,
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) -> bool {
        if kind == KeyEventKind::Release {
            return true;
        }
        let step = KEY_ROTATION_STEP;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('w') | KeyCode::Up => self.view.rotation.rotate(step, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.view.rotation.rotate(-step, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.view.rotation.rotate(0.0, -step, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.view.rotation.rotate(0.0, step, 0.0),
            KeyCode::Char('e') => self.view.rotation.rotate(0.0, 0.0, step),
            KeyCode::Char('r') => self.view.rotation.rotate(0.0, 0.0, -step),
            KeyCode::Char('+') | KeyCode::Char('=') => self.view.wheel(-1.0),
            KeyCode::Char('-') => self.view.wheel(1.0),
            KeyCode::Char(' ') => self.view.auto_rotate = !self.view.auto_rotate,
            KeyCode::Char('g') => self.view.show_grid = !self.view.show_grid,
            KeyCode::Char('0') => self.view.reset_view(),
            KeyCode::Tab => {
                self.selected = (self.selected + 1) % catalog::param_specs(self.view.kind()).len()
            }
            KeyCode::Char('[') => self.step_selected(-1),
            KeyCode::Char(']') => self.step_selected(1),
            _ => {}
        }
        true
    }

    fn step_selected(&mut self, steps: i32) {
        let field = self.selected_param();
        if let Err(e) = self.view.step_param(field, steps) {
            warn!(param = field.name(), error = %e, "parameter change rejected");
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        let x = column as f32 * CELL_WIDTH_PX;
        let y = row as f32 * CELL_HEIGHT_PX;
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let now = Instant::now();
                if self
                    .last_click
                    .is_some_and(|last| now.duration_since(last) <= DOUBLE_CLICK)
                {
                    self.view.reset_view();
                    self.last_click = None;
                } else {
                    self.last_click = Some(now);
                }
                self.view.pointer_down(x, y);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.view.pointer_move(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.view.pointer_up(),
            MouseEventKind::ScrollDown => self.view.wheel(1.0),
            MouseEventKind::ScrollUp => self.view.wheel(-1.0),
            _ => {}
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.renderer = AsciiRenderer::new(width, height);
        self.view.camera.aspect = width as f32 / (height.max(1) as f32 * 2.0);
    }

    /// Rasterize the current frame into the off-screen buffer
    pub fn rasterize(&mut self) -> &AsciiRenderer {
        let model = self.view.model_matrix();
        self.renderer.clear();
        self.renderer
            .render_mesh(self.view.mesh(), &model, &self.view.camera, &self.view.lighting);
        if self.view.show_grid {
            self.renderer.render_grid(&self.view.grid, &self.view.camera);
        }
        &self.renderer
    }

    /// Overlay text: title line first, then the properties panel
    pub fn overlay_lines(&self) -> Vec<String> {
        let config = catalog::config(self.view.kind());
        let properties = self.view.properties();
        let selected = self.selected_param();

        let params: Vec<String> = catalog::param_specs(self.view.kind())
            .iter()
            .map(|spec| {
                let value = self.view.params().get(spec.field).unwrap_or_default();
                let marker = if spec.field == selected { ">" } else { " " };
                format!("{marker}{} {value:.2}", spec.label)
            })
            .collect();

        vec![
            format!(
                "SolidLab | {} | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll +/-=Zoom Space=Spin G=Grid 0=Reset Tab/[ ]=Size Q=Back",
                config.name, self.fps
            ),
            format!(
                "Surface area: {:.2}   Volume: {:.2}",
                properties.surface_area, properties.volume
            ),
            format!("{}   {}", config.formula.surface_area, config.formula.volume),
            params.join("  "),
            format!(
                "Auto-rotate: {}  Grid: {}",
                if self.view.auto_rotate { "on" } else { "off" },
                if self.view.show_grid { "on" } else { "off" }
            ),
        ]
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        let height = self.renderer.height() as u16;
        self.rasterize().draw(&mut stdout)?;

        let lines = self.overlay_lines();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(&lines[0]),
            ResetColor
        )?;
        let panel_top = height.saturating_sub(PANEL_ROWS);
        for (offset, line) in lines[1..].iter().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(0, panel_top + offset as u16),
                terminal::Clear(ClearType::UntilNewLine),
                SetForegroundColor(Color::Green),
                Print(line),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use solidlab_core::{AppConfig, Camera, ShapeKind};

    fn app(kind: ShapeKind) -> TerminalApp {
        let view = ViewState::new(kind, &AppConfig::default()).unwrap();
        TerminalApp::with_size(view, 80, 40, 30)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(ShapeKind::Cube);
        assert!(app.handle_event(key(KeyCode::Char('w'))));
        assert!(!app.handle_event(key(KeyCode::Char('q'))));
        assert!(!app.handle_event(key(KeyCode::Esc)));
    }

    #[test]
    fn test_rotation_and_toggles() {
        let mut app = app(ShapeKind::Cube);
        app.handle_event(key(KeyCode::Up));
        app.handle_event(key(KeyCode::Char('d')));
        assert!((app.view().rotation.x - 0.1).abs() < 1e-6);
        assert!((app.view().rotation.y - 0.1).abs() < 1e-6);

        let auto = app.view().auto_rotate;
        app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.view().auto_rotate, !auto);
        app.handle_event(key(KeyCode::Char('g')));
        assert!(!app.view().show_grid);

        app.handle_event(key(KeyCode::Char('0')));
        assert_eq!(app.view().rotation.x, 0.0);
    }

    #[test]
    fn test_zoom_keys_and_scroll() {
        let mut app = app(ShapeKind::Sphere);
        let start = app.view().camera.distance();
        app.handle_event(key(KeyCode::Char('-')));
        assert!((app.view().camera.distance() - start * 1.1).abs() < 1e-4);
        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0));
        assert!((app.view().camera.distance() - start * 1.1 * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_drag_maps_cells_to_pixels() {
        let mut app = app(ShapeKind::Cube);
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 10));
        // Two cells right is 16 px, so y turns by 0.16.
        assert!((app.view().rotation.y - 0.16).abs() < 1e-5);
        assert!(app.view().is_dragging());
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 12, 10));
        assert!(!app.view().is_dragging());
    }

    #[test]
    fn test_double_click_resets_view() {
        let mut app = app(ShapeKind::Cube);
        app.handle_event(key(KeyCode::Char('-')));
        app.handle_event(key(KeyCode::Char('w')));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 5));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));

        assert_eq!(app.view().rotation.x, 0.0);
        assert_eq!(app.view().camera.position, Camera::default().position);
    }

    #[test]
    fn test_bracket_keys_step_selected_param() {
        let mut app = app(ShapeKind::Torus);
        assert_eq!(app.selected_param(), ParamField::Radius);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.selected_param(), ParamField::Tube);

        let before = app.view().params().tube.unwrap();
        app.handle_event(key(KeyCode::Char(']')));
        let after = app.view().params().tube.unwrap();
        assert!((after - (before + 0.05)).abs() < 1e-9);

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.selected_param(), ParamField::Radius);
    }

    #[test]
    fn test_overlay_shows_properties() {
        let app = app(ShapeKind::Cube);
        let lines = app.overlay_lines();
        assert!(lines[0].contains("Cube"));
        assert_eq!(lines[1], "Surface area: 24.00   Volume: 8.00");
        assert!(lines[2].contains("S = 6a²"));
        assert!(lines[3].contains(">"));
    }

    #[test]
    fn test_rasterize_draws_the_solid() {
        let mut app = app(ShapeKind::Cylinder);
        let renderer = app.rasterize();
        assert_ne!(renderer.char_at(40, 20), ' ');
    }
}
