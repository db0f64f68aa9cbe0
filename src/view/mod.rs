//! TUI rendering and terminal management (impure shell)

pub mod render;

pub use render::{buffer_to_string, render_wall, CellMetrics, ScreenState};

use crate::component::{ActivitySink, JsonLinesSink, TracingSink, WallComponent};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::integration;
use crate::layout::TextCardFactory;
use crate::model::{AppError, ContentId, KeyAction, WallError};
use crate::source::InputSource;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend, TestBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest wait for terminal events before polling the source again.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Wall rejected an operation
    #[error("Wall error: {0}")]
    Wall(#[from] WallError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// The wall component used by the binary.
pub type TerminalWall = WallComponent<TextCardFactory>;

/// Build the component described by `config`.
///
/// Activities go to `activity_log_path` as JSON lines when configured and to
/// the log otherwise.
///
/// # Errors
///
/// `AppError` for invalid options or an unwritable activity file.
pub fn build_component(config: &ResolvedConfig) -> Result<TerminalWall, AppError> {
    let options = config.component_options()?;
    let metrics = CellMetrics {
        width_px: config.cell_width_px,
        height_px: config.cell_height_px,
    };
    let factory = metrics.card_factory(config.min_content_width);
    let sink: Box<dyn ActivitySink> = match &config.activity_log_path {
        Some(path) => Box::new(JsonLinesSink::new(std::fs::File::create(path)?)),
        None => Box::new(TracingSink),
    };
    Ok(WallComponent::new(options, factory, sink)?)
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    component: TerminalWall,
    input_source: InputSource,
    line_counter: usize,
    key_bindings: KeyBindings,
    metrics: CellMetrics,
    focus: Option<ContentId>,
    modal: Option<ContentId>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Enter raw mode and the alternate screen, then build the app.
    ///
    /// # Errors
    ///
    /// `TuiError` if the terminal cannot be set up or the initial input fails.
    pub fn new(
        component: TerminalWall,
        input_source: InputSource,
        metrics: CellMetrics,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, component, input_source, metrics)
    }

    /// Run until the reader quits.
    ///
    /// Sleeps in `event::poll` until a key, a resize, the next wall timer or
    /// the idle interval, whichever comes first.
    ///
    /// # Errors
    ///
    /// Propagates terminal, input and wall failures.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        loop {
            let timeout = self.next_timeout(Instant::now());
            let mut dirty = false;

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key, Instant::now())? {
                            self.component.destroy()?;
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(width, _) => {
                        self.handle_resize(width, Instant::now())?;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            dirty |= self.poll_input(now)?;
            dirty |= self.component.tick(now)?;
            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app on any backend: mounts the wall at the terminal width and
    /// applies whatever the source already holds.
    ///
    /// # Errors
    ///
    /// `TuiError` if the terminal size is unavailable or the input fails.
    pub fn with_terminal(
        terminal: Terminal<B>,
        component: TerminalWall,
        input_source: InputSource,
        metrics: CellMetrics,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            terminal,
            component,
            input_source,
            line_counter: 1,
            key_bindings: KeyBindings::default(),
            metrics,
            focus: None,
            modal: None,
        };
        let width = app.terminal.size()?.width.max(1);
        let now = Instant::now();
        app.component
            .mount(app.metrics.container_width(width), now)?;
        app.poll_input(now)?;
        Ok(app)
    }

    /// Time until something needs attention.
    fn next_timeout(&self, now: Instant) -> Duration {
        match self.component.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Apply new source lines. Returns whether any arrived.
    fn poll_input(&mut self, now: Instant) -> Result<bool, TuiError> {
        let lines = self.input_source.poll()?;
        if lines.is_empty() {
            return Ok(false);
        }
        let count = lines.len();
        let (events, errors) = integration::process_lines(lines, self.line_counter);
        self.line_counter += count;
        for error in &errors {
            warn!(error = %error, "Skipping malformed line");
        }
        let applied = integration::apply_events(&mut self.component, events, now)?;
        debug!(lines = count, applied, "Processed input");
        Ok(true)
    }

    /// Handle a key press. Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<bool, TuiError> {
        let Some(action) = self.key_bindings.get(key) else {
            return Ok(false);
        };
        match action {
            KeyAction::ShowMore => {
                let released = self.component.show_more(None, now)?;
                debug!(released, "Show more");
            }
            KeyAction::Relayout => self.component.entered_view(now)?,
            KeyAction::FocusNext => self.move_focus(1),
            KeyAction::FocusPrev => self.move_focus(-1),
            KeyAction::OpenFocused => {
                if let Some(id) = self.focus.clone() {
                    self.component.focus_content(&id)?;
                    if self.component.options().modal {
                        self.modal = Some(id);
                    }
                }
            }
            KeyAction::CloseModal => self.modal = None,
            KeyAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn move_focus(&mut self, step: isize) {
        let ids = render::visible_ids(&self.component);
        if ids.is_empty() {
            self.focus = None;
            return;
        }
        let len = ids.len() as isize;
        let next = match self.focus.as_ref().and_then(|f| ids.iter().position(|id| id == f)) {
            Some(current) => (current as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        self.focus = Some(ids[next as usize].clone());
    }

    fn handle_resize(&mut self, width: u16, now: Instant) -> Result<(), TuiError> {
        let width = width.max(1);
        debug!(width, "Terminal resized");
        self.component
            .resize(self.metrics.container_width(width), now)?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        // A card removed upstream takes focus and modal with it
        if let Some(id) = &self.focus {
            if render::find_card(&self.component, id).is_none() {
                self.focus = None;
            }
        }
        if let Some(id) = &self.modal {
            if render::find_card(&self.component, id).is_none() {
                self.modal = None;
            }
        }
        let screen = ScreenState {
            focused: self.focus.as_ref(),
            modal: self.modal.as_ref(),
            live: self.input_source.is_live(),
            metrics: self.metrics,
        };
        let component = &self.component;
        self.terminal
            .draw(|frame| render_wall(frame, component, &screen))?;
        Ok(())
    }

    /// The wall being shown.
    pub fn component(&self) -> &TerminalWall {
        &self.component
    }
}

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key(key, now).expect("key handled")
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Run the interactive wall until the reader quits.
///
/// Logging must be initialized by the caller.
///
/// # Errors
///
/// Propagates terminal, input and wall failures. The terminal is restored
/// either way.
pub fn run_with_source(input_source: InputSource, config: &ResolvedConfig) -> Result<(), TuiError> {
    let component = build_component(config)?;
    let metrics = CellMetrics {
        width_px: config.cell_width_px,
        height_px: config.cell_height_px,
    };
    info!(live = input_source.is_live(), "Starting wall");
    let result = TuiApp::new(component, input_source, metrics).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Read the whole source, lay it out at `width`x`height` cells and return
/// the rendered text.
///
/// # Errors
///
/// Propagates input and wall failures.
pub fn render_snapshot(
    input_source: InputSource,
    component: TerminalWall,
    metrics: CellMetrics,
    width: u16,
    height: u16,
) -> Result<String, TuiError> {
    let terminal = Terminal::new(TestBackend::new(width.max(1), height.max(1)))?;
    let mut app = TuiApp::with_terminal(terminal, component, input_source, metrics)?;
    while app.input_source.is_live() {
        std::thread::sleep(Duration::from_millis(10));
        app.poll_input(Instant::now())?;
    }
    app.draw()?;
    Ok(buffer_to_string(app.terminal.backend().buffer()))
}

fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
