pub mod game;
pub mod visualize;

use std::{
    fmt::Display,
    io::{Stdout, Write},
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    config::{Config, Mode},
    maze::{Cell, Grid, Marker, Position},
};

/// Available modes when none is given on the command line
pub const MODES: [Mode; 2] = [Mode::Play, Mode::Solve];

/// File the logs are written to, in the working directory. The terminal is in
/// raw mode while the app runs, so logs cannot go to stdout.
pub const LOG_FILE_NAME: &str = "mazerun.log";

/// Environment variable holding `EnvFilter` directives, e.g. `debug` or
/// `info,mazerun::solvers=trace`.
pub const LOG_ENV: &str = "MAZERUN_LOG";

/// Build the log filter from `directives`, falling back to `info` when they are
/// missing or malformed.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global tracing subscriber, writing to [`LOG_FILE_NAME`].
/// The returned guard must be held until exit so buffered logs get flushed.
pub fn init_logging() -> WorkerGuard {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = log_filter(directives.as_deref());
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    if let Some(d) = directives.filter(|d| EnvFilter::try_new(d).is_err()) {
        tracing::warn!("[app] Ignoring malformed {}={:?}, logging at info", LOG_ENV, d);
    }
    guard
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Entry point once the terminal is set up
pub fn run(stdout: &mut Stdout, config: &Config) -> std::io::Result<()> {
    let mode = match config.mode {
        Some(mode) => mode,
        None => match select_mode(stdout)? {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };
    tracing::info!(
        "[app] Starting {:?} mode with a {}x{} maze, seed {:?}",
        mode,
        config.rows,
        config.cols,
        config.seed
    );

    if !ensure_terminal_fits(stdout, config.rows, config.cols)? {
        tracing::info!("[app] Terminal too small and user exited");
        return Ok(());
    }

    match mode {
        Mode::Play => game::run(stdout, config),
        Mode::Solve => visualize::run(stdout, config),
    }
}

/// Whether a frame of `rows × cols` cells plus the log line fits a terminal of
/// `term_size` (width, height).
fn fits_terminal(term_size: (u16, u16), rows: u16, cols: u16) -> bool {
    let (term_width, term_height) = term_size;
    term_width as u32 >= cols as u32 * Cell::CELL_WIDTH as u32 && term_height as u32 > rows as u32
}

/// Block until the terminal is large enough for the maze.
/// Returns Ok(false) if the user pressed Esc instead of resizing.
pub fn ensure_terminal_fits(stdout: &mut Stdout, rows: u16, cols: u16) -> std::io::Result<bool> {
    loop {
        let (term_width, term_height) = terminal::size()?;
        if fits_terminal((term_width, term_height), rows, cols) {
            return Ok(true);
        }
        tracing::debug!(
            "[app] Terminal {}x{} too small for {}x{} maze",
            term_width,
            term_height,
            rows,
            cols
        );
        let msg = format!(
            "Terminal size ({}x{}) is too small for a {}x{} maze, which needs {}x{}. \
Please resize the terminal, or press Esc to exit.\r\n",
            term_width,
            term_height,
            rows,
            cols,
            cols as u32 * Cell::CELL_WIDTH as u32,
            rows as u32 + 1,
        );
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
        )?;
        stdout.flush()?;

        match event::read()? {
            event::Event::Key(event::KeyEvent { code, kind, .. })
                if kind == event::KeyEventKind::Press && code == KeyCode::Esc =>
            {
                return Ok(false);
            }
            _ => {}
        }
    }
}

/// Clear the screen and draw the whole grid, with `player` drawn on top if given.
pub fn draw_grid(stdout: &mut Stdout, grid: &Grid, player: Option<Position>) -> std::io::Result<()> {
    queue!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if player == Some((row, col)) {
                stdout.queue(style::Print(Marker::Player))?;
            } else {
                stdout.queue(style::Print(grid[(row, col)]))?;
            }
        }
        stdout.queue(style::Print("\r\n"))?;
    }
    Ok(())
}

/// Draw a single marker over the cell at `pos`.
pub fn draw_marker(stdout: &mut Stdout, pos: Position, marker: Marker) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(pos.1 * Cell::CELL_WIDTH, pos.0),
        style::Print(marker)
    )
}

/// Write a message on the line right below the grid, truncated to the terminal width.
/// Passing `None` only clears the line.
pub fn log_terminal<D: Display>(
    stdout: &mut Stdout,
    grid_height: u16,
    msg: Option<StyledContent<D>>,
) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, grid_height),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    if let Some(msg) = msg {
        let term_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let text = msg.content().to_string();
        let (truncated, _) = text.unicode_truncate(term_width);
        stdout.queue(style::PrintStyledContent(StyledContent::new(
            *msg.style(),
            truncated,
        )))?;
    }
    stdout.flush()
}

/// Wait for Enter (Ok(true)) or Esc (Ok(false))
pub fn wait_for_enter_or_esc() -> std::io::Result<bool> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
            && kind == event::KeyEventKind::Press
        {
            match code {
                KeyCode::Enter => return Ok(true),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
                _ => {}
            }
        }
    }
}

/// Outcome of one key press in the mode menu
#[derive(Debug, PartialEq)]
enum MenuStep {
    /// Highlight the mode at this index
    Highlight(usize),
    Choose(Mode),
    Cancel,
    Ignore,
}

/// Apply a key press to the menu with `selected` currently highlighted.
/// Up and Down wrap around the ends of [`MODES`]; digits pick a mode directly.
fn menu_step(selected: usize, code: KeyCode) -> MenuStep {
    let count = MODES.len();
    match code {
        KeyCode::Up | KeyCode::Char('k') => MenuStep::Highlight((selected + count - 1) % count),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            MenuStep::Highlight((selected + 1) % count)
        }
        KeyCode::Enter => MenuStep::Choose(MODES[selected]),
        KeyCode::Char(c @ '1'..='9') => match MODES.get(c as usize - '1' as usize) {
            Some(&mode) => MenuStep::Choose(mode),
            None => MenuStep::Ignore,
        },
        KeyCode::Esc | KeyCode::Char('q') => MenuStep::Cancel,
        _ => MenuStep::Ignore,
    }
}

/// Draw the mode menu below the saved cursor position
fn draw_mode_menu(stdout: &mut Stdout, selected: usize) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown),
        style::PrintStyledContent(
            "Select a mode (arrow keys or 1-2, Enter to start, Esc to exit):\r\n"
                .with(Color::Yellow)
                .attribute(Attribute::Bold)
        )
    )?;
    for (i, mode) in MODES.iter().enumerate() {
        let label = format!("{}. {}", i + 1, mode);
        if i == selected {
            stdout.queue(style::PrintStyledContent(
                format!("> {label}").attribute(Attribute::Reverse),
            ))?;
        } else {
            stdout.queue(style::Print(format!("  {label}")))?;
        }
        stdout.queue(style::PrintStyledContent(
            format!("\r\n     {}\r\n", mode.description()).with(Color::DarkGrey),
        ))?;
    }
    stdout.flush()
}

/// Let the user pick a mode when none was given on the command line.
/// Returns None if the user exits with Esc.
fn select_mode(stdout: &mut Stdout) -> std::io::Result<Option<Mode>> {
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    let mut selected = 0;

    let chosen = loop {
        draw_mode_menu(stdout, selected)?;
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
            && kind == event::KeyEventKind::Press
        {
            match menu_step(selected, code) {
                MenuStep::Highlight(i) => selected = i,
                MenuStep::Choose(mode) => break Some(mode),
                MenuStep::Cancel => break None,
                MenuStep::Ignore => {}
            }
        }
    };

    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    match chosen {
        Some(mode) => {
            tracing::debug!("[app] Mode {:?} picked from menu", mode);
            stdout.execute(style::PrintStyledContent(
                format!("Starting: {}\r\n", mode)
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
            ))?;
        }
        None => stdout.flush()?,
    }
    Ok(chosen)
}
