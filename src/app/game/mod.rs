mod game_state;

pub use game_state::GameState;

use std::io::{Stdout, Write};

use crossterm::{
    event::{self, KeyCode},
    style::{Attribute, Color, Stylize},
};

use crate::{app, config::Config, generators::get_rng, maze::Direction};

#[derive(Debug, PartialEq)]
enum GameRunResult {
    /// Goal is reached
    GoalReached,
    /// Game is canceled by user
    Canceled,
}

/// What a terminal event means during play
#[derive(Debug, PartialEq)]
enum PlayerInput {
    Move(Direction),
    Quit,
    /// The terminal was resized, so the frame must be checked and redrawn
    Resize,
}

fn map_event(event: event::Event) -> Option<PlayerInput> {
    match event {
        event::Event::Key(event::KeyEvent { code, kind, .. })
            if kind == event::KeyEventKind::Press =>
        {
            map_key(code)
        }
        event::Event::Resize(_, _) => Some(PlayerInput::Resize),
        _ => None,
    }
}

fn map_key(code: KeyCode) -> Option<PlayerInput> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(PlayerInput::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(PlayerInput::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(PlayerInput::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(PlayerInput::Move(Direction::Right))
        }
        KeyCode::Esc | KeyCode::Char('q') => Some(PlayerInput::Quit),
        _ => None,
    }
}

/// Redraw the full frame: grid, player and status line.
fn draw_frame(stdout: &mut Stdout, game_state: &GameState) -> std::io::Result<()> {
    app::draw_grid(stdout, game_state.grid(), Some(game_state.player()))?;
    app::log_terminal(
        stdout,
        game_state.grid().rows(),
        Some(
            format!(
                "Moves: {}  (arrows or W/A/S/D to move, Esc to quit)",
                game_state.moves()
            )
            .with(Color::Cyan),
        ),
    )?;
    stdout.flush()
}

/// Main game loop. Reads one key event at a time and updates the game state.
/// Exits when either the goal is reached or user cancels.
fn game_loop(stdout: &mut Stdout, game_state: &mut GameState) -> std::io::Result<GameRunResult> {
    loop {
        draw_frame(stdout, game_state)?;

        if game_state.goal_reached() {
            tracing::info!("[game loop] Goal reached in {} moves", game_state.moves());
            return Ok(GameRunResult::GoalReached);
        }

        // Skip redrawing for events that change nothing
        loop {
            match map_event(event::read()?) {
                Some(PlayerInput::Move(direction)) => {
                    game_state.move_player(direction);
                    break;
                }
                Some(PlayerInput::Quit) => {
                    tracing::debug!("[game loop] Quit key pressed");
                    return Ok(GameRunResult::Canceled);
                }
                Some(PlayerInput::Resize) => {
                    let grid = game_state.grid();
                    if !app::ensure_terminal_fits(stdout, grid.rows(), grid.cols())? {
                        tracing::info!("[game loop] Terminal too small and user exited");
                        return Ok(GameRunResult::Canceled);
                    }
                    break;
                }
                None => {}
            }
        }
    }
}

/// Play mazes until the user quits
pub fn run(stdout: &mut Stdout, config: &Config) -> std::io::Result<()> {
    let mut rng = get_rng(config.seed);

    loop {
        let mut game_state = match GameState::initialize(config.rows, config.cols, &mut rng) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("[game] {}", e);
                return Ok(());
            }
        };
        let grid_height = game_state.grid().rows();

        let game_result = game_loop(stdout, &mut game_state)?;
        tracing::debug!("[game] Game loop exited with result: {:?}", game_result);
        if game_result == GameRunResult::Canceled {
            break;
        }

        app::log_terminal(
            stdout,
            grid_height,
            Some(
                format!(
                    "You found the exit in {} moves! Press Enter for a new maze, or Esc to exit.",
                    game_state.moves()
                )
                .with(Color::Green)
                .attribute(Attribute::Bold),
            ),
        )?;
        if !app::wait_for_enter_or_esc()? {
            break;
        }
        tracing::info!("[game] Restarting game with a new maze");
    }
    tracing::info!("[game] Game was canceled by user, exiting...");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Up), Some(PlayerInput::Move(Direction::Up)));
        assert_eq!(map_key(KeyCode::Char('w')), Some(PlayerInput::Move(Direction::Up)));
        assert_eq!(map_key(KeyCode::Char('s')), Some(PlayerInput::Move(Direction::Down)));
        assert_eq!(map_key(KeyCode::Char('a')), Some(PlayerInput::Move(Direction::Left)));
        assert_eq!(map_key(KeyCode::Right), Some(PlayerInput::Move(Direction::Right)));
        assert_eq!(map_key(KeyCode::Esc), Some(PlayerInput::Quit));
        assert_eq!(map_key(KeyCode::Char('q')), Some(PlayerInput::Quit));
        assert_eq!(map_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_event_mapping() {
        let press = |code| event::Event::Key(event::KeyEvent::new(code, event::KeyModifiers::NONE));
        assert_eq!(
            map_event(press(KeyCode::Left)),
            Some(PlayerInput::Move(Direction::Left))
        );
        assert_eq!(map_event(event::Event::Resize(40, 12)), Some(PlayerInput::Resize));
        assert_eq!(map_event(event::Event::FocusGained), None);

        let mut release = event::KeyEvent::new(KeyCode::Left, event::KeyModifiers::NONE);
        release.kind = event::KeyEventKind::Release;
        assert_eq!(map_event(event::Event::Key(release)), None);
    }
}
