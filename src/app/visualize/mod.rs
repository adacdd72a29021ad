use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    event::{self, KeyCode},
    style::{Attribute, Color, Stylize},
};

use crate::{
    app,
    config::Config,
    generators::{end_position, generate_maze, get_rng, start_position},
    maze::{Cell, Grid, Marker},
    solvers::{Solution, Visit, solve_astar},
};

#[derive(Debug, PartialEq)]
enum AnimationStatus {
    Completed,
    Cancelled,
}

/// Wait up to `delay` for a key press, returning `true` if it asks to cancel.
/// This is also what paces the animation.
fn cancel_requested(delay: Duration) -> std::io::Result<bool> {
    if !event::poll(delay)? {
        return Ok(false);
    }
    Ok(matches!(
        event::read()?,
        event::Event::Key(event::KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('q'),
            kind: event::KeyEventKind::Press,
            ..
        })
    ))
}

/// Run the solver on `grid`, drawing every visit as it is reported.
fn animate_solve(
    stdout: &mut Stdout,
    grid: &Grid,
    step_delay: Duration,
) -> std::io::Result<(Solution, AnimationStatus)> {
    let (start, end) = (start_position(), end_position(grid.rows(), grid.cols()));
    let mut cancelled = false;
    let mut io_error = None;

    let solution = solve_astar(grid, start, end, |pos, visit| {
        if cancelled || io_error.is_some() {
            return;
        }
        // Keep the start and end symbols visible
        if matches!(grid[pos], Cell::Start | Cell::End) {
            return;
        }
        let marker = match visit {
            Visit::Frontier => Marker::Frontier,
            Visit::FinalPath => Marker::FinalPath,
        };
        let step = app::draw_marker(stdout, pos, marker)
            .and_then(|_| stdout.flush())
            .and_then(|_| cancel_requested(step_delay));
        match step {
            Ok(true) => {
                tracing::debug!("[visualize] Cancel key pressed, stop drawing");
                cancelled = true;
            }
            Ok(false) => {}
            Err(e) => io_error = Some(e),
        }
    });

    if let Some(e) = io_error {
        return Err(e);
    }
    let status = if cancelled {
        AnimationStatus::Cancelled
    } else {
        AnimationStatus::Completed
    };
    Ok((solution, status))
}

/// Generate mazes and animate their solutions until the user quits
pub fn run(stdout: &mut Stdout, config: &Config) -> std::io::Result<()> {
    let mut rng = get_rng(config.seed);

    loop {
        let grid = match generate_maze(config.rows, config.cols, &mut rng) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("[visualize] {}", e);
                return Ok(());
            }
        };
        app::draw_grid(stdout, &grid, None)?;
        app::log_terminal(
            stdout,
            grid.rows(),
            Some("Solving with A*... (Esc to stop)".with(Color::Cyan)),
        )?;

        let (solution, status) = animate_solve(stdout, &grid, config.step_delay)?;
        if status == AnimationStatus::Cancelled {
            tracing::info!("[visualize] Animation cancelled by user");
            break;
        }

        let msg = if solution.is_empty() {
            tracing::warn!("[visualize] No path found in a generated maze");
            "No path found. Press Enter for a new maze, or Esc to exit."
                .to_string()
                .with(Color::Red)
        } else {
            tracing::info!(
                "[visualize] Path of {} steps found, {} nodes expanded",
                solution.cost,
                solution.expanded
            );
            format!(
                "Path found: {} steps, {} cells expanded. Press Enter for a new maze, or Esc to exit.",
                solution.cost, solution.expanded
            )
            .with(Color::Green)
        };
        app::log_terminal(stdout, grid.rows(), Some(msg.attribute(Attribute::Bold)))?;

        if !app::wait_for_enter_or_esc()? {
            break;
        }
    }
    Ok(())
}
