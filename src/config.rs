use std::{fmt, time::Duration};

use clap::{Parser, ValueEnum};

use crate::generators::{MIN_DIMENSION, MazeError, check_dimensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Walk through the maze with arrow keys or W/A/S/D
    Play,
    /// Watch A* find the shortest path
    Solve,
}

impl Mode {
    /// One-line explanation shown under the mode in the menu.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Play => "Find the exit yourself using arrow keys or W/A/S/D",
            Mode::Solve => "Watch A* explore the maze and trace the shortest path",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Play => write!(f, "Play the maze"),
            Mode::Solve => write!(f, "Watch A* solve the maze"),
        }
    }
}

/// Accept a maze dimension only if it is odd and at least [`MIN_DIMENSION`].
fn parse_dimension(s: &str) -> Result<u16, String> {
    let n = s
        .parse::<u16>()
        .map_err(|_| format!("`{s}` is not a number"))?;
    check_dimensions(n, n)
        .map(|_| n)
        .map_err(|_| format!("must be odd and at least {MIN_DIMENSION}, got {n}"))
}

fn parse_millis(s: &str) -> Result<Duration, String> {
    s.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("`{s}` is not a number of milliseconds"))
}

/// Generate a random maze, then walk it yourself or watch A* solve it.
///
/// Set MAZERUN_LOG (e.g. `debug` or `mazerun::solvers=trace`) for verbose logs in mazerun.log.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Mode to start in. Without it a menu lets you pick one.
    #[arg(value_enum)]
    pub mode: Option<Mode>,

    /// Maze rows, odd and at least 5
    #[arg(long, default_value_t = 21, value_parser = parse_dimension)]
    pub rows: u16,

    /// Maze columns, odd and at least 5
    #[arg(long, default_value_t = 41, value_parser = parse_dimension)]
    pub cols: u16,

    /// Seed for reproducible mazes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between two solver animation steps
    #[arg(long = "delay", value_name = "MS", default_value = "15", value_parser = parse_millis)]
    pub step_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: None,
            rows: 21,
            cols: 41,
            seed: None,
            step_delay: Duration::from_millis(15),
        }
    }
}

impl Config {
    /// Check the dimensions of a config that was built by hand rather than parsed.
    pub fn validate(&self) -> Result<(), MazeError> {
        check_dimensions(self.rows, self.cols)
    }
}
