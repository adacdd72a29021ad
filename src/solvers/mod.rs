mod astar;

pub use astar::solve_astar;

use crate::maze::Position;

/// What happened to a cell when the solver reports it to its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// The cell was (re)inserted into the frontier with an improved g-score.
    Frontier,
    /// The cell was retraced while reconstructing the shortest path.
    FinalPath,
}

/// Result of a path search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// Cells from the one after the start through the end. Empty when no path exists.
    pub path: Vec<Position>,
    /// g-score of the end cell, which is the number of steps in `path`.
    pub cost: u32,
    /// Number of nodes taken off the frontier and expanded.
    pub expanded: usize,
}

impl Solution {
    /// `true` when the search found no path (or start and end coincide).
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
