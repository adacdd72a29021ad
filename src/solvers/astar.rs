use std::{cmp::Reverse, collections::BinaryHeap};

use super::{Solution, Visit};
use crate::maze::{Grid, Position, manhattan};

const UNREACHED: u32 = u32::MAX;

/// Frontier entry. Ordered by f-score first, then by insertion sequence, so
/// entries with equal f-scores leave the frontier in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    f_score: u32,
    seq: u64,
    coord: Position,
}

/// Per-node bookkeeping of one search.
struct SearchState {
    g_score: Box<[u32]>,
    came_from: Box<[Option<Position>]>,
    expanded: usize,
}

impl SearchState {
    fn new(grid: &Grid) -> Self {
        let len = grid.cells().len();
        SearchState {
            g_score: vec![UNREACHED; len].into_boxed_slice(),
            came_from: vec![None; len].into_boxed_slice(),
            expanded: 0,
        }
    }
}

/// Find a shortest path from `start` to `end` with A* and a Manhattan heuristic.
///
/// `on_visit` is called synchronously in algorithm order: with [`Visit::Frontier`]
/// every time a cell gets a better g-score and is pushed onto the frontier, and
/// with [`Visit::FinalPath`] for each cell retraced from `end` back towards
/// `start` (start itself is not reported).
///
/// A cell may sit in the frontier several times; outdated entries are skipped
/// when popped. The returned path excludes `start`. An empty path means `end`
/// is unreachable.
pub fn solve_astar<F>(grid: &Grid, start: Position, end: Position, mut on_visit: F) -> Solution
where
    F: FnMut(Position, Visit),
{
    if !grid.is_in_bounds(start) || !grid.is_in_bounds(end) {
        tracing::debug!("[astar] start {:?} or end {:?} is out of bounds", start, end);
        return Solution::default();
    }

    let mut state = SearchState::new(grid);
    // Using Reverse to turn the max-heap into a min-heap
    let mut frontier: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
    let mut seq = 0u64;

    state.g_score[grid.ravel_index(start)] = 0;
    frontier.push(Reverse(FrontierEntry {
        f_score: manhattan(start, end),
        seq,
        coord: start,
    }));

    while let Some(Reverse(current)) = frontier.pop() {
        let current_g = state.g_score[grid.ravel_index(current.coord)];
        // A better entry for this cell was pushed after this one
        if current.f_score > current_g + manhattan(current.coord, end) {
            continue;
        }
        state.expanded += 1;

        if current.coord == end {
            let path = reconstruct_path(grid, &state, end, &mut on_visit);
            tracing::debug!(
                "[astar] Reached {:?} in {} steps after expanding {} nodes",
                end,
                current_g,
                state.expanded
            );
            return Solution {
                path,
                cost: current_g,
                expanded: state.expanded,
            };
        }

        let tentative_g = current_g + 1;
        for neighbor in grid.open_neighbors(current.coord) {
            let idx = grid.ravel_index(neighbor);
            if tentative_g >= state.g_score[idx] {
                continue;
            }
            state.g_score[idx] = tentative_g;
            state.came_from[idx] = Some(current.coord);
            seq += 1;
            frontier.push(Reverse(FrontierEntry {
                f_score: tentative_g + manhattan(neighbor, end),
                seq,
                coord: neighbor,
            }));
            on_visit(neighbor, Visit::Frontier);
        }
    }

    tracing::debug!(
        "[astar] Frontier exhausted after expanding {} nodes, no path from {:?} to {:?}",
        state.expanded,
        start,
        end
    );
    Solution {
        expanded: state.expanded,
        ..Solution::default()
    }
}

/// Follow back-pointers from `end` to the start, reporting each retraced cell,
/// and return the path in start-to-end order without the start cell.
fn reconstruct_path<F>(
    grid: &Grid,
    state: &SearchState,
    end: Position,
    on_visit: &mut F,
) -> Vec<Position>
where
    F: FnMut(Position, Visit),
{
    let mut path = Vec::new();
    let mut current = end;
    while let Some(parent) = state.came_from[grid.ravel_index(current)] {
        on_visit(current, Visit::FinalPath);
        path.push(current);
        current = parent;
    }
    path.reverse();
    path
}
