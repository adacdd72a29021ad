use rand::{Rng, seq::SliceRandom};

use crate::maze::{Cell, Direction, Grid};

use super::{end_position, start_position};

/// Carve a perfect maze with an iterative randomized depth-first search over the
/// stride-2 lattice of odd coordinates.
///
/// Callers must pass odd dimensions of at least 5, see [`super::check_dimensions`].
pub fn randomized_dfs<R: Rng + ?Sized>(rows: u16, cols: u16, rng: &mut R) -> Grid {
    // Initialize the maze with walls
    let mut grid = Grid::new(rows, cols, Cell::Wall);
    let mut visited = vec![false; rows as usize * cols as usize];

    let start = start_position();
    visited[grid.ravel_index(start)] = true;
    grid.set(start, Cell::Open);

    // The stack only keeps carved lattice cells
    let mut stack = vec![start];
    let mut directions = Direction::ALL;

    while let Some(current) = stack.pop() {
        directions.shuffle(rng);
        for &direction in directions.iter() {
            let Some(next) = direction.step(current, 2) else {
                continue;
            };
            if !grid.is_interior(next) || visited[grid.ravel_index(next)] {
                continue;
            }
            // Both steps stay inside the grid since `next` is interior
            if let Some(between) = direction.step(current, 1) {
                grid.set(between, Cell::Open);
            }
            visited[grid.ravel_index(next)] = true;
            grid.set(next, Cell::Open);
            stack.push(next);
        }
    }

    grid.set(start, Cell::Start);
    grid.set(end_position(rows, cols), Cell::End);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::get_rng, maze::Position};
    use std::collections::VecDeque;

    fn reachable_from(grid: &Grid, from: Position) -> Vec<bool> {
        let mut seen = vec![false; grid.cells().len()];
        let mut queue = VecDeque::from([from]);
        seen[grid.ravel_index(from)] = true;
        while let Some(pos) = queue.pop_front() {
            for n in grid.open_neighbors(pos) {
                let idx = grid.ravel_index(n);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn test_single_start_and_end() {
        for seed in 0..20 {
            let grid = randomized_dfs(15, 21, &mut get_rng(Some(seed)));
            assert_eq!(grid.positions_of(Cell::Start).collect::<Vec<_>>(), vec![(1, 1)]);
            assert_eq!(grid.positions_of(Cell::End).collect::<Vec<_>>(), vec![(13, 19)]);
        }
    }

    #[test]
    fn test_border_is_wall() {
        let grid = randomized_dfs(11, 17, &mut get_rng(Some(7)));
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if grid.is_boundary((row, col)) {
                    assert_eq!(grid[(row, col)], Cell::Wall, "border cell {:?}", (row, col));
                }
            }
        }
    }

    #[test]
    fn test_start_connected_to_end() {
        for seed in 0..20 {
            let grid = randomized_dfs(17, 23, &mut get_rng(Some(seed)));
            let seen = reachable_from(&grid, (1, 1));
            assert!(seen[grid.ravel_index((15, 21))], "seed {seed} left the end unreachable");
        }
    }

    #[test]
    fn test_every_lattice_cell_is_carved() {
        let grid = randomized_dfs(9, 13, &mut get_rng(Some(3)));
        let seen = reachable_from(&grid, (1, 1));
        for row in (1..grid.rows()).step_by(2) {
            for col in (1..grid.cols()).step_by(2) {
                assert!(grid[(row, col)].is_passable());
                assert!(seen[grid.ravel_index((row, col))]);
            }
        }
    }

    #[test]
    fn test_no_open_two_by_two_blocks() {
        let grid = randomized_dfs(21, 21, &mut get_rng(Some(11)));
        for row in 0..grid.rows() - 1 {
            for col in 0..grid.cols() - 1 {
                let block = [(row, col), (row + 1, col), (row, col + 1), (row + 1, col + 1)];
                assert!(
                    !block.iter().all(|&p| grid.is_passable(p)),
                    "open 2x2 block at {:?}",
                    (row, col)
                );
            }
        }
    }

    #[test]
    fn test_carved_cells_form_a_tree() {
        let grid = randomized_dfs(15, 15, &mut get_rng(Some(5)));
        let nodes = grid.cells().iter().filter(|c| c.is_passable()).count();
        let edges: usize = (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
            .filter(|&p| grid.is_passable(p))
            .map(|p| grid.open_neighbors(p).count())
            .sum::<usize>()
            / 2;
        assert_eq!(edges, nodes - 1);
    }

    #[test]
    fn test_smallest_maze() {
        let grid = randomized_dfs(5, 5, &mut get_rng(Some(0)));
        assert_eq!(grid[(1, 1)], Cell::Start);
        assert_eq!(grid[(3, 3)], Cell::End);
        // 4 lattice cells joined by 3 corridor cells
        assert_eq!(grid.cells().iter().filter(|c| c.is_passable()).count(), 7);
    }
}
