use crate::maze::{Direction, Grid, Position};

/// Apply one step in `direction` from `position`.
///
/// Returns the new position if it is inside the grid and not a wall; otherwise
/// `position` is returned unchanged. A rejected move is not an error.
pub fn move_position(position: Position, direction: Direction, grid: &Grid) -> Position {
    match direction.step(position, 1) {
        Some(candidate) if grid.is_passable(candidate) => candidate,
        _ => position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Cell;

    /// 5x5 grid with a corridor (1,1) -> (1,3) -> (3,3).
    fn corridor() -> Grid {
        let mut grid = Grid::new(5, 5, Cell::Wall);
        for pos in [(1, 2), (1, 3), (2, 3)] {
            grid.set(pos, Cell::Open);
        }
        grid.set((1, 1), Cell::Start);
        grid.set((3, 3), Cell::End);
        grid
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let grid = corridor();
        assert_eq!(move_position((1, 1), Direction::Up, &grid), (1, 1));
        assert_eq!(move_position((1, 1), Direction::Left, &grid), (1, 1));
        assert_eq!(move_position((1, 1), Direction::Down, &grid), (1, 1));
    }

    #[test]
    fn test_move_into_open_cell() {
        let grid = corridor();
        assert_eq!(move_position((1, 1), Direction::Right, &grid), (1, 2));
        assert_eq!(move_position((1, 3), Direction::Down, &grid), (2, 3));
        assert_eq!(move_position((2, 3), Direction::Down, &grid), (3, 3));
        assert_eq!(move_position((1, 2), Direction::Left, &grid), (1, 1));
    }

    #[test]
    fn test_move_out_of_bounds_is_rejected() {
        let grid = Grid::new(3, 3, Cell::Open);
        assert_eq!(move_position((0, 0), Direction::Up, &grid), (0, 0));
        assert_eq!(move_position((0, 0), Direction::Left, &grid), (0, 0));
        assert_eq!(move_position((2, 2), Direction::Down, &grid), (2, 2));
        assert_eq!(move_position((2, 2), Direction::Right, &grid), (2, 2));
    }

    #[test]
    fn test_move_does_not_mutate_grid() {
        let grid = corridor();
        let before = grid.clone();
        move_position((1, 1), Direction::Right, &grid);
        move_position((1, 1), Direction::Up, &grid);
        assert_eq!(grid, before);
    }
}
