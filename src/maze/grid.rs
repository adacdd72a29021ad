use super::{Direction, Position, cell::Cell};

/// Fixed-size `rows × cols` array of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Grid {
    pub fn new(rows: u16, cols: u16, cell: Cell) -> Self {
        let data = vec![cell; rows as usize * cols as usize].into_boxed_slice();
        Grid { data, rows, cols }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Raw cell data in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    pub fn is_boundary(&self, pos: Position) -> bool {
        pos.0 == 0 || pos.1 == 0 || pos.0 == self.rows - 1 || pos.1 == self.cols - 1
    }

    /// Whether `pos` lies strictly inside the outer border.
    pub fn is_interior(&self, pos: Position) -> bool {
        self.is_in_bounds(pos) && !self.is_boundary(pos)
    }

    pub fn ravel_index(&self, pos: Position) -> usize {
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        pos.0 as usize * self.cols as usize + pos.1 as usize
    }

    /// Get the cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.is_in_bounds(pos).then(|| self.data[self.ravel_index(pos)])
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.ravel_index(pos);
        self.data[idx] = cell;
    }

    /// Whether an agent may stand on `pos`. Out-of-bounds positions are never passable.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_passable)
    }

    /// Iterate over all positions holding `cell`.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols as usize;
        self.data
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == cell)
            .map(move |(i, _)| ((i / cols) as u16, (i % cols) as u16))
    }

    /// Orthogonal neighbors of `pos` that are in bounds and not walls.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.step(pos, 1))
            .filter(move |&n| self.is_passable(n))
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(5, 7, Cell::Wall);
        grid.set((2, 3), Cell::Start);
        assert_eq!(grid[(2, 3)], Cell::Start);
        assert_eq!(grid.cells()[2 * 7 + 3], Cell::Start);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5, Cell::Open);
        assert!(!grid.is_in_bounds((5, 5)));
        assert!(!grid.is_in_bounds((0, 5)));
        assert!(!grid.is_in_bounds((5, 0)));
        assert!(grid.is_in_bounds((4, 4)));
        assert_eq!(grid.get((5, 0)), None);
        assert!(!grid.is_passable((0, 5)));
    }

    #[test]
    fn test_boundary_and_interior() {
        let grid = Grid::new(5, 6, Cell::Wall);
        assert!(grid.is_boundary((0, 3)));
        assert!(grid.is_boundary((4, 3)));
        assert!(grid.is_boundary((2, 0)));
        assert!(grid.is_boundary((2, 5)));
        assert!(grid.is_interior((1, 1)));
        assert!(grid.is_interior((3, 4)));
        assert!(!grid.is_interior((3, 5)));
    }

    #[test]
    fn test_open_neighbors() {
        let mut grid = Grid::new(5, 5, Cell::Wall);
        grid.set((2, 2), Cell::Open);
        grid.set((1, 2), Cell::Open);
        grid.set((2, 3), Cell::End);
        let mut neighbors = grid.open_neighbors((2, 2)).collect::<Vec<_>>();
        neighbors.sort();
        assert_eq!(neighbors, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_open_neighbors_at_corner() {
        let grid = Grid::new(3, 3, Cell::Open);
        let mut neighbors = grid.open_neighbors((0, 0)).collect::<Vec<_>>();
        neighbors.sort();
        assert_eq!(neighbors, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_positions_of() {
        let mut grid = Grid::new(4, 4, Cell::Wall);
        grid.set((1, 2), Cell::Open);
        grid.set((3, 1), Cell::Open);
        assert_eq!(
            grid.positions_of(Cell::Open).collect::<Vec<_>>(),
            vec![(1, 2), (3, 1)]
        );
    }
}
