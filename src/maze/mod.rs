pub mod cell;
pub mod grid;

pub use cell::{Cell, Marker};
pub use grid::Grid;

/// A `(row, col)` pair. Row grows downward, col grows rightward, both zero-based.
pub type Position = (u16, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The position `distance` cells away from `from` in this direction.
    /// Returns `None` if that would underflow or overflow the coordinate type.
    pub fn step(self, from: Position, distance: u16) -> Option<Position> {
        let (row, col) = from;
        match self {
            Direction::Up => Some((row.checked_sub(distance)?, col)),
            Direction::Down => Some((row.checked_add(distance)?, col)),
            Direction::Left => Some((row, col.checked_sub(distance)?)),
            Direction::Right => Some((row, col.checked_add(distance)?)),
        }
    }
}

/// Manhattan distance between two positions.
pub fn manhattan(a: Position, b: Position) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}
