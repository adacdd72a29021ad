use crate::{
    generators::{MazeError, end_position, generate_maze, start_position},
    maze::{Direction, Grid, Position},
    traversal::move_position,
};

pub struct GameState {
    /// The maze being played. Never mutated during play.
    grid: Grid,
    /// Tracks where the player currently is
    current: Position,
    /// Goal position
    goal: Position,
    /// Number of accepted moves so far
    moves: u32,
}

impl GameState {
    /// Generate a fresh maze and put the player on its start cell.
    pub fn initialize<R: rand::Rng + ?Sized>(
        rows: u16,
        cols: u16,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let grid = generate_maze(rows, cols, rng)?;
        Ok(GameState::new(grid, start_position(), end_position(rows, cols)))
    }

    pub fn new(grid: Grid, start: Position, goal: Position) -> Self {
        GameState {
            grid,
            current: start,
            goal,
            moves: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.current
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Check if the goal has been reached.
    pub fn goal_reached(&self) -> bool {
        self.current == self.goal
    }

    /// Attempt to move the player one cell in `direction`.
    /// Returns `true` if the player moved, `false` if a wall or the edge was in the way.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let new_pos = move_position(self.current, direction, &self.grid);
        if new_pos == self.current {
            tracing::debug!("[game] Move {:?} from {:?} rejected", direction, self.current);
            return false;
        }
        tracing::debug!("[game] Moving {:?} to {:?}", direction, new_pos);
        self.current = new_pos;
        self.moves += 1;
        true
    }
}
