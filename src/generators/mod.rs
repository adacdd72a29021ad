use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

mod dfs;

pub use dfs::randomized_dfs;

use crate::maze::{Grid, Position};

/// Smallest accepted maze dimension.
pub const MIN_DIMENSION: u16 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze dimensions {rows}x{cols}: both must be odd and at least 5")]
    InvalidDimensions { rows: u16, cols: u16 },
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Check that `rows` and `cols` are odd and at least [`MIN_DIMENSION`].
///
/// Even dimensions put the end cell off the stride-2 carving lattice, where it
/// may never be connected, so they are rejected instead of patched up.
pub fn check_dimensions(rows: u16, cols: u16) -> Result<(), MazeError> {
    let valid = |n: u16| n >= MIN_DIMENSION && n % 2 == 1;
    if valid(rows) && valid(cols) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { rows, cols })
    }
}

/// The fixed start cell of a generated maze.
pub fn start_position() -> Position {
    (1, 1)
}

/// The fixed end cell of a generated `rows × cols` maze.
pub fn end_position(rows: u16, cols: u16) -> Position {
    (rows - 2, cols - 2)
}

/// Generate a perfect maze of `rows × cols` cells with `Start` at `(1, 1)` and
/// `End` at `(rows - 2, cols - 2)`.
pub fn generate_maze<R: rand::Rng + ?Sized>(
    rows: u16,
    cols: u16,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    check_dimensions(rows, cols)?;
    let grid = randomized_dfs(rows, cols, rng);
    tracing::debug!(
        "[generator] Generated {}x{} maze with {} open cells",
        rows,
        cols,
        grid.cells().iter().filter(|c| c.is_passable()).count()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(5, 5).is_ok());
        assert!(check_dimensions(21, 41).is_ok());
        assert_eq!(
            check_dimensions(4, 5),
            Err(MazeError::InvalidDimensions { rows: 4, cols: 5 })
        );
        assert!(check_dimensions(5, 6).is_err());
        assert!(check_dimensions(3, 3).is_err());
        assert!(check_dimensions(0, 0).is_err());
    }

    #[test]
    fn test_generate_rejects_invalid_dimensions() {
        let mut rng = get_rng(Some(1));
        assert_eq!(
            generate_maze(40, 40, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 40, cols: 40 })
        );
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_maze(21, 31, &mut get_rng(Some(42))).unwrap();
        let b = generate_maze(21, 31, &mut get_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_give_different_mazes() {
        let a = generate_maze(31, 31, &mut get_rng(Some(1))).unwrap();
        let b = generate_maze(31, 31, &mut get_rng(Some(2))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_error_message() {
        let err = check_dimensions(4, 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid maze dimensions 4x9: both must be odd and at least 5"
        );
    }
}
