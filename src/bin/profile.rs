use std::time::{Duration, Instant};

use mazerun::{
    generators::{end_position, generate_maze, get_rng, start_position},
    solvers::solve_astar,
};

/// Average time per maze, without truncating large iteration counts.
fn per_maze(elapsed: Duration, num_iters: usize) -> Duration {
    elapsed.div_f64(num_iters.max(1) as f64)
}

/// Generate and solve mazes without rendering.
/// Usage: profile [iterations] [rows] [cols]
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(100);
    let rows = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(201);
    let cols = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(201);

    let mut rng = get_rng(Some(0));
    let mut total_steps = 0u64;
    let mut total_expanded = 0usize;
    let started = Instant::now();

    for _ in 0..num_iters {
        let grid = match generate_maze(rows, cols, &mut rng) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        };
        let solution = solve_astar(&grid, start_position(), end_position(rows, cols), |_, _| {});
        total_steps += solution.cost as u64;
        total_expanded += solution.expanded;
    }

    let elapsed = started.elapsed();
    println!(
        "{num_iters} mazes of {rows}x{cols} in {:?} ({:?} per maze), avg path {:.1} steps, avg {:.1} cells expanded",
        elapsed,
        per_maze(elapsed, num_iters),
        total_steps as f64 / num_iters.max(1) as f64,
        total_expanded as f64 / num_iters.max(1) as f64,
    );
}
