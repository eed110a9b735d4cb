extern crate advent_of_code_2024 as aoc;
extern crate failure;

use aoc::maze::Maze;
use failure::{Error, ResultExt};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

static DEFAULT_INPUT: &str = "src/bin/day-16.input";

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let input = std::fs::read_to_string(&path)
        .with_context(|_| format!("reading puzzle input {}", path))?;
    let maze = Maze::from_str(&input)?;

    match maze.solve() {
        Some(solution) => {
            println!("Lowest score: {}", solution.cheapest);
            println!("Tiles on some best path: {}", solution.best_tile_count());
        }
        None => println!("No path from S to E"),
    }
    Ok(())
}
