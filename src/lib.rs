//! Advent of Code 2024 solutions.
//!
//! Each day's puzzle lives in a binary under `src/bin`; anything worth sharing
//! or testing in depth lives here.

#[macro_use]
extern crate failure;
extern crate itertools;
extern crate ndarray;

pub mod maze;
pub mod uniform_cost;

/// A `(row, column)` position in a grid.
pub type Point = (usize, usize);
