//! The reindeer maze: find the cheapest route from `S` to `E`, and every tile
//! that lies on at least one cheapest route.
//!
//! Moving forward one tile costs 1 point; turning 90 degrees in place costs
//! 1000. The reindeer starts on `S` facing east and may arrive at `E` facing
//! any direction.
//!
//! Preconditions: the maze must contain an `S` and an `E` (parsing fails
//! otherwise). If either appears more than once, the last one in reading order
//! is used. If `E` can't be reached from `S`, `Maze::solve` returns `None`.

use failure::Error;
use itertools::{iproduct, Itertools};
use ndarray::{Array2, Axis};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::uniform_cost::uniform_cost;
use crate::Point;

pub type Cost = usize;

pub const STEP_COST: Cost = 1;
pub const TURN_COST: Cost = 1000;

/// Map from each reachable state to the cost of the cheapest path to it (or
/// from it, for the backward pass).
pub type CostMap = HashMap<State, Cost>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

/// `(row, column)` deltas, indexed by `Facing::ordinal`.
const DELTAS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Facing {
    /// All facings, in clockwise order starting from north.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Facing {
        Facing::ALL[ordinal % 4]
    }

    pub fn clockwise(self) -> Facing {
        Facing::from_ordinal(self.ordinal() + 1)
    }

    pub fn counter_clockwise(self) -> Facing {
        Facing::from_ordinal(self.ordinal() + 3)
    }

    pub fn reverse(self) -> Facing {
        Facing::from_ordinal(self.ordinal() + 2)
    }

    pub fn delta(self) -> (isize, isize) {
        DELTAS[self.ordinal()]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Square {
    Wall,
    Floor,
    Start,
    End,
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Wall => '#',
            Square::Floor => '.',
            Square::Start => 'S',
            Square::End => 'E',
        }
    }
}

/// A node of the search: where the reindeer stands, and which way it faces.
/// Turning costs so much that the same tile faced two ways must be kept apart.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct State {
    pub position: Point,
    pub facing: Facing,
}

impl State {
    fn turned(self, facing: Facing) -> State {
        State { facing, ..self }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// The lowest score any reindeer could get.
    pub cheapest: Cost,

    /// Every tile on at least one path scoring `cheapest`, `S` and `E` included.
    pub best_tiles: HashSet<Point>,
}

impl Solution {
    pub fn best_tile_count(&self) -> usize {
        self.best_tiles.len()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Maze {
    map: Array2<Square>,
    start: Point,
    end: Point,
}

impl FromStr for Maze {
    type Err = Error;
    fn from_str(s: &str) -> Result<Maze, Error> {
        let mut lines = s.lines().collect::<Vec<_>>();
        while lines.last().map_or(false, |line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(format_err!("maze is empty"));
        }

        // Short rows are padded out with wall.
        let height = lines.len();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let mut map = Array2::from_elem((height, width), Square::Wall);
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                map[(row, col)] = match ch {
                    '#' => Square::Wall,
                    '.' => Square::Floor,
                    'S' => {
                        start = Some((row, col));
                        Square::Start
                    }
                    'E' => {
                        end = Some((row, col));
                        Square::End
                    }
                    _ => {
                        return Err(format_err!(
                            "bad maze character {:?} at row {}, column {}",
                            ch,
                            row,
                            col
                        ))
                    }
                };
            }
        }

        let start = start.ok_or_else(|| format_err!("maze has no start square 'S'"))?;
        let end = end.ok_or_else(|| format_err!("maze has no end square 'E'"))?;
        Ok(Maze { map, start, end })
    }
}

impl Maze {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// The reindeer always sets out facing east.
    pub fn start_state(&self) -> State {
        State {
            position: self.start,
            facing: Facing::East,
        }
    }

    /// Return `(height, width)`.
    pub fn dim(&self) -> (usize, usize) {
        self.map.dim()
    }

    /// Return the square at `(row, col)`. Everything outside the map is wall.
    pub fn square(&self, row: isize, col: isize) -> Square {
        if row < 0 || col < 0 {
            return Square::Wall;
        }
        self.map
            .get((row as usize, col as usize))
            .cloned()
            .unwrap_or(Square::Wall)
    }

    /// Return the tile one step from `from` in direction `facing`, unless
    /// that's a wall.
    fn step(&self, from: Point, facing: Facing) -> Option<Point> {
        let (dr, dc) = facing.delta();
        let row = from.0 as isize + dr;
        let col = from.1 as isize + dc;
        if self.square(row, col) == Square::Wall {
            None
        } else {
            Some((row as usize, col as usize))
        }
    }

    /// Return the states reachable from `state` in one move, with their costs.
    /// A step carries the reindeer in direction `travel`, which is its facing
    /// when searching forward and the reverse of it when searching backward.
    fn moves(&self, state: State, travel: Facing) -> Vec<(State, Cost)> {
        let mut moves = Vec::with_capacity(3);
        if let Some(position) = self.step(state.position, travel) {
            moves.push((State { position, ..state }, STEP_COST));
        }
        moves.push((state.turned(state.facing.clockwise()), TURN_COST));
        moves.push((state.turned(state.facing.counter_clockwise()), TURN_COST));
        moves
    }

    /// The cheapest cost of reaching each state from the start.
    pub fn forward_costs(&self) -> CostMap {
        let costs = uniform_cost(Some((self.start_state(), 0)), |&state: &State| {
            self.moves(state, state.facing)
        })
        .map(|settled| (settled.node, settled.weight))
        .collect::<CostMap>();
        debug!(states = costs.len(), "forward pass settled");
        costs
    }

    /// The cheapest cost of reaching the end from each state. The end may be
    /// entered facing any direction, so all four of its states are seeds.
    pub fn backward_costs(&self) -> CostMap {
        let seeds = Facing::ALL.iter().map(|&facing| {
            let state = State {
                position: self.end,
                facing,
            };
            (state, 0)
        });
        let costs = uniform_cost(seeds, |&state: &State| {
            self.moves(state, state.facing.reverse())
        })
        .map(|settled| (settled.node, settled.weight))
        .collect::<CostMap>();
        debug!(states = costs.len(), "backward pass settled");
        costs
    }

    /// The cheapest arrival at the end, over every facing it was settled in.
    fn cheapest_arrival(&self, forward: &CostMap) -> Option<Cost> {
        Facing::ALL
            .iter()
            .filter_map(|&facing| {
                forward.get(&State {
                    position: self.end,
                    facing,
                })
            })
            .min()
            .cloned()
    }

    /// A state is on a cheapest path exactly when the cheapest way to reach it
    /// plus the cheapest way on from it adds up to the overall cheapest cost.
    fn best_tiles(&self, forward: &CostMap, backward: &CostMap, cheapest: Cost) -> HashSet<Point> {
        let (height, width) = self.dim();
        iproduct!(0..height, 0..width, Facing::ALL.iter())
            .filter_map(|(row, col, &facing)| {
                let state = State {
                    position: (row, col),
                    facing,
                };
                match (forward.get(&state), backward.get(&state)) {
                    (Some(to), Some(from)) if to + from == cheapest => Some(state.position),
                    _ => None,
                }
            })
            .collect()
    }

    /// Find the lowest possible score, and the tiles on any path achieving it.
    /// Return `None` if the end can't be reached from the start.
    pub fn solve(&self) -> Option<Solution> {
        let forward = self.forward_costs();
        let cheapest = match self.cheapest_arrival(&forward) {
            Some(cheapest) => cheapest,
            None => {
                info!(start = ?self.start, end = ?self.end, "end is unreachable");
                return None;
            }
        };

        let backward = self.backward_costs();
        let best_tiles = self.best_tiles(&forward, &backward, cheapest);
        info!(cheapest, best_tiles = best_tiles.len(), "solved maze");
        Some(Solution {
            cheapest,
            best_tiles,
        })
    }

    /// Draw the map with every tile in `solution.best_tiles` shown as `O`.
    pub fn render_best_tiles(&self, solution: &Solution) -> String {
        self.render(|point, square| {
            if solution.best_tiles.contains(&point) {
                'O'
            } else {
                square.symbol()
            }
        })
    }

    fn render<F>(&self, symbol: F) -> String
    where
        F: Fn(Point, Square) -> char,
    {
        self.map
            .axis_iter(Axis(0))
            .enumerate()
            .map(|(row, squares)| {
                squares
                    .iter()
                    .enumerate()
                    .map(|(col, &square)| symbol((row, col), square))
                    .collect::<String>()
            })
            .join("\n")
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.render(|_, square| square.symbol()))
    }
}
