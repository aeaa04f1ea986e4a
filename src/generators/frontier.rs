//! Generators that grow a region outwards from a pool of candidates: randomized Prim's and the
//! growing tree family.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{finish, start, unvisited_neighbours};
use crate::cells::Cell;
use crate::dimensions::MazeDim;
use crate::errors::{MazeError, Result};
use crate::indexed_set::IndexedHashSet;
use crate::maze::Maze;
use crate::utils;

/// Randomized Prim's algorithm over walls.
///
/// A wall is a pair (inside, outside) on the border of the grown region. Pick a random wall; if
/// its outside cell is still unvisited carve it and add the new cell's walls to the pool.
pub fn prim<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("prim", dimensions);

    let first = maze.random_cell(rng);
    let mut visited = utils::fnv_hashset(maze.size());
    let mut walls: IndexedHashSet<(Cell, Cell)> = IndexedHashSet::with_capacity(maze.size());
    for neighbour in maze.neighbours(&first) {
        walls.insert((first.clone(), neighbour));
    }
    visited.insert(first);

    while let Ok(wall) = walls.random(rng).map(|w| w.clone()) {
        walls.remove(&wall);
        let (inside, outside) = wall;
        if visited.contains(&outside) {
            continue;
        }
        maze.carve(&inside, &outside);
        for neighbour in unvisited_neighbours(&maze, &outside, &visited) {
            walls.insert((outside.clone(), neighbour));
        }
        visited.insert(outside);
    }

    finish("prim", maze)
}

/// How the growing tree picks the next active cell to carve from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowingTreePolicy {
    /// Most recently added cell, behaves like the recursive backtracker.
    Newest,
    /// Earliest added cell still active, long straight corridors.
    Oldest,
    /// Uniformly random active cell, behaves like Prim's.
    Random,
    /// Newest with the given probability, otherwise random.
    Mixed { newest_probability: f64 },
}

impl GrowingTreePolicy {
    pub fn mixed(newest_probability: f64) -> Result<GrowingTreePolicy> {
        if (0.0..=1.0).contains(&newest_probability) {
            Ok(GrowingTreePolicy::Mixed { newest_probability })
        } else {
            Err(MazeError::InvalidParameter { name: "newest_probability" })
        }
    }
}

impl Default for GrowingTreePolicy {
    fn default() -> Self {
        GrowingTreePolicy::Mixed { newest_probability: 0.5 }
    }
}

impl fmt::Display for GrowingTreePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrowingTreePolicy::Newest => write!(f, "newest"),
            GrowingTreePolicy::Oldest => write!(f, "oldest"),
            GrowingTreePolicy::Random => write!(f, "random"),
            GrowingTreePolicy::Mixed { newest_probability } => {
                write!(f, "mixed({})", newest_probability)
            }
        }
    }
}

impl FromStr for GrowingTreePolicy {
    type Err = MazeError;

    /// `mixed` gets the default even split between newest and random.
    fn from_str(s: &str) -> Result<GrowingTreePolicy> {
        match s {
            "newest" => Ok(GrowingTreePolicy::Newest),
            "oldest" => Ok(GrowingTreePolicy::Oldest),
            "random" => Ok(GrowingTreePolicy::Random),
            "mixed" => Ok(GrowingTreePolicy::default()),
            _ => Err(MazeError::InvalidParameter { name: "policy" }),
        }
    }
}

/// The growing tree: keep a pool of active cells, pick one by `policy`, carve to a random
/// unvisited neighbour or retire the cell if it has none.
pub fn growing_tree<R: Rng + ?Sized>(
    dimensions: &MazeDim,
    policy: GrowingTreePolicy,
    rng: &mut R,
) -> Maze {
    let mut maze = start("growing tree", dimensions);

    let first = maze.random_cell(rng);
    let mut visited = utils::fnv_hashset(maze.size());
    let mut active: IndexedHashSet<Cell> = IndexedHashSet::with_capacity(maze.size());
    // Insertion order for newest/oldest. Retired cells are dropped lazily from the ends.
    let mut order: VecDeque<Cell> = VecDeque::with_capacity(maze.size());
    visited.insert(first.clone());
    active.insert(first.clone());
    order.push_back(first);

    while !active.is_empty() {
        let cell = match select(policy, &active, &mut order, rng) {
            Some(c) => c,
            None => break,
        };
        let unvisited = unvisited_neighbours(&maze, &cell, &visited);
        if let Some(next) = unvisited.choose(rng) {
            maze.carve(&cell, next);
            visited.insert(next.clone());
            active.insert(next.clone());
            order.push_back(next.clone());
        } else {
            active.remove(&cell);
        }
    }

    finish("growing tree", maze)
}

fn select<R: Rng + ?Sized>(
    policy: GrowingTreePolicy,
    active: &IndexedHashSet<Cell>,
    order: &mut VecDeque<Cell>,
    rng: &mut R,
) -> Option<Cell> {
    match policy {
        GrowingTreePolicy::Newest => newest(active, order),
        GrowingTreePolicy::Oldest => oldest(active, order),
        GrowingTreePolicy::Random => active.random(rng).ok().cloned(),
        GrowingTreePolicy::Mixed { newest_probability } => {
            if rng.gen::<f64>() < newest_probability {
                newest(active, order)
            } else {
                active.random(rng).ok().cloned()
            }
        }
    }
}

fn newest(active: &IndexedHashSet<Cell>, order: &mut VecDeque<Cell>) -> Option<Cell> {
    while let Some(cell) = order.back() {
        if active.contains(cell) {
            return Some(cell.clone());
        }
        let _ = order.pop_back();
    }
    None
}

fn oldest(active: &IndexedHashSet<Cell>, order: &mut VecDeque<Cell>) -> Option<Cell> {
    while let Some(cell) = order.front() {
        if active.contains(cell) {
            return Some(cell.clone());
        }
        let _ = order.pop_front();
    }
    None
}
