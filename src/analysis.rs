//! Structural checks and scores for a carved maze, plus the aggregate report.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::cells::Cell;
use crate::errors::{MazeError, Result};
use crate::maze::Maze;
use crate::pathing::{self, Distances};
use crate::utils;

/// Can every cell be reached from `start`?
pub fn is_connected_from(maze: &Maze, start: &Cell) -> Result<bool> {
    let distances = Distances::new(maze, start)?;
    Ok(distances.reached_count() == maze.size())
}

/// Can every cell be reached from the first cell?
pub fn is_connected(maze: &Maze) -> bool {
    let origin = Cell::origin(maze.dimensions().dimensions());
    is_connected_from(maze, &origin).unwrap_or(false)
}

/// Does any component of the maze contain a loop?
///
/// Depth first search from every unvisited cell, remembering the cell each step came from.
/// Reaching an already visited cell other than that parent closes a loop.
pub fn is_acyclic(maze: &Maze) -> bool {
    let mut visited = utils::fnv_hashset(maze.size());

    for root in maze.iter() {
        if !visited.insert(root.clone()) {
            continue;
        }
        let mut stack: Vec<(Cell, Option<Cell>)> = vec![(root, None)];
        while let Some((cell, parent)) = stack.pop() {
            for link in maze.links(&cell) {
                if parent.as_ref() == Some(&link) {
                    continue;
                }
                if !visited.insert(link.clone()) {
                    return false;
                }
                stack.push((link, Some(cell.clone())));
            }
        }
    }
    true
}

/// Connected with no loops, so exactly one path joins any two cells.
pub fn is_perfect(maze: &Maze) -> bool {
    is_connected(maze) && is_acyclic(maze)
}

/// Cells with exactly one passage.
pub fn dead_end_count(maze: &Maze) -> usize {
    maze.iter().filter(|cell| maze.degree(cell) == 1).count()
}

/// Cells with three or more passages.
pub fn intersection_count(maze: &Maze) -> usize {
    maze.iter().filter(|cell| maze.degree(cell) >= 3).count()
}

/// 1.0 when dead ends and intersections are equally common, falling towards 0.0 as one
/// dominates.
pub fn balance_score(maze: &Maze) -> f64 {
    let dead_ends = dead_end_count(maze) as f64;
    let intersections = intersection_count(maze) as f64;
    if dead_ends + intersections == 0.0 {
        1.0
    } else {
        1.0 - (dead_ends - intersections).abs() / (dead_ends + intersections)
    }
}

/// Share of cells that are dead ends or intersections.
pub fn randomness_score(maze: &Maze) -> f64 {
    let branching = dead_end_count(maze) + intersection_count(maze);
    branching as f64 / maze.size() as f64
}

/// Share of passages whose left-right mirror image is also a passage. Only defined for 2D
/// mazes, mirroring `(r, c)` to `(r, width - 1 - c)`.
pub fn symmetry_score(maze: &Maze) -> Result<f64> {
    let dimensions = maze.dimensions();
    if dimensions.dimensions() != 2 {
        return Err(MazeError::UnsupportedDimensions {
            expected: 2,
            actual: dimensions.dimensions(),
        });
    }
    let last_column = dimensions.axis_size(1) as isize - 1;
    let mirror = |cell: &Cell| Cell::new(&[cell.get(0), last_column - cell.get(1)]);

    let mut passages = 0usize;
    let mut mirrored = 0usize;
    for (a, b) in maze.iter_links() {
        passages += 1;
        if maze.is_linked(&mirror(&a), &mirror(&b)) {
            mirrored += 1;
        }
    }

    if passages == 0 {
        Ok(1.0)
    } else {
        Ok(mirrored as f64 / passages as f64)
    }
}

/// Every metric for one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeReport {
    pub cells: usize,
    pub passages: usize,
    pub connected: bool,
    pub acyclic: bool,
    pub perfect: bool,
    pub dead_ends: usize,
    pub intersections: usize,
    /// Exact for perfect mazes, a lower bound otherwise.
    pub diameter: usize,
    /// Only measured on connected mazes.
    pub average_path_length: Option<f64>,
    pub balance: f64,
    pub randomness: f64,
    /// Only defined for 2D mazes.
    pub symmetry: Option<f64>,
}

/// Measure everything about a maze. The rng is only used to sample path lengths on large mazes.
pub fn analyze<R: Rng + ?Sized>(maze: &Maze, rng: &mut R) -> MazeReport {
    let connected = is_connected(maze);
    let acyclic = is_acyclic(maze);
    let average_path_length = if connected {
        pathing::average_path_length(maze, rng).ok()
    } else {
        None
    };

    let report = MazeReport {
        cells: maze.size(),
        passages: maze.links_count(),
        connected,
        acyclic,
        perfect: connected && acyclic,
        dead_ends: dead_end_count(maze),
        intersections: intersection_count(maze),
        diameter: pathing::diameter(maze),
        average_path_length,
        balance: balance_score(maze),
        randomness: randomness_score(maze),
        symmetry: symmetry_score(maze).ok(),
    };
    debug!("analysis done: {:?}", report);
    report
}

impl fmt::Display for MazeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "cells: {}", self.cells)?;
        writeln!(f, "passages: {}", self.passages)?;
        writeln!(f, "connected: {}", self.connected)?;
        writeln!(f, "acyclic: {}", self.acyclic)?;
        writeln!(f, "perfect: {}", self.perfect)?;
        writeln!(f, "dead ends: {}", self.dead_ends)?;
        writeln!(f, "intersections: {}", self.intersections)?;
        writeln!(f, "diameter: {}", self.diameter)?;
        match self.average_path_length {
            Some(average) => writeln!(f, "average path length: {:.3}", average)?,
            None => writeln!(f, "average path length: n/a")?,
        }
        writeln!(f, "balance: {:.3}", self.balance)?;
        writeln!(f, "randomness: {:.3}", self.randomness)?;
        match self.symmetry {
            Some(symmetry) => write!(f, "symmetry: {:.3}", symmetry),
            None => write!(f, "symmetry: n/a"),
        }
    }
}
