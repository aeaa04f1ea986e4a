//! Generators driven by a walk over the grid: recursive backtracker, hunt-and-kill,
//! Aldous-Broder and Wilson.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{finish, start, unvisited_neighbours};
use crate::cells::{Cell, CellSmallVec};
use crate::dimensions::MazeDim;
use crate::maze::Maze;
use crate::utils::{self, FnvHashMap, FnvHashSet};

/// Randomized depth first search with an explicit stack.
///
/// Carve from the top of the stack to a random unvisited neighbour and push it. When the top has
/// no unvisited neighbours, pop it. Produces long winding corridors with few dead ends.
pub fn recursive_backtracker<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("recursive backtracker", dimensions);

    let first = maze.random_cell(rng);
    let mut visited = utils::fnv_hashset(maze.size());
    visited.insert(first.clone());
    let mut stack = vec![first];

    while let Some(current) = stack.last().cloned() {
        let unvisited = unvisited_neighbours(&maze, &current, &visited);
        if let Some(next) = unvisited.choose(rng) {
            maze.carve(&current, next);
            visited.insert(next.clone());
            stack.push(next.clone());
        } else {
            let _ = stack.pop();
        }
    }

    finish("recursive backtracker", maze)
}

/// Random walk until stuck (kill), then scan for the first unvisited cell bordering the visited
/// region, connect it and walk again from there (hunt).
pub fn hunt_and_kill<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("hunt and kill", dimensions);

    let first = maze.random_cell(rng);
    let mut visited = utils::fnv_hashset(maze.size());
    visited.insert(first.clone());
    let mut current = Some(first);

    while let Some(cell) = current {
        let unvisited = unvisited_neighbours(&maze, &cell, &visited);
        current = if let Some(next) = unvisited.choose(rng) {
            maze.carve(&cell, next);
            visited.insert(next.clone());
            Some(next.clone())
        } else {
            hunt(&mut maze, &mut visited, rng)
        };
    }

    finish("hunt and kill", maze)
}

// Row-major scan for the first unvisited cell with a visited neighbour. Links it into the
// visited region and returns it.
fn hunt<R: Rng + ?Sized>(maze: &mut Maze, visited: &mut FnvHashSet<Cell>, rng: &mut R) -> Option<Cell> {
    for cell in maze.iter() {
        if visited.contains(&cell) {
            continue;
        }
        let visited_neighbours: CellSmallVec = maze
            .neighbours(&cell)
            .filter(|n| visited.contains(n))
            .collect();
        if let Some(link) = visited_neighbours.choose(rng) {
            maze.carve(&cell, link);
            visited.insert(cell.clone());
            return Some(cell);
        }
    }
    None
}

/// Uniform random walk. The first time the walk enters a cell, the step it took becomes a
/// passage. Produces a uniform spanning tree but may take a long time to finish.
pub fn aldous_broder<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("aldous-broder", dimensions);

    let mut current = maze.random_cell(rng);
    let mut visited = utils::fnv_hashset(maze.size());
    visited.insert(current.clone());
    let mut unvisited_count = maze.size() - 1;
    let mut steps = 0usize;

    while unvisited_count > 0 {
        let neighbours: CellSmallVec = maze.neighbours(&current).collect();
        let next = match neighbours.choose(rng) {
            Some(n) => n.clone(),
            None => break,
        };
        if visited.insert(next.clone()) {
            maze.carve(&current, &next);
            unvisited_count -= 1;
        }
        current = next;
        steps += 1;
    }
    trace!("aldous-broder walked {} steps", steps);

    finish("aldous-broder", maze)
}

/// Loop erased random walks.
///
/// The tree starts as one random cell. From each cell outside the tree, walk randomly until the
/// walk hits the tree. Whenever the walk crosses its own path the loop is erased, so what gets
/// spliced into the tree is a simple path. Produces a uniform spanning tree.
pub fn wilson<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("wilson", dimensions);

    let mut in_tree = utils::fnv_hashset(maze.size());
    in_tree.insert(maze.random_cell(rng));

    for walk_start in maze.iter() {
        if in_tree.contains(&walk_start) {
            continue;
        }

        let mut path = vec![walk_start.clone()];
        let mut positions: FnvHashMap<Cell, usize> = utils::fnv_hashmap(16);
        positions.insert(walk_start.clone(), 0);
        let mut current = walk_start;
        let mut erased = 0usize;

        while !in_tree.contains(&current) {
            let neighbours: CellSmallVec = maze.neighbours(&current).collect();
            let next = match neighbours.choose(rng) {
                Some(n) => n.clone(),
                None => break,
            };
            if let Some(&position) = positions.get(&next) {
                for loop_cell in path.drain(position + 1..) {
                    let _ = positions.remove(&loop_cell);
                    erased += 1;
                }
            } else {
                positions.insert(next.clone(), path.len());
                path.push(next.clone());
            }
            current = next;
        }
        trace!("wilson walk of {} cells, {} erased", path.len(), erased);

        for step in path.windows(2) {
            maze.carve(&step[0], &step[1]);
        }
        in_tree.extend(path);
    }

    finish("wilson", maze)
}
