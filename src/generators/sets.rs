//! Generators built on union-find: randomized Kruskal's and Eller's algorithm.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{finish, start};
use crate::cells::Cell;
use crate::dimensions::MazeDim;
use crate::disjoint_set::DisjointSet;
use crate::maze::Maze;
use crate::slices::Slice;
use crate::utils::{self, FnvHashMap};

/// Randomized Kruskal's algorithm.
///
/// Every wall between grid-adjacent cells is shuffled, then carved if the cells on either side are
/// not yet connected.
pub fn kruskal<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("kruskal", dimensions);

    let mut sets = DisjointSet::with_capacity(maze.size());
    let mut walls = Vec::with_capacity(maze.size() * dimensions.dimensions());
    for cell in maze.iter() {
        for axis in 0..dimensions.dimensions() {
            let next = cell.plus(axis);
            if dimensions.contains(&next) {
                walls.push((cell.clone(), next));
            }
        }
        sets.make_set(cell);
    }
    walls.shuffle(rng);

    for (a, b) in walls {
        if sets.sets_count() == 1 {
            break;
        }
        if let Ok(true) = sets.union(&a, &b) {
            maze.carve(&a, &b);
        }
    }

    finish("kruskal", maze)
}

/// Eller's algorithm, one layer (cells sharing an axis 0 coordinate) at a time.
///
/// Adjacent cells within a layer are randomly joined when they belong to different sets; on
/// the last layer they always are. Every set in a layer then gets at least one passage down
/// into the next layer so no set is left behind.
pub fn eller<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("eller", dimensions);

    let axes = dimensions.dimensions();
    let layers_count = dimensions.axis_size(0);
    let mut sets = DisjointSet::with_capacity(maze.size());
    for cell in maze.iter() {
        sets.make_set(cell);
    }

    for layer in 0..layers_count {
        let is_last_layer = layer + 1 == layers_count;
        let layer_cells: Vec<Cell> = layer_slice(dimensions, layer).iter().collect();

        for cell in &layer_cells {
            for axis in 1..axes {
                let next = cell.plus(axis);
                if !dimensions.contains(&next) {
                    continue;
                }
                if is_last_layer || rng.gen::<bool>() {
                    if let Ok(true) = sets.union(cell, &next) {
                        maze.carve(cell, &next);
                    }
                }
            }
        }

        if is_last_layer {
            break;
        }

        // Group the layer by set, in order of first appearance.
        let mut slots: FnvHashMap<Cell, usize> = utils::fnv_hashmap(layer_cells.len());
        let mut components: Vec<Vec<Cell>> = vec![];
        for cell in &layer_cells {
            if let Ok(root) = sets.find(cell) {
                let slot = *slots.entry(root).or_insert_with(|| {
                    components.push(vec![]);
                    components.len() - 1
                });
                components[slot].push(cell.clone());
            }
        }
        trace!("eller layer {} has {} sets", layer, components.len());

        for mut members in components {
            members.shuffle(rng);
            let drops = rng.gen_range(1..=members.len());
            for cell in &members[..drops] {
                let below = cell.plus(0);
                if let Ok(true) = sets.union(cell, &below) {
                    maze.carve(cell, &below);
                }
            }
        }
    }

    finish("eller", maze)
}

fn layer_slice(dimensions: &MazeDim, layer: usize) -> Slice {
    let lower = Cell::origin(dimensions.dimensions()).offset(0, layer as isize);
    let last = dimensions.last_cell();
    let upper = last.offset(0, layer as isize - last.get(0));
    Slice::spanning(lower, upper)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn layers_cover_the_grid() {
        let dims = MazeDim::new(&[3, 2, 2]).unwrap();
        let layer = layer_slice(&dims, 1);
        assert_eq!(layer.len(), 4);
        assert!(layer.iter().all(|c| c.get(0) == 1));
        let total: usize = (0..3).map(|l| layer_slice(&dims, l).len()).sum();
        assert_eq!(total, dims.size());
    }
}
