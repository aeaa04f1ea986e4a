//! Generators that visit the cells in a fixed order and only ever carve "forwards", giving mazes
//! with a visible bias: binary tree and sidewinder.

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use super::{finish, start};
use crate::cells::{Cell, CellSmallVec};
use crate::dimensions::MazeDim;
use crate::maze::Maze;
use crate::slices::Slice;

/// Apply the binary tree maze generation algorithm.
///
/// Visit each cell and carve a passage one step forward along a randomly chosen axis. Axes that
/// would step outside the maze are not candidates, so the last cell is the only one carving
/// nothing. Every cell links to exactly one cell after it in row-major order, which makes the
/// result a spanning tree with long open corridors along the far faces.
pub fn binary_tree<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("binary tree", dimensions);

    for cell in maze.iter() {
        let forwards: CellSmallVec = (0..dimensions.dimensions())
            .map(|axis| cell.plus(axis))
            .filter(|next| dimensions.contains(next))
            .collect();

        if let Some(link) = forwards.choose(rng) {
            maze.carve(&cell, link);
        }
    }

    finish("binary tree", maze)
}

/// Apply the sidewinder maze generation algorithm.
///
/// Lines run along axis 0. Walking a line, each cell either extends the current run by carving
/// forward, or closes the run out: a random member of the run carves one step back along some
/// other axis, into a line that has already been carved. The end of a line always closes the
/// run. The origin line has nowhere to close out to, so it is carved as one long corridor.
pub fn sidewinder<R: Rng + ?Sized>(dimensions: &MazeDim, rng: &mut R) -> Maze {
    let mut maze = start("sidewinder", dimensions);

    let line_length = dimensions.axis_size(0) as isize;
    for line_start in line_starts(dimensions).iter() {
        // Same for every cell on the line.
        let close_out_axes: SmallVec<[usize; 4]> = (1..dimensions.dimensions())
            .filter(|&axis| line_start.get(axis) > 0)
            .collect();

        let mut run: Vec<Cell> = vec![];
        for step in 0..line_length {
            let cell = line_start.offset(0, step);
            run.push(cell.clone());

            let at_run_end_boundary = step + 1 == line_length;
            let should_close_out =
                !close_out_axes.is_empty() && (at_run_end_boundary || rng.gen::<bool>()); // coin flip

            if should_close_out {
                if let (Some(run_member), Some(&axis)) =
                    (run.choose(rng), close_out_axes.choose(rng))
                {
                    maze.carve(run_member, &run_member.minus(axis));
                }
                run.clear();
            } else if !at_run_end_boundary {
                maze.carve(&cell, &cell.plus(0));
            }
        }
    }

    finish("sidewinder", maze)
}

// Cells with axis 0 coordinate 0, one per line.
fn line_starts(dimensions: &MazeDim) -> Slice {
    let last = dimensions.last_cell();
    let upper = last.offset(0, -last.get(0));
    Slice::spanning(Cell::origin(dimensions.dimensions()), upper)
}
