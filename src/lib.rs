//! **ndmazes** generates and analyzes mazes on grids of any number of dimensions.
//!
//! A maze is a passage graph over the cells of an N-dimensional box. Generators carve passages
//! into an empty [`maze::Maze`]; analysis measures what they carved.

pub mod analysis;
pub mod cells;
pub mod dimensions;
pub mod disjoint_set;
pub mod errors;
pub mod generators;
pub mod indexed_set;
pub mod maze;
pub mod pathing;
pub mod slices;
mod utils;
