use std::fmt;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Cell;
use crate::errors::{MazeError, Result};
use crate::slices::Slice;

/// The shape of a maze: the number of cells along each axis.
///
/// Cells are linearised in row-major order, axis 0 being the most significant, which is the
/// same as lexicographic order on the coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MazeDim {
    sizes: SmallVec<[usize; 4]>,
}

impl MazeDim {
    pub fn new(sizes: &[usize]) -> Result<MazeDim> {
        if sizes.is_empty() {
            return Err(MazeError::EmptyDimensions);
        }
        if let Some(axis) = sizes.iter().position(|&s| s == 0) {
            return Err(MazeError::ZeroAxisSize { axis });
        }
        Ok(MazeDim { sizes: sizes.iter().cloned().collect() })
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn axis_size(&self, axis: usize) -> usize {
        self.sizes[axis]
    }

    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Is the cell inside this shape? A cell with the wrong number of coordinates never is.
    pub fn contains(&self, cell: &Cell) -> bool {
        cell.dimensions() == self.dimensions()
            && cell
                .coords()
                .iter()
                .zip(self.sizes.iter())
                .all(|(&c, &size)| c >= 0 && (c as usize) < size)
    }

    /// Checks that a cell has this shape's dimensionality and lies within it.
    pub fn validate(&self, cell: &Cell) -> Result<()> {
        if cell.dimensions() != self.dimensions() {
            return Err(MazeError::DimensionMismatch {
                expected: self.dimensions(),
                actual: cell.dimensions(),
            });
        }
        if !self.contains(cell) {
            return Err(MazeError::OutOfBounds(cell.clone()));
        }
        Ok(())
    }

    /// Row-major index of a cell, `None` if the cell is not inside the shape.
    pub fn index_of(&self, cell: &Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(
            cell.coords()
                .iter()
                .zip(self.sizes.iter())
                .fold(0, |index, (&c, &size)| index * size + c as usize),
        )
    }

    /// Inverse of `index_of`. `None` when the index is past the last cell.
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.size() {
            return None;
        }
        let mut remainder = index;
        let mut coords: SmallVec<[isize; 4]> = SmallVec::with_capacity(self.dimensions());
        for &size in self.sizes.iter().rev() {
            coords.push((remainder % size) as isize);
            remainder /= size;
        }
        Some(coords.into_iter().rev().collect())
    }

    /// The cell with every coordinate at its maximum.
    pub fn last_cell(&self) -> Cell {
        self.sizes.iter().map(|&s| s as isize - 1).collect()
    }

    /// A slice covering every cell of the shape.
    pub fn full_slice(&self) -> Slice {
        Slice::spanning(Cell::origin(self.dimensions()), self.last_cell())
    }
}

impl fmt::Display for MazeDim {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sizes.iter().join("x"))
    }
}
