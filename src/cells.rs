use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use itertools::Itertools;
use smallvec::SmallVec;

pub type CoordinateSmallVec = SmallVec<[isize; 4]>;
pub type CellSmallVec = SmallVec<[Cell; 8]>;

/// A position in an N dimensional grid, one signed coordinate per axis.
///
/// Cells are plain values: stepping off the edge of a maze produces a perfectly good `Cell`
/// (possibly with negative coordinates) that the maze simply reports as out of bounds.
#[derive(Hash, Eq, PartialEq, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    coords: CoordinateSmallVec,
}

impl Cell {
    pub fn new(coords: &[isize]) -> Cell {
        Cell { coords: coords.iter().cloned().collect() }
    }

    /// The origin cell of an N dimensional grid.
    pub fn origin(dimensions: usize) -> Cell {
        Cell { coords: (0..dimensions).map(|_| 0).collect() }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate along `axis`. Panics if the axis does not exist, like slice indexing.
    #[inline]
    pub fn get(&self, axis: usize) -> isize {
        self.coords[axis]
    }

    #[inline]
    pub fn coords(&self) -> &[isize] {
        &self.coords
    }

    /// The grid-adjacent cell one step forward along `axis`.
    pub fn plus(&self, axis: usize) -> Cell {
        self.offset(axis, 1)
    }

    /// The grid-adjacent cell one step backward along `axis`.
    pub fn minus(&self, axis: usize) -> Cell {
        self.offset(axis, -1)
    }

    pub fn offset(&self, axis: usize, delta: isize) -> Cell {
        let mut coords = self.coords.clone();
        coords[axis] += delta;
        Cell { coords }
    }

    /// One step apart along exactly one axis.
    pub fn is_grid_adjacent(&self, other: &Cell) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| (a - b).abs())
                .sum::<isize>()
                == 1
    }

    /// Every cell within one step along every axis, including this cell: `3^N` cells.
    pub fn moore_block(&self) -> Vec<Cell> {
        (0..self.dimensions())
            .map(|axis| {
                let c = self.coords[axis];
                c - 1..=c + 1
            })
            .multi_cartesian_product()
            .map(|coords| Cell { coords: coords.into_iter().collect() })
            .collect()
    }

    /// The `3^N - 1` cells surrounding this one, diagonals included.
    pub fn moore_neighbours(&self) -> Vec<Cell> {
        self.moore_block().into_iter().filter(|c| c != self).collect()
    }
}

impl Index<usize> for Cell {
    type Output = isize;
    fn index(&self, axis: usize) -> &isize {
        &self.coords[axis]
    }
}

impl FromIterator<isize> for Cell {
    fn from_iter<I: IntoIterator<Item = isize>>(iter: I) -> Self {
        Cell { coords: iter.into_iter().collect() }
    }
}

impl From<(isize, isize)> for Cell {
    fn from(pair: (isize, isize)) -> Cell {
        Cell::new(&[pair.0, pair.1])
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.coords.iter().join(", "))
    }
}
