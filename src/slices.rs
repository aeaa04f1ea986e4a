use std::fmt;

use crate::cells::Cell;
use crate::errors::{MazeError, Result};

/// An axis aligned box of cells between two corners, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    lower: Cell,
    upper: Cell,
}

impl Slice {
    /// Requires both corners to have the same dimensionality and `lower <= upper` on every axis.
    pub fn new(lower: Cell, upper: Cell) -> Result<Slice> {
        if lower.dimensions() != upper.dimensions() {
            return Err(MazeError::DimensionMismatch {
                expected: lower.dimensions(),
                actual: upper.dimensions(),
            });
        }
        if lower.coords().iter().zip(upper.coords()).any(|(lo, hi)| lo > hi) {
            return Err(MazeError::InvalidSlice);
        }
        Ok(Slice::spanning(lower, upper))
    }

    pub(crate) fn spanning(lower: Cell, upper: Cell) -> Slice {
        Slice { lower, upper }
    }

    #[inline]
    pub fn lower(&self) -> &Cell {
        &self.lower
    }

    #[inline]
    pub fn upper(&self) -> &Cell {
        &self.upper
    }

    /// Number of cells in the box.
    pub fn len(&self) -> usize {
        self.lower
            .coords()
            .iter()
            .zip(self.upper.coords())
            .map(|(lo, hi)| (hi - lo + 1) as usize)
            .product()
    }

    /// Never true, a slice holds at least its corner cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.dimensions() == self.lower.dimensions()
            && cell
                .coords()
                .iter()
                .zip(self.lower.coords().iter().zip(self.upper.coords()))
                .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }

    /// Cells of the box in lexicographic order. Can be called any number of times.
    pub fn iter(&self) -> SliceIter {
        SliceIter {
            next_cell: Some(self.lower.clone()),
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            remaining: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a Slice {
    type Item = Cell;
    type IntoIter = SliceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone)]
pub struct SliceIter {
    next_cell: Option<Cell>,
    lower: Cell,
    upper: Cell,
    remaining: usize,
}

impl SliceIter {
    // Odometer increment: bump the last axis, carrying into earlier axes.
    fn successor(&self, cell: &Cell) -> Option<Cell> {
        let mut coords = cell.coords().to_vec();
        for axis in (0..coords.len()).rev() {
            if coords[axis] < self.upper.get(axis) {
                coords[axis] += 1;
                return Some(Cell::new(&coords));
            }
            coords[axis] = self.lower.get(axis);
        }
        None
    }
}

impl fmt::Debug for SliceIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SliceIter :: next: {:?}, remaining: {:?}",
            self.next_cell, self.remaining
        )
    }
}

impl ExactSizeIterator for SliceIter {} // default impl using size_hint()
impl Iterator for SliceIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next_cell.take()?;
        self.next_cell = self.successor(&current);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn gc(coords: &[isize]) -> Cell {
        Cell::new(coords)
    }

    #[test]
    fn rejects_bad_corners() {
        assert_eq!(
            Slice::new(gc(&[0, 0]), gc(&[1])),
            Err(MazeError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(Slice::new(gc(&[2, 0]), gc(&[1, 4])), Err(MazeError::InvalidSlice));
    }

    #[test]
    fn row_major_order() {
        let s = Slice::new(gc(&[1, 1]), gc(&[2, 3])).unwrap();
        let cells: Vec<Cell> = s.iter().collect();
        assert_eq!(
            cells,
            vec![
                gc(&[1, 1]),
                gc(&[1, 2]),
                gc(&[1, 3]),
                gc(&[2, 1]),
                gc(&[2, 2]),
                gc(&[2, 3])
            ]
        );
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn restartable() {
        let s = Slice::new(gc(&[0, 0, 0]), gc(&[1, 2, 3])).unwrap();
        let first: Vec<Cell> = s.iter().collect();
        let second: Vec<Cell> = (&s).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 24);
    }

    #[test]
    fn single_cell_slice() {
        let s = Slice::new(gc(&[4, -2]), gc(&[4, -2])).unwrap();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![gc(&[4, -2])]);
    }

    #[test]
    fn exact_size() {
        let s = Slice::new(gc(&[0, 0]), gc(&[2, 2])).unwrap();
        let mut it = s.iter();
        assert_eq!(it.len(), 9);
        it.next();
        it.next();
        assert_eq!(it.len(), 7);
        assert_eq!(it.count(), 7);
    }

    #[test]
    fn containment() {
        let s = Slice::new(gc(&[1, 1]), gc(&[2, 3])).unwrap();
        assert!(s.contains(&gc(&[2, 2])));
        assert!(!s.contains(&gc(&[0, 2])));
        assert!(!s.contains(&gc(&[1])));
    }
}
