use std::fmt;
use std::slice;

use petgraph::graph;
use petgraph::{Graph, Undirected};
use rand::Rng;

use crate::cells::{Cell, CellSmallVec};
use crate::dimensions::MazeDim;
use crate::errors::{MazeError, Result};
use crate::slices::SliceIter;

/// The passage graph of a maze over a fixed shape.
///
/// Every cell of the shape is a node, addressed by its row-major index. A passage is a single
/// undirected edge, so `a` reaching `b` always means `b` reaches `a`. Passages can be added but
/// never removed.
#[derive(Clone)]
pub struct Maze {
    graph: Graph<(), (), Undirected, u32>,
    dimensions: MazeDim,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Maze :: dimensions: {}, cells: {:?}, passages: {:?}",
            self.dimensions,
            self.size(),
            self.links_count()
        )
    }
}

impl Maze {
    /// A maze with no passages at all.
    pub fn new(dimensions: MazeDim) -> Maze {
        let nodes = dimensions.size();
        let edges_hint = nodes * dimensions.dimensions();

        let mut maze = Maze {
            graph: Graph::with_capacity(nodes, edges_hint),
            dimensions,
        };
        for _ in 0..nodes {
            let _ = maze.graph.add_node(());
        }

        maze
    }

    /// A maze where every pair of grid-adjacent cells is linked.
    pub fn fully_connected(dimensions: MazeDim) -> Maze {
        let mut maze = Maze::new(dimensions);
        let cells: Vec<Cell> = maze.iter().collect();
        for cell in &cells {
            for axis in 0..maze.dimensions.dimensions() {
                let _ = maze.carve(cell, &cell.plus(axis));
            }
        }
        maze
    }

    #[inline]
    pub fn dimensions(&self) -> &MazeDim {
        &self.dimensions
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of passages.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// One coordinate per axis, each drawn uniformly.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        self.dimensions
            .sizes()
            .iter()
            .map(|&size| rng.gen_range(0..size) as isize)
            .collect()
    }

    /// Link two cells with a passage.
    ///
    /// Both cells must have the maze's dimensionality and lie inside it, one step apart along a
    /// single axis. A cell cannot be linked to itself. Linking an already linked pair changes nothing.
    pub fn link(&mut self, a: &Cell, b: &Cell) -> Result<()> {
        self.link_all(a, slice::from_ref(b))
    }

    /// Link `cell` to each of `neighbours`, which must all be grid-adjacent to it. Every cell is
    /// validated before any passage is added, so a failed call leaves the maze untouched.
    pub fn link_all(&mut self, cell: &Cell, neighbours: &[Cell]) -> Result<()> {
        self.dimensions.validate(cell)?;
        for neighbour in neighbours {
            self.dimensions.validate(neighbour)?;
            if neighbour == cell {
                return Err(MazeError::SelfLink(cell.clone()));
            }
            if !cell.is_grid_adjacent(neighbour) {
                return Err(MazeError::NotAdjacent {
                    from: cell.clone(),
                    to: neighbour.clone(),
                });
            }
        }
        for neighbour in neighbours {
            let _ = self.carve(cell, neighbour);
        }
        Ok(())
    }

    /// Are two cells in the maze linked? Cells outside the maze are never linked.
    pub fn is_linked(&self, a: &Cell, b: &Cell) -> bool {
        match (self.graph_index(a), self.graph_index(b)) {
            (Some(a_index), Some(b_index)) => self.graph.find_edge(a_index, b_index).is_some(),
            _ => false,
        }
    }

    /// Cells linked to a particular cell by a passage. Empty for cells outside the maze.
    pub fn links(&self, cell: &Cell) -> CellSmallVec {
        self.graph_index(cell)
            .map(|index| {
                self.graph
                    .neighbors(index)
                    .filter_map(|n| self.dimensions.cell_at(n.index()))
                    .collect()
            })
            .unwrap_or_else(CellSmallVec::new)
    }

    /// Number of passages leaving a cell.
    pub fn degree(&self, cell: &Cell) -> usize {
        self.graph_index(cell)
            .map_or(0, |index| self.graph.neighbors(index).count())
    }

    /// Cells one step forward or back along each axis that lie inside the maze, whether or not a
    /// passage leads to them.
    pub fn neighbours<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = Cell> + 'a {
        let axes = if cell.dimensions() == self.dimensions.dimensions() {
            cell.dimensions()
        } else {
            0
        };
        (0..axes)
            .flat_map(move |axis| vec![cell.minus(axis), cell.plus(axis)])
            .filter(move |adjacent| self.dimensions.contains(adjacent))
    }

    /// Is the cell within this maze's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, cell: &Cell) -> bool {
        self.dimensions.contains(cell)
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> SliceIter {
        self.dimensions.full_slice().iter()
    }

    /// Every passage exactly once.
    pub fn iter_links(&self) -> LinksIter<'_> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            dimensions: &self.dimensions,
        }
    }

    /// Add a passage between two cells already known to be valid. Returns false, adding
    /// nothing, if either cell is outside the maze or they are the same cell.
    pub(crate) fn carve(&mut self, a: &Cell, b: &Cell) -> bool {
        match (self.graph_index(a), self.graph_index(b)) {
            (Some(a_index), Some(b_index)) if a_index != b_index => {
                let _ = self.graph.update_edge(a_index, b_index, ());
                true
            }
            _ => false,
        }
    }

    #[inline]
    fn graph_index(&self, cell: &Cell) -> Option<graph::NodeIndex<u32>> {
        self.dimensions.index_of(cell).map(graph::NodeIndex::new)
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = Cell;
    type IntoIter = SliceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct LinksIter<'a> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), u32>>,
    dimensions: &'a MazeDim,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cell, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.graph_edge_iter {
            if let (Some(src), Some(dst)) = (
                self.dimensions.cell_at(edge.source().index()),
                self.dimensions.cell_at(edge.target().index()),
            ) {
                return Some((src, dst));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges left: {:?}", self.graph_edge_iter.len())
    }
}
