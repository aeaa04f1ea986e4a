//! Cave generation with a cellular automaton. Unlike the other generators the result is not a
//! spanning tree but a field of wall and open cells.

use std::fmt;

use bit_set::BitSet;
use log::{debug, trace};
use rand::Rng;

use crate::cells::Cell;
use crate::dimensions::MazeDim;
use crate::errors::{MazeError, Result};
use crate::maze::Maze;

/// Parameters of the cave automaton. Ratios and probabilities must lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveParams {
    /// Chance that a cell starts as a wall.
    pub fill_probability: f64,
    /// How many times the rule is applied.
    pub generations: usize,
    /// A wall survives when at least this share of its neighbours are walls.
    pub keep_threshold: f64,
    /// An open cell turns into a wall when at least this share of its neighbours are walls.
    pub convert_threshold: f64,
}

impl Default for CaveParams {
    fn default() -> Self {
        CaveParams {
            fill_probability: 0.45,
            generations: 4,
            keep_threshold: 0.5,
            convert_threshold: 0.625,
        }
    }
}

impl CaveParams {
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("fill_probability", self.fill_probability),
            ("keep_threshold", self.keep_threshold),
            ("convert_threshold", self.convert_threshold),
        ];
        match ratios.iter().find(|(_, value)| !(0.0..=1.0).contains(value)) {
            Some(&(name, _)) => Err(MazeError::InvalidParameter { name }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaveParamsBuilder {
    params: CaveParams,
}

impl CaveParamsBuilder {
    pub fn new() -> CaveParamsBuilder {
        CaveParamsBuilder::default()
    }
    pub fn fill_probability(mut self, fill_probability: f64) -> Self {
        self.params.fill_probability = fill_probability;
        self
    }
    pub fn generations(mut self, generations: usize) -> Self {
        self.params.generations = generations;
        self
    }
    pub fn keep_threshold(mut self, keep_threshold: f64) -> Self {
        self.params.keep_threshold = keep_threshold;
        self
    }
    pub fn convert_threshold(mut self, convert_threshold: f64) -> Self {
        self.params.convert_threshold = convert_threshold;
        self
    }
    pub fn build(self) -> Result<CaveParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Wall flags for every cell, indexed in row-major order.
#[derive(Clone, PartialEq)]
pub struct Cave {
    dimensions: MazeDim,
    walls: BitSet,
}

impl fmt::Debug for Cave {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Cave :: dimensions: {}, walls: {:?}, open: {:?}",
            self.dimensions,
            self.wall_count(),
            self.open_count()
        )
    }
}

impl Cave {
    #[inline]
    pub fn dimensions(&self) -> &MazeDim {
        &self.dimensions
    }

    /// Cells outside the cave count as walls.
    pub fn is_wall(&self, cell: &Cell) -> bool {
        self.dimensions
            .index_of(cell)
            .map_or(true, |index| self.walls.contains(index))
    }

    pub fn is_open(&self, cell: &Cell) -> bool {
        !self.is_wall(cell)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn open_count(&self) -> usize {
        self.dimensions.size() - self.wall_count()
    }

    /// A maze linking every pair of grid-adjacent open cells. Walls get no passages.
    pub fn to_maze(&self) -> Maze {
        let mut maze = Maze::new(self.dimensions.clone());
        for cell in self.dimensions.full_slice().iter() {
            if self.is_wall(&cell) {
                continue;
            }
            for axis in 0..self.dimensions.dimensions() {
                let next = cell.plus(axis);
                if self.is_open(&next) {
                    maze.carve(&cell, &next);
                }
            }
        }
        maze
    }
}

/// Seed a random wall field then smooth it for `params.generations` rounds. Each round is
/// computed from the previous round's state only.
pub fn cellular_automata<R: Rng + ?Sized>(
    dimensions: &MazeDim,
    params: &CaveParams,
    rng: &mut R,
) -> Result<Cave> {
    params.validate()?;
    debug!("cellular automata on {} with {:?}", dimensions, params);

    let mut walls = seed_walls(dimensions, params.fill_probability, rng);
    for generation in 0..params.generations {
        walls = step(dimensions, &walls, params);
        trace!("generation {}: {} walls", generation, walls.len());
    }

    let cave = Cave {
        dimensions: dimensions.clone(),
        walls,
    };
    debug!("cellular automata done: {:?}", cave);
    Ok(cave)
}

fn seed_walls<R: Rng + ?Sized>(
    dimensions: &MazeDim,
    fill_probability: f64,
    rng: &mut R,
) -> BitSet {
    let size = dimensions.size();
    let mut walls = BitSet::with_capacity(size);
    for index in 0..size {
        if rng.gen::<f64>() < fill_probability {
            walls.insert(index);
        }
    }
    walls
}

// One synchronous generation: every cell is judged against the previous field only.
fn step(dimensions: &MazeDim, walls: &BitSet, params: &CaveParams) -> BitSet {
    let mut next = BitSet::with_capacity(dimensions.size());
    for (index, cell) in dimensions.full_slice().iter().enumerate() {
        let ratio = wall_ratio(dimensions, walls, &cell);
        let threshold = if walls.contains(index) {
            params.keep_threshold
        } else {
            params.convert_threshold
        };
        if ratio >= threshold {
            next.insert(index);
        }
    }
    next
}

// Share of the in-bounds Moore neighbours that are walls, 0 when there are none.
fn wall_ratio(dimensions: &MazeDim, walls: &BitSet, cell: &Cell) -> f64 {
    let (wall_neighbours, total) = cell
        .moore_neighbours()
        .iter()
        .filter_map(|neighbour| dimensions.index_of(neighbour))
        .fold((0usize, 0usize), |(w, t), index| {
            (w + walls.contains(index) as usize, t + 1)
        });
    if total == 0 {
        0.0
    } else {
        wall_neighbours as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn rng() -> XorShiftRng {
        XorShiftRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn default_params() {
        let params = CaveParams::default();
        assert_eq!(params.fill_probability, 0.45);
        assert_eq!(params.generations, 4);
        assert_eq!(params.keep_threshold, 0.5);
        assert_eq!(params.convert_threshold, 0.625);
        assert_eq!(CaveParamsBuilder::new().build(), Ok(params));
    }

    #[test]
    fn builder_validates() {
        let params = CaveParamsBuilder::new()
            .fill_probability(0.3)
            .generations(2)
            .build()
            .unwrap();
        assert_eq!(params.fill_probability, 0.3);
        assert_eq!(params.generations, 2);

        assert_eq!(
            CaveParamsBuilder::new().fill_probability(1.2).build(),
            Err(MazeError::InvalidParameter { name: "fill_probability" })
        );
        assert_eq!(
            CaveParamsBuilder::new().keep_threshold(-0.5).build(),
            Err(MazeError::InvalidParameter { name: "keep_threshold" })
        );
        assert_eq!(
            CaveParamsBuilder::new().convert_threshold(f64::NAN).build(),
            Err(MazeError::InvalidParameter { name: "convert_threshold" })
        );
    }

    #[test]
    fn invalid_params_are_rejected_by_generation() {
        let dims = MazeDim::new(&[5, 5]).unwrap();
        let params = CaveParams {
            fill_probability: 2.0,
            ..CaveParams::default()
        };
        assert!(cellular_automata(&dims, &params, &mut rng()).is_err());
    }

    #[test]
    fn empty_fill_stays_open() {
        let dims = MazeDim::new(&[6, 9]).unwrap();
        let params = CaveParamsBuilder::new().fill_probability(0.0).build().unwrap();
        let cave = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert_eq!(cave.open_count(), dims.size());
        assert_eq!(cave.wall_count(), 0);

        let maze = cave.to_maze();
        assert_eq!(
            maze.links_count(),
            Maze::fully_connected(dims.clone()).links_count()
        );
    }

    #[test]
    fn full_fill_stays_walled() {
        let dims = MazeDim::new(&[4, 4, 4]).unwrap();
        let params = CaveParamsBuilder::new().fill_probability(1.0).build().unwrap();
        let cave = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert_eq!(cave.wall_count(), dims.size());
        assert!(cave.is_wall(&Cell::new(&[1, 2, 3])));
        assert_eq!(cave.to_maze().links_count(), 0);
    }

    #[test]
    fn outside_is_wall() {
        let dims = MazeDim::new(&[3, 3]).unwrap();
        let params = CaveParamsBuilder::new().fill_probability(0.0).build().unwrap();
        let cave = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert!(cave.is_wall(&Cell::new(&[-1, 0])));
        assert!(cave.is_wall(&Cell::new(&[0, 3])));
        assert!(cave.is_open(&Cell::new(&[2, 2])));
    }

    #[test]
    fn isolated_wall_erodes() {
        // The centre wall of a 3x3 block sees no wall neighbours.
        let dims = MazeDim::new(&[3, 3]).unwrap();
        let mut walls = BitSet::new();
        walls.insert(4);
        let centre = Cell::new(&[1, 1]);
        assert_eq!(wall_ratio(&dims, &walls, &centre), 0.0);
        assert_eq!(wall_ratio(&dims, &walls, &Cell::new(&[0, 0])), 1.0 / 3.0);
    }

    fn walls_at(dims: &MazeDim, cells: &[Cell]) -> BitSet {
        cells.iter().filter_map(|c| dims.index_of(c)).collect()
    }

    #[test]
    fn sparse_wall_opens_up() {
        // A corner wall with one wall neighbour out of three: ratio 1/3, below the 0.5 keep.
        let dims = MazeDim::new(&[3, 3]).unwrap();
        let corner = Cell::new(&[0, 0]);
        let walls = walls_at(&dims, &[corner.clone(), Cell::new(&[0, 1])]);
        let next = step(&dims, &walls, &CaveParams::default());
        assert!(!next.contains(dims.index_of(&corner).unwrap()));
    }

    #[test]
    fn well_supported_wall_stays() {
        // Corner with two of three neighbours walled: 2/3 keeps it under keep 0.5, while the
        // same ratio would not meet a 0.7 threshold.
        let dims = MazeDim::new(&[3, 3]).unwrap();
        let corner = Cell::new(&[0, 0]);
        let walls = walls_at(
            &dims,
            &[corner.clone(), Cell::new(&[0, 1]), Cell::new(&[1, 0])],
        );
        let params = CaveParams {
            keep_threshold: 0.5,
            convert_threshold: 0.7,
            ..CaveParams::default()
        };
        let next = step(&dims, &walls, &params);
        assert!(next.contains(dims.index_of(&corner).unwrap()));
    }

    #[test]
    fn surrounded_open_cell_walls_up() {
        // Open centre with 5 of 8 neighbours walled: ratio 0.625 meets the convert threshold.
        let dims = MazeDim::new(&[3, 3]).unwrap();
        let centre = Cell::new(&[1, 1]);
        let walled: Vec<Cell> = vec![
            Cell::new(&[0, 0]),
            Cell::new(&[0, 1]),
            Cell::new(&[0, 2]),
            Cell::new(&[1, 0]),
            Cell::new(&[1, 2]),
        ];
        let walls = walls_at(&dims, &walled);
        let params = CaveParams::default();
        let next = step(&dims, &walls, &params);
        assert!(next.contains(dims.index_of(&centre).unwrap()));

        // With one fewer wall the ratio drops to 0.5 and the centre stays open, though it would
        // be enough to keep an existing wall.
        let walls = walls_at(&dims, &walled[..4]);
        let next = step(&dims, &walls, &params);
        assert!(!next.contains(dims.index_of(&centre).unwrap()));
    }

    #[test]
    fn zero_generations_keeps_the_seeded_field() {
        let dims = MazeDim::new(&[12, 9]).unwrap();
        let params = CaveParamsBuilder::new().generations(0).build().unwrap();
        let seeded = seed_walls(&dims, params.fill_probability, &mut rng());
        let cave = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert_eq!(cave.walls, seeded);
        assert!(cave.wall_count() > 0 && cave.open_count() > 0);

        // One generation is exactly one step of the seeded field.
        let params = CaveParamsBuilder::new().generations(1).build().unwrap();
        let smoothed = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert_eq!(smoothed.walls, step(&dims, &seeded, &params));
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let dims = MazeDim::new(&[1]).unwrap();
        let mut walls = BitSet::new();
        walls.insert(0);
        assert_eq!(wall_ratio(&dims, &walls, &Cell::new(&[0])), 0.0);
    }

    #[test]
    fn same_seed_same_cave() {
        let dims = MazeDim::new(&[20, 20]).unwrap();
        let params = CaveParams::default();
        let first = cellular_automata(&dims, &params, &mut rng()).unwrap();
        let second = cellular_automata(&dims, &params, &mut rng()).unwrap();
        assert_eq!(first, second);
    }
}
