//! Breadth first distances over a maze's passages, and the path metrics built on them.
//!
//! Every passage is one step, so a plain flood fill gives shortest distances and there is never
//! a need to revisit a cell once it has a distance.

use log::debug;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::Cell;
use crate::errors::{MazeError, Result};
use crate::maze::Maze;
use crate::utils::{self, FnvHashMap, FnvHashSet};

/// Below this many unordered cell pairs the average path length is computed over every pair.
pub const EXHAUSTIVE_PAIRS_LIMIT: usize = 10_000;

/// Number of distinct random pairs averaged for larger mazes.
pub const SAMPLED_PAIRS: usize = 1_000;

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cell,
    distances: FnvHashMap<Cell, usize>,
    max_distance: usize,
}

impl Distances {
    /// Flood fill the maze from `start`. Cells not reachable from `start` get no distance.
    pub fn new(maze: &Maze, start: &Cell) -> Result<Distances> {
        maze.dimensions().validate(start)?;

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start.clone(), 0);

        // The distances map doubles as the visited set.
        let mut frontier = vec![start.clone()];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell in &frontier {
                let distance_to_cell = distances[cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }
                for link in maze.links(cell) {
                    if !distances.contains_key(&link) {
                        distances.insert(link.clone(), distance_to_cell + 1);
                        new_frontier.push(link);
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate: start.clone(),
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> &Cell {
        &self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, cell: &Cell) -> Option<usize> {
        self.distances.get(cell).cloned()
    }

    /// The reachable cells at the maximum distance, in row-major order.
    pub fn furthest_points(&self) -> SmallVec<[Cell; 8]> {
        let mut furthest: SmallVec<[Cell; 8]> = self
            .distances
            .iter()
            .filter(|&(_, &distance)| distance == self.max_distance)
            .map(|(cell, _)| cell.clone())
            .collect();
        furthest.sort();
        furthest
    }
}

/// Number of passages on the shortest route between two cells, `None` if there is no route.
pub fn shortest_distance(maze: &Maze, from: &Cell, to: &Cell) -> Result<Option<usize>> {
    maze.dimensions().validate(to)?;
    if from == to {
        maze.dimensions().validate(from)?;
        return Ok(Some(0));
    }
    let distances = Distances::new(maze, from)?;
    Ok(distances.distance_from_start_to(to))
}

/// Walk back down the distance gradient from `end` to the start of `distances`.
pub fn shortest_path(maze: &Maze, distances: &Distances, end: &Cell) -> Option<Vec<Cell>> {
    let mut current_distance = distances.distance_from_start_to(end)?;
    let mut path = vec![end.clone()];
    let mut current = end.clone();

    while current_distance > 0 {
        let closer = maze.links(&current).into_iter().find(|link| {
            distances.distance_from_start_to(link) == Some(current_distance - 1)
        })?;
        current_distance -= 1;
        path.push(closer.clone());
        current = closer;
    }

    path.reverse();
    Some(path)
}

// Two flood fills: the furthest cell from an arbitrary start is one end of a longest path,
// the furthest cell from there is the other. The start is the first cell with a passage, so
// mazes with isolated cells (cave walls) are measured where the passages are.
fn longest_path_ends(maze: &Maze) -> Result<(Distances, Cell)> {
    let arbitrary_start = maze
        .iter()
        .find(|cell| maze.degree(cell) > 0)
        .unwrap_or_else(|| Cell::origin(maze.dimensions().dimensions()));
    let first_distances = Distances::new(maze, &arbitrary_start)?;
    let path_start = first_distances.furthest_points()[0].clone();

    let distances_from_start = Distances::new(maze, &path_start)?;
    let path_end = distances_from_start.furthest_points()[0].clone();
    Ok((distances_from_start, path_end))
}

/// Length of the longest shortest path, measured in the component holding the first cell (in
/// row-major order) that has a passage.
///
/// Exact for perfect mazes. On mazes with loops or several components it is only an
/// estimate, a lower bound on the true diameter.
pub fn diameter(maze: &Maze) -> usize {
    longest_path_ends(maze)
        .map(|(distances, end)| distances.distance_from_start_to(&end).unwrap_or(0))
        .unwrap_or(0)
}

/// The cells along the path whose length `diameter` reports.
pub fn longest_path(maze: &Maze) -> Vec<Cell> {
    longest_path_ends(maze)
        .ok()
        .and_then(|(distances, end)| shortest_path(maze, &distances, &end))
        .unwrap_or_else(Vec::new)
}

/// Mean shortest distance between two distinct cells.
///
/// Small mazes average over every unordered pair, larger ones over `SAMPLED_PAIRS` distinct
/// random pairs. Fails with `Unreachable` if any examined pair is disconnected, since the maze
/// is expected to be perfect.
pub fn average_path_length<R: Rng + ?Sized>(maze: &Maze, rng: &mut R) -> Result<f64> {
    let cells_count = maze.size();
    if cells_count < 2 {
        return Ok(0.0);
    }
    let pairs_count = cells_count * (cells_count - 1) / 2;

    let average = if pairs_count < EXHAUSTIVE_PAIRS_LIMIT {
        exhaustive_average(maze)?
    } else {
        sampled_average(maze, rng)?
    };
    debug!(
        "average path length {:.3} over a {} maze ({} pairs)",
        average,
        maze.dimensions(),
        pairs_count
    );
    Ok(average)
}

fn exhaustive_average(maze: &Maze) -> Result<f64> {
    let cells: Vec<Cell> = maze.iter().collect();
    let mut total = 0usize;
    let mut pairs = 0usize;

    for (i, from) in cells.iter().enumerate() {
        let distances = Distances::new(maze, from)?;
        for to in &cells[i + 1..] {
            total += distances
                .distance_from_start_to(to)
                .ok_or_else(|| unreachable(from, to))?;
            pairs += 1;
        }
    }
    Ok(total as f64 / pairs as f64)
}

fn sampled_average<R: Rng + ?Sized>(maze: &Maze, rng: &mut R) -> Result<f64> {
    let cells_count = maze.size();
    let dimensions = maze.dimensions();
    let mut sampled: FnvHashSet<(usize, usize)> = utils::fnv_hashset(SAMPLED_PAIRS);
    let mut total = 0usize;

    while sampled.len() < SAMPLED_PAIRS {
        let a = rng.gen_range(0..cells_count);
        let b = rng.gen_range(0..cells_count);
        if a == b {
            continue;
        }
        let pair = if a < b { (a, b) } else { (b, a) };
        if !sampled.insert(pair) {
            continue;
        }
        if let (Some(from), Some(to)) = (dimensions.cell_at(pair.0), dimensions.cell_at(pair.1)) {
            total += shortest_distance(maze, &from, &to)?.ok_or_else(|| unreachable(&from, &to))?;
        }
    }
    Ok(total as f64 / SAMPLED_PAIRS as f64)
}

fn unreachable(from: &Cell, to: &Cell) -> MazeError {
    MazeError::Unreachable {
        from: from.clone(),
        to: to.clone(),
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::dimensions::MazeDim;
    use crate::generators;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn gc(coords: &[isize]) -> Cell {
        Cell::new(coords)
    }

    fn maze(sizes: &[usize]) -> Maze {
        Maze::new(MazeDim::new(sizes).unwrap())
    }

    // A single corridor through every cell of a 1D maze.
    fn corridor(length: usize) -> Maze {
        let mut m = maze(&[length]);
        for i in 1..length as isize {
            m.link(&gc(&[i - 1]), &gc(&[i])).unwrap();
        }
        m
    }

    #[test]
    fn distances_requires_valid_start() {
        let g = maze(&[3, 3]);
        assert_eq!(
            Distances::new(&g, &gc(&[3, 3])).unwrap_err(),
            MazeError::OutOfBounds(gc(&[3, 3]))
        );
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = maze(&[3, 3]);
        let start = gc(&[0, 0]);
        let distances = Distances::new(&g, &start).unwrap();
        for cell in g.iter() {
            let d = distances.distance_from_start_to(&cell);
            if cell != start {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reached_count(), 1);
        assert_eq!(distances.start(), &start);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = Maze::fully_connected(MazeDim::new(&[2, 2]).unwrap());
        let distances = Distances::new(&g, &gc(&[0, 0])).unwrap();
        assert_eq!(distances.distance_from_start_to(&gc(&[0, 0])), Some(0));
        assert_eq!(distances.distance_from_start_to(&gc(&[0, 1])), Some(1));
        assert_eq!(distances.distance_from_start_to(&gc(&[1, 0])), Some(1));
        assert_eq!(distances.distance_from_start_to(&gc(&[1, 1])), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points(), &[gc(&[1, 1])]);
    }

    #[test]
    fn shortest_distance_cases() {
        let g = corridor(5);
        assert_eq!(shortest_distance(&g, &gc(&[0]), &gc(&[0])), Ok(Some(0)));
        assert_eq!(shortest_distance(&g, &gc(&[0]), &gc(&[4])), Ok(Some(4)));
        assert_eq!(shortest_distance(&g, &gc(&[3]), &gc(&[1])), Ok(Some(2)));

        let empty = maze(&[2, 2]);
        assert_eq!(shortest_distance(&empty, &gc(&[0, 0]), &gc(&[1, 1])), Ok(None));
        assert!(shortest_distance(&empty, &gc(&[0, 0]), &gc(&[0, 0, 0])).is_err());
        assert!(shortest_distance(&empty, &gc(&[5, 5]), &gc(&[5, 5])).is_err());
    }

    #[test]
    fn shortest_path_follows_passages() {
        let g = corridor(6);
        let distances = Distances::new(&g, &gc(&[1])).unwrap();
        let path = shortest_path(&g, &distances, &gc(&[4])).unwrap();
        assert_eq!(path, vec![gc(&[1]), gc(&[2]), gc(&[3]), gc(&[4])]);

        let empty = maze(&[3]);
        let distances = Distances::new(&empty, &gc(&[0])).unwrap();
        assert_eq!(shortest_path(&empty, &distances, &gc(&[2])), None);
    }

    #[test]
    fn diameter_of_corridor() {
        assert_eq!(diameter(&corridor(1)), 0);
        assert_eq!(diameter(&corridor(7)), 6);
        let path = longest_path(&corridor(7));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn diameter_skips_isolated_leading_cells() {
        // The origin is walled off; the passages form a corridor further along the grid.
        let mut m = maze(&[3, 4]);
        for y in 0..3 {
            m.link(&gc(&[2, y]), &gc(&[2, y + 1])).unwrap();
        }
        m.link(&gc(&[1, 3]), &gc(&[2, 3])).unwrap();
        assert_eq!(m.degree(&gc(&[0, 0])), 0);
        assert_eq!(diameter(&m), 4);
        assert_eq!(longest_path(&m).len(), 5);

        assert_eq!(diameter(&maze(&[3, 4])), 0);
    }

    #[test]
    fn diameter_of_perfect_maze_matches_longest_path() {
        let dims = MazeDim::new(&[6, 7]).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(3);
        let m = generators::recursive_backtracker(&dims, &mut rng);
        let d = diameter(&m);
        assert_eq!(longest_path(&m).len(), d + 1);

        // No pair is further apart than the diameter in a tree.
        let cells: Vec<Cell> = m.iter().collect();
        for from in cells.iter().step_by(5) {
            let distances = Distances::new(&m, from).unwrap();
            assert!(distances.max() <= d);
        }
    }

    #[test]
    fn average_path_length_known_shapes() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        assert_eq!(average_path_length(&maze(&[1]), &mut rng), Ok(0.0));
        // pairs of a 3 corridor: 1, 2, 1
        let avg = average_path_length(&corridor(3), &mut rng).unwrap();
        assert!((avg - 4.0 / 3.0).abs() < 1e-9);
        // 4 corridor: 1+2+3+1+2+1 over 6
        let avg = average_path_length(&corridor(4), &mut rng).unwrap();
        assert!((avg - 10.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn average_path_length_flags_disconnected_mazes() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        match average_path_length(&maze(&[2, 2]), &mut rng) {
            Err(MazeError::Unreachable { .. }) => {}
            other => panic!("expected an unreachable pair, got {:?}", other),
        }
        match average_path_length(&maze(&[200]), &mut rng) {
            Err(MazeError::Unreachable { .. }) => {}
            other => panic!("expected an unreachable pair, got {:?}", other),
        }
    }

    #[test]
    fn average_path_length_sampled() {
        // 200 cells gives 19900 pairs, over the exhaustive limit.
        let mut rng = XorShiftRng::seed_from_u64(11);
        let avg = average_path_length(&corridor(200), &mut rng).unwrap();
        // The exact mean over all pairs of an n corridor is (n + 1) / 3.
        assert!(avg > 40.0 && avg < 94.0);
    }

    #[test]
    fn distance_is_symmetric_and_reflexive() {
        fn prop(seed: u64, a: usize, b: usize) -> bool {
            let dims = MazeDim::new(&[5, 6]).unwrap();
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let m = generators::wilson(&dims, &mut rng);
            let from = dims.cell_at(a % dims.size()).unwrap();
            let to = dims.cell_at(b % dims.size()).unwrap();
            shortest_distance(&m, &from, &from) == Ok(Some(0))
                && shortest_distance(&m, &from, &to) == shortest_distance(&m, &to, &from)
                && shortest_distance(&m, &from, &to).unwrap().is_some()
        }
        quickcheck(prop as fn(u64, usize, usize) -> bool);
    }
}
