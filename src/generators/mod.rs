//! Maze generation algorithms.
//!
//! Every generator is a pure function of a shape and a random number generator, so a seeded rng
//! reproduces the same maze. All but `cellular_automata` carve a perfect maze: a spanning tree
//! over the grid with exactly one path between any two cells.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::Rng;

use crate::cells::{Cell, CellSmallVec};
use crate::dimensions::MazeDim;
use crate::errors::MazeError;
use crate::maze::Maze;
use crate::utils::FnvHashSet;

mod biased;
mod cellular;
mod frontier;
mod sets;
mod walks;

pub use self::biased::{binary_tree, sidewinder};
pub use self::cellular::{cellular_automata, Cave, CaveParams, CaveParamsBuilder};
pub use self::frontier::{growing_tree, prim, GrowingTreePolicy};
pub use self::sets::{eller, kruskal};
pub use self::walks::{aldous_broder, hunt_and_kill, recursive_backtracker, wilson};

/// The spanning tree generators by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorKind {
    RecursiveBacktracker,
    HuntAndKill,
    Wilson,
    AldousBroder,
    Prim,
    Kruskal,
    GrowingTree(GrowingTreePolicy),
    Eller,
    BinaryTree,
    Sidewinder,
}

impl GeneratorKind {
    pub fn all() -> [GeneratorKind; 10] {
        [
            GeneratorKind::RecursiveBacktracker,
            GeneratorKind::HuntAndKill,
            GeneratorKind::Wilson,
            GeneratorKind::AldousBroder,
            GeneratorKind::Prim,
            GeneratorKind::Kruskal,
            GeneratorKind::GrowingTree(GrowingTreePolicy::default()),
            GeneratorKind::Eller,
            GeneratorKind::BinaryTree,
            GeneratorKind::Sidewinder,
        ]
    }

    fn name(&self) -> &'static str {
        match *self {
            GeneratorKind::RecursiveBacktracker => "recursive-backtracker",
            GeneratorKind::HuntAndKill => "hunt-kill",
            GeneratorKind::Wilson => "wilson",
            GeneratorKind::AldousBroder => "aldous-broder",
            GeneratorKind::Prim => "prim",
            GeneratorKind::Kruskal => "kruskal",
            GeneratorKind::GrowingTree(_) => "growing-tree",
            GeneratorKind::Eller => "eller",
            GeneratorKind::BinaryTree => "binary-tree",
            GeneratorKind::Sidewinder => "sidewinder",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<GeneratorKind, MazeError> {
        let kind = match s {
            "recursive-backtracker" | "backtracker" => GeneratorKind::RecursiveBacktracker,
            "hunt-kill" | "hunt-and-kill" => GeneratorKind::HuntAndKill,
            "wilson" => GeneratorKind::Wilson,
            "aldous-broder" => GeneratorKind::AldousBroder,
            "prim" => GeneratorKind::Prim,
            "kruskal" => GeneratorKind::Kruskal,
            "growing-tree" => GeneratorKind::GrowingTree(GrowingTreePolicy::default()),
            "eller" => GeneratorKind::Eller,
            "binary-tree" | "binary" => GeneratorKind::BinaryTree,
            "sidewinder" => GeneratorKind::Sidewinder,
            _ => return Err(MazeError::UnknownGenerator(s.to_string())),
        };
        Ok(kind)
    }
}

/// Run the generator named by `kind`.
pub fn generate<R: Rng + ?Sized>(kind: GeneratorKind, dimensions: &MazeDim, rng: &mut R) -> Maze {
    match kind {
        GeneratorKind::RecursiveBacktracker => recursive_backtracker(dimensions, rng),
        GeneratorKind::HuntAndKill => hunt_and_kill(dimensions, rng),
        GeneratorKind::Wilson => wilson(dimensions, rng),
        GeneratorKind::AldousBroder => aldous_broder(dimensions, rng),
        GeneratorKind::Prim => prim(dimensions, rng),
        GeneratorKind::Kruskal => kruskal(dimensions, rng),
        GeneratorKind::GrowingTree(policy) => growing_tree(dimensions, policy, rng),
        GeneratorKind::Eller => eller(dimensions, rng),
        GeneratorKind::BinaryTree => binary_tree(dimensions, rng),
        GeneratorKind::Sidewinder => sidewinder(dimensions, rng),
    }
}

fn start(name: &str, dimensions: &MazeDim) -> Maze {
    debug!("{} on {} ({} cells)", name, dimensions, dimensions.size());
    Maze::new(dimensions.clone())
}

fn finish(name: &str, maze: Maze) -> Maze {
    debug!("{} done: {:?}", name, maze);
    maze
}

fn unvisited_neighbours(maze: &Maze, cell: &Cell, visited: &FnvHashSet<Cell>) -> CellSmallVec {
    maze.neighbours(cell)
        .filter(|n| !visited.contains(n))
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::analysis;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn every_generator() -> Vec<GeneratorKind> {
        let mut kinds = GeneratorKind::all().to_vec();
        kinds.extend_from_slice(&[
            GeneratorKind::GrowingTree(GrowingTreePolicy::Newest),
            GeneratorKind::GrowingTree(GrowingTreePolicy::Oldest),
            GeneratorKind::GrowingTree(GrowingTreePolicy::Random),
            GeneratorKind::GrowingTree(GrowingTreePolicy::Mixed { newest_probability: 0.9 }),
        ]);
        kinds
    }

    fn assert_perfect(kind: GeneratorKind, sizes: &[usize], seed: u64) {
        let dims = MazeDim::new(sizes).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let maze = generate(kind, &dims, &mut rng);
        assert_eq!(maze.size(), dims.size());
        assert_eq!(
            maze.links_count(),
            dims.size() - 1,
            "{} on {} has the wrong passage count",
            kind,
            dims
        );
        assert!(analysis::is_connected(&maze), "{} on {} is disconnected", kind, dims);
        assert!(analysis::is_acyclic(&maze), "{} on {} has a cycle", kind, dims);
    }

    #[test]
    fn every_generator_carves_a_spanning_tree() {
        let shapes: [&[usize]; 8] = [
            &[1],
            &[1, 1],
            &[7],
            &[5, 8],
            &[8, 5],
            &[3, 4, 5],
            &[2, 2, 2, 2],
            &[1, 6],
        ];
        for kind in every_generator() {
            for (seed, shape) in shapes.iter().enumerate() {
                assert_perfect(kind, shape, seed as u64);
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let dims = MazeDim::new(&[9, 6]).unwrap();
        for kind in every_generator() {
            let first = generate(kind, &dims, &mut XorShiftRng::seed_from_u64(99));
            let second = generate(kind, &dims, &mut XorShiftRng::seed_from_u64(99));
            let first_links: Vec<_> = first.iter_links().collect();
            let second_links: Vec<_> = second.iter_links().collect();
            assert_eq!(first_links, second_links, "{} is not reproducible", kind);
        }
    }

    #[test]
    fn passages_only_join_grid_neighbours() {
        let dims = MazeDim::new(&[4, 5, 3]).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(1);
        for kind in every_generator() {
            let maze = generate(kind, &dims, &mut rng);
            for (a, b) in maze.iter_links() {
                assert!(maze.neighbours(&a).any(|n| n == b), "{}: {} -> {}", kind, a, b);
            }
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in GeneratorKind::all().iter() {
            let parsed: GeneratorKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        assert_eq!("hunt-and-kill".parse(), Ok(GeneratorKind::HuntAndKill));
        assert_eq!(
            "labyrinth".parse::<GeneratorKind>(),
            Err(MazeError::UnknownGenerator("labyrinth".to_string()))
        );
    }

    #[test]
    fn quickcheck_random_shapes_are_perfect() {
        fn p(sizes: Vec<u8>, seed: u64, which: usize) -> TestResult {
            if sizes.is_empty() {
                return TestResult::discard();
            }
            let sizes: Vec<usize> = sizes.iter().take(3).map(|&s| (s % 6) as usize + 1).collect();
            let kinds = every_generator();
            let kind = kinds[which % kinds.len()];
            assert_perfect(kind, &sizes, seed);
            TestResult::passed()
        }
        quickcheck(p as fn(Vec<u8>, u64, usize) -> TestResult);
    }
}
