use docopt::Docopt;
use log::info;
use ndmazes::{
    analysis,
    dimensions::MazeDim,
    generators::{self, CaveParamsBuilder, GeneratorKind, GrowingTreePolicy},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde::Deserialize;

const USAGE: &str = "N-dimensional mazes

Usage:
    mazes_driver -h | --help
    mazes_driver list
    mazes_driver cave [--dims=<list>] [--seed=<n>] [--fill=<p>] [--generations=<n>] [--keep=<r>] [--convert=<r>]
    mazes_driver <algorithm> [--dims=<list>] [--seed=<n>] [--policy=<p>] [--newest-probability=<p>]

Options:
    -h --help                   Show this screen.
    --dims=<list>               Comma separated axis sizes, one per dimension [default: 20,20].
    --seed=<n>                  Seed for the random number generator. Random if not given.
    --fill=<p>                  Cave: chance a cell starts as a wall [default: 0.45].
    --generations=<n>           Cave: smoothing rounds [default: 4].
    --keep=<r>                  Cave: wall neighbour ratio that keeps a wall [default: 0.5].
    --convert=<r>               Cave: wall neighbour ratio that walls up an open cell [default: 0.625].
    --policy=<p>                Growing tree: newest, oldest, random or mixed [default: mixed].
    --newest-probability=<p>    Growing tree: chance the mixed policy picks the newest cell [default: 0.5].

Algorithms: recursive-backtracker, hunt-kill, wilson, aldous-broder, prim, kruskal,
growing-tree, eller, binary-tree, sidewinder.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_list: bool,
    cmd_cave: bool,
    arg_algorithm: Option<String>,
    flag_dims: String,
    flag_seed: Option<u64>,
    flag_fill: f64,
    flag_generations: usize,
    flag_keep: f64,
    flag_convert: f64,
    flag_policy: String,
    flag_newest_probability: f64,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Maze(::ndmazes::errors::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_list {
        for kind in GeneratorKind::all().iter() {
            println!("{}", kind);
        }
        println!("cave");
        return Ok(());
    }

    let dimensions = parse_dimensions(&args.flag_dims)?;
    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {}", seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let maze = if args.cmd_cave {
        let params = CaveParamsBuilder::new()
            .fill_probability(args.flag_fill)
            .generations(args.flag_generations)
            .keep_threshold(args.flag_keep)
            .convert_threshold(args.flag_convert)
            .build()?;
        let cave = generators::cellular_automata(&dimensions, &params, &mut rng)?;
        println!("cave {} seed {}", dimensions, seed);
        println!("walls: {}", cave.wall_count());
        println!("open: {}", cave.open_count());
        println!();
        cave.to_maze()
    } else {
        let kind = generator_kind(&args)?;
        println!("{} {} seed {}", kind, dimensions, seed);
        generators::generate(kind, &dimensions, &mut rng)
    };

    let report = analysis::analyze(&maze, &mut rng);
    println!("{}", report);

    Ok(())
}

fn parse_dimensions(list: &str) -> Result<MazeDim> {
    let sizes = list
        .split(',')
        .map(|size| size.trim().parse::<usize>())
        .collect::<::std::result::Result<Vec<usize>, _>>()
        .chain_err(|| format!("--dims must be comma separated sizes, got '{}'", list))?;
    Ok(MazeDim::new(&sizes)?)
}

fn generator_kind(args: &MazeArgs) -> Result<GeneratorKind> {
    let name = args.arg_algorithm.as_deref().unwrap_or_default();
    let kind = match name.parse::<GeneratorKind>()? {
        GeneratorKind::GrowingTree(_) => {
            let policy = if args.flag_policy == "mixed" {
                GrowingTreePolicy::mixed(args.flag_newest_probability)?
            } else {
                args.flag_policy.parse::<GrowingTreePolicy>()?
            };
            GeneratorKind::GrowingTree(policy)
        }
        kind => kind,
    };
    Ok(kind)
}
