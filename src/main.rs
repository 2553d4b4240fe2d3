use hom_count::graph::HashMapGraph;
use hom_count::io::{DimacsReader, PaceReader};
use hom_count::{DecomposerType, HomomorphismCounter};
use std::convert::TryFrom;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::PathBuf;
use std::str::FromStr;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, Clone, Copy)]
enum Decomposer {
    MinFill,
    MinDegree,
}

impl FromStr for Decomposer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min-fill" => Ok(Decomposer::MinFill),
            "min-degree" => Ok(Decomposer::MinDegree),
            _ => Err(format!("unknown decomposer '{}', use min-fill or min-degree", s)),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "hom-count-cli",
    about = "Counts the homomorphisms from a source graph into a target graph."
)]
struct Opt {
    /// Source graph, using the graph format of the PACE 2021 challenge.
    #[structopt(parse(from_os_str))]
    source: PathBuf,

    /// Target graph, same format as the source.
    #[structopt(parse(from_os_str))]
    target: PathBuf,

    /// Read both graphs in DIMACS format (`p edge n m`, `e u v`) instead.
    #[structopt(long)]
    dimacs: bool,

    /// Elimination heuristic decomposing the source: min-fill or min-degree.
    #[structopt(short, long, default_value = "min-fill")]
    decomposer: Decomposer,

    /// Targets at least this dense are stored as an adjacency matrix.
    #[structopt(long, default_value = "0.5")]
    density_threshold: f64,

    /// Evaluate independent subtrees on multiple threads.
    #[cfg(feature = "parallel")]
    #[structopt(short, long)]
    parallel: bool,

    /// Log progress as comment lines on stderr, repeat for more detail.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn read_graph(path: &PathBuf, dimacs: bool) -> io::Result<HashMapGraph> {
    let reader = BufReader::new(File::open(path)?);
    if dimacs {
        HashMapGraph::try_from(DimacsReader(reader))
    } else {
        HashMapGraph::try_from(PaceReader(reader))
    }
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    #[cfg(feature = "logging")]
    {
        let level = hom_count::logger::level_for_verbosity(opt.verbose);
        if let Err(e) = hom_count::logger::build_logger_for_level(level) {
            eprintln!("c could not initialize logging: {}", e);
        }
    }

    #[cfg(feature = "handle-ctrlc")]
    if let Err(e) = hom_count::signals::initialize() {
        eprintln!("c could not install signal handler: {}", e);
    }

    let source = read_graph(&opt.source, opt.dimacs)?;
    let target = read_graph(&opt.target, opt.dimacs)?;

    let decomposer = match opt.decomposer {
        Decomposer::MinFill => DecomposerType::MinFill,
        Decomposer::MinDegree => DecomposerType::MinDegree,
    };
    #[allow(unused_mut)]
    let mut counter = HomomorphismCounter::default()
        .decomposer(decomposer)
        .density_threshold(opt.density_threshold);
    #[cfg(feature = "parallel")]
    if opt.parallel {
        counter = counter.traversal(hom_count::Traversal::Parallel);
    }

    let count = counter
        .count(&source, &target)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    println!("{}", count);
    Ok(())
}
