use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use held_karp_core::Weight;
use held_karp_solver::Strategy;

#[derive(Debug, Parser)]
#[command(
    name = "held-karp",
    version,
    about = "Exact travelling-salesman tours on small complete graphs (Held-Karp bitmask DP)"
)]
pub struct Cli {
    /// Log verbosity on stderr; RUST_LOG overrides it
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write random matrices to matrix_1.txt .. matrix_K.txt
    Generate(GenerateArgs),
    /// Print a matrix file
    Show {
        file: PathBuf,
    },
    /// Solve one matrix file
    Solve(SolveArgs),
    /// Solve matrix_1.txt .. matrix_K.txt, skipping files that fail
    Batch(BatchArgs),
    /// Interactive menu
    Menu(MenuArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Cities per matrix (2..=25)
    #[arg(short = 'n', long)]
    pub cities: usize,

    /// Number of matrices
    #[arg(short = 'k', long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Seed for reproducible matrices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Smallest off-diagonal weight
    #[arg(long, default_value_t = 1)]
    pub min: Weight,

    /// Largest off-diagonal weight
    #[arg(long, default_value_t = 100)]
    pub max: Weight,
}

#[derive(Debug, Args)]
pub struct SolveArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub solve: SolveFlags,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Number of files to process
    #[arg(short = 'k', long)]
    pub count: usize,

    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Files solved concurrently, each with its own memo table
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,

    #[command(flatten)]
    pub solve: SolveFlags,
}

#[derive(Debug, Args)]
pub struct SolveFlags {
    /// Tour origin
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Print the optimal tour as well as its cost
    #[arg(long)]
    pub tour: bool,

    /// Cross-check against exhaustive enumeration (small inputs only)
    #[arg(long)]
    pub verify: bool,

    #[arg(long, value_enum, default_value_t = StrategyArg::TopDown)]
    pub strategy: StrategyArg,

    /// Machine-readable output
    #[arg(long)]
    pub json: bool,

    /// Refuse matrices whose memo table would exceed this many MiB
    #[arg(long, value_name = "MIB")]
    pub max_table_mib: Option<usize>,
}

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Directory for generated and batch-solved files
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    TopDown,
    BottomUp,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::TopDown => Strategy::TopDown,
            StrategyArg::BottomUp => Strategy::BottomUp,
        }
    }
}
