//! Front end for the `held-karp` binary.
//!
//! Everything here is glue around [`held_karp_solver`]: reading and writing
//! matrix files, timing solves, running batches without letting one bad file
//! stop the rest, and the interactive menu.

pub mod batch;
pub mod commands;
pub mod logging;
pub mod options;
pub mod report;
pub mod run;
pub mod session;

pub use batch::{run_batch, BatchItem};
pub use options::Cli;
pub use report::SolveReport;
pub use run::{solve_file, solve_matrix, SolveOptions};
pub use session::Session;
