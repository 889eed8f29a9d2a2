use std::path::PathBuf;
use std::thread;

use crossbeam_channel::unbounded;
use log::{debug, warn};

use held_karp_core::Result;

use crate::report::{BatchRecord, SolveReport};
use crate::run::{solve_file, SolveOptions};

/// One file of a batch and what happened to it.
#[derive(Debug)]
pub struct BatchItem {
    /// 1-based position in the batch.
    pub index: usize,
    pub path: PathBuf,
    pub outcome: Result<SolveReport>,
}

impl BatchItem {
    pub fn to_record(&self) -> BatchRecord {
        let (report, error) = match &self.outcome {
            Ok(report) => (Some(report.clone()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        BatchRecord {
            index: self.index,
            file: self.path.clone(),
            report,
            error,
        }
    }
}

/// Solves every file independently and returns the outcomes in input order.
///
/// A file that fails to load, parse or solve yields an `Err` outcome and the
/// batch carries on. With `jobs > 1` files are handed to a pool of worker
/// threads over a channel; each solve still owns its own memo table.
pub fn run_batch(paths: &[PathBuf], options: &SolveOptions, jobs: usize) -> Vec<BatchItem> {
    let jobs = jobs.clamp(1, paths.len().max(1));
    if jobs == 1 {
        return paths
            .iter()
            .enumerate()
            .map(|(i, path)| solve_item(i + 1, path.clone(), options))
            .collect();
    }

    let (job_tx, job_rx) = unbounded::<(usize, PathBuf)>();
    let (done_tx, done_rx) = unbounded::<BatchItem>();

    for (i, path) in paths.iter().enumerate() {
        if job_tx.send((i + 1, path.clone())).is_err() {
            break;
        }
    }
    drop(job_tx);

    thread::scope(|scope| {
        for worker in 0..jobs {
            let job_rx = job_rx.clone();
            let done_tx = done_tx.clone();
            scope.spawn(move || {
                for (index, path) in job_rx.iter() {
                    debug!("worker {worker}: solving {}", path.display());
                    if done_tx.send(solve_item(index, path, options)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(done_tx);

    let mut items: Vec<BatchItem> = done_rx.iter().collect();
    items.sort_by_key(|item| item.index);
    items
}

fn solve_item(index: usize, path: PathBuf, options: &SolveOptions) -> BatchItem {
    let outcome = solve_file(&path, options);
    if let Err(err) = &outcome {
        warn!("skipping file: {} due to errors: {err}", path.display());
    }
    BatchItem {
        index,
        path,
        outcome,
    }
}

/// Counts of solved and skipped files.
pub fn summarize(items: &[BatchItem]) -> (usize, usize) {
    let solved = items.iter().filter(|item| item.outcome.is_ok()).count();
    (solved, items.len() - solved)
}
