use std::path::Path;
use std::time::Instant;

use log::{debug, error, warn};

use held_karp_brute_force::{tours_examined, BRUTE_FORCE_LIMIT};
use held_karp_core::{io::load_matrix, Cost, DistanceMatrix, Result};
use held_karp_solver::{HeldKarpSolver, Strategy};

use crate::report::SolveReport;

#[derive(Clone, Copy, Debug, Default)]
pub struct SolveOptions {
    pub start: usize,
    pub strategy: Strategy,
    pub tour: bool,
    pub verify: bool,
    /// Largest memo table, in bytes, a solve may allocate.
    pub table_limit: Option<usize>,
}

pub fn solve_matrix(
    matrix: &DistanceMatrix,
    file: Option<&Path>,
    options: &SolveOptions,
) -> Result<SolveReport> {
    let mut solver = HeldKarpSolver::with_strategy(options.strategy);
    if let Some(limit) = options.table_limit {
        solver = solver.with_table_limit(limit);
    }

    let started = Instant::now();
    let (tour, stats) = solver.solve_with_stats(matrix, options.start)?;
    let elapsed = started.elapsed();

    let verified = options
        .verify
        .then(|| verify(matrix, options.start, tour.cost))
        .flatten();

    Ok(SolveReport {
        file: file.map(Path::to_path_buf),
        cities: matrix.n(),
        start: options.start,
        cost: tour.cost,
        tour: options.tour.then_some(tour.cities),
        elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        states: stats.states,
        memo_hits: stats.memo_hits,
        verified,
    })
}

pub fn solve_file(path: &Path, options: &SolveOptions) -> Result<SolveReport> {
    let matrix = load_matrix(path)?;
    solve_matrix(&matrix, Some(path), options)
}

fn verify(matrix: &DistanceMatrix, start: usize, cost: Cost) -> Option<bool> {
    let n = matrix.n();
    if n > BRUTE_FORCE_LIMIT {
        warn!("skipping verification: {n} cities, brute-force limit is {BRUTE_FORCE_LIMIT}");
        return None;
    }
    debug!("verifying against {} orderings", tours_examined(n));
    match held_karp_brute_force::solve(matrix, start) {
        Ok(reference) => {
            if reference.cost != cost {
                error!(
                    "dp cost {cost} differs from exhaustive optimum {}",
                    reference.cost
                );
            }
            Some(reference.cost == cost)
        }
        Err(err) => {
            warn!("verification failed to run: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_cost_tour_and_verification() {
        let m = DistanceMatrix::from_rows(&[[0, 2, 9], [1, 0, 6], [15, 7, 0]]).unwrap();
        let options = SolveOptions {
            tour: true,
            verify: true,
            ..SolveOptions::default()
        };
        let report = solve_matrix(&m, None, &options).unwrap();
        assert_eq!(report.cost, 17);
        assert_eq!(report.tour, Some(vec![0, 2, 1]));
        assert_eq!(report.verified, Some(true));
        assert_eq!(report.cities, 3);
    }

    #[test]
    fn table_limit_rejects_before_solving() {
        let mut weights = vec![1; 144];
        for i in 0..12 {
            weights[i * 12 + i] = 0;
        }
        let m = DistanceMatrix::new(12, weights).unwrap();
        let options = SolveOptions {
            table_limit: Some(1 << 16),
            ..SolveOptions::default()
        };
        let err = solve_matrix(&m, None, &options).unwrap_err();
        assert!(err.is_input_error(), "{err}");
    }

    #[test]
    fn verification_is_skipped_above_the_limit() {
        let n = BRUTE_FORCE_LIMIT + 1;
        let m = DistanceMatrix::new(n, vec![0; n * n]).unwrap();
        let options = SolveOptions {
            verify: true,
            ..SolveOptions::default()
        };
        let report = solve_matrix(&m, None, &options).unwrap();
        assert_eq!(report.cost, 0);
        assert_eq!(report.verified, None);
        assert_eq!(report.tour, None);
    }
}
