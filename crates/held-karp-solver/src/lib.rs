//! Exact TSP by the Held-Karp bitmask dynamic program.
//!
//! A state `(mask, pos)` means "standing on city `pos` having visited exactly
//! the cities in `mask`". Its value is the cheapest way to visit the rest and
//! return to the start:
//!
//! ```text
//! value(full, pos) = cost(pos, start)
//! value(mask, pos) = min over c not in mask of cost(pos, c) + value(mask | c, c)
//! ```
//!
//! The mask grows along every transition, so the states form a DAG and each
//! can be memoized once: `O(2^n * n)` states, `O(n)` work each.
//!
//! ```
//! use held_karp_core::DistanceMatrix;
//! use held_karp_solver::HeldKarpSolver;
//!
//! let matrix = DistanceMatrix::from_rows(&[[0, 5], [7, 0]]).unwrap();
//! let tour = HeldKarpSolver::new().tour_from_origin(&matrix).unwrap();
//! assert_eq!(tour.cost, 12);
//! assert_eq!(tour.cities, vec![0, 1]);
//! ```

mod context;
mod costs;
mod memo;
mod recurrence;

use log::debug;

use held_karp_core::{Cost, DistanceMatrix, Error, Result, Tour, MAX_CITIES, MIN_CITIES};

use context::SolveContext;

pub use context::SolveStats;
pub use costs::EdgeCosts;
pub use memo::INFINITY;

/// Order in which the memo table is filled. Both give identical results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Recursion from the start state, computing only what is asked for.
    #[default]
    TopDown,
    /// Sweep over every state, successors first.
    BottomUp,
}

/// Solver configuration. Holds no per-solve state: every call allocates and
/// drops its own memo table, so one solver can serve many threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeldKarpSolver {
    strategy: Strategy,
    table_limit: Option<usize>,
}

impl HeldKarpSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Refuse solves whose memo table would exceed `bytes`. Checked before
    /// allocating, as an overcommitting host accepts any reservation and
    /// only fails once the pages are touched.
    pub fn with_table_limit(mut self, bytes: usize) -> Self {
        self.table_limit = Some(bytes);
        self
    }

    /// Bytes the memo table takes for `n` cities, or `None` when that size
    /// is not representable.
    pub fn table_bytes(n: usize) -> Option<usize> {
        memo::MemoTable::bytes(n)
    }

    pub fn solve<C: EdgeCosts + ?Sized>(&self, costs: &C, start: usize) -> Result<Cost> {
        self.evaluate(costs, start).map(|(_, cost)| cost)
    }

    pub fn solve_tour<C: EdgeCosts + ?Sized>(&self, costs: &C, start: usize) -> Result<Tour> {
        self.solve_with_stats(costs, start).map(|(tour, _)| tour)
    }

    pub fn solve_with_stats<C: EdgeCosts + ?Sized>(
        &self,
        costs: &C,
        start: usize,
    ) -> Result<(Tour, SolveStats)> {
        let (ctx, cost) = self.evaluate(costs, start)?;
        let tour = ctx.reconstruct(cost)?;
        Ok((tour, ctx.stats))
    }

    pub fn solve_from_origin<C: EdgeCosts + ?Sized>(&self, costs: &C) -> Result<Cost> {
        self.solve(costs, 0)
    }

    pub fn tour_from_origin<C: EdgeCosts + ?Sized>(&self, costs: &C) -> Result<Tour> {
        self.solve_tour(costs, 0)
    }

    fn evaluate<'a, C: EdgeCosts + ?Sized>(
        &self,
        costs: &'a C,
        start: usize,
    ) -> Result<(SolveContext<'a, C>, Cost)> {
        let n = costs.cities();
        if !(MIN_CITIES..=MAX_CITIES).contains(&n) {
            return Err(Error::invalid_input(format!(
                "number of cities must be between {MIN_CITIES} and {MAX_CITIES}, got {n}"
            )));
        }
        if start >= n {
            return Err(Error::invalid_input(format!(
                "start city {start} out of range for {n} cities"
            )));
        }

        let bytes = Self::table_bytes(n).ok_or_else(|| {
            Error::invalid_input(format!("memo table for {n} cities does not fit in memory"))
        })?;
        if let Some(limit) = self.table_limit.filter(|&limit| bytes > limit) {
            return Err(Error::invalid_input(format!(
                "memo table for {n} cities needs {bytes} bytes, limit is {limit}"
            )));
        }

        debug!(
            "held-karp: n={n} start={start} strategy={:?} table={bytes} bytes",
            self.strategy
        );

        let mut ctx = SolveContext::new(costs, start)?;
        let raw = match self.strategy {
            Strategy::TopDown => ctx.top_down(ctx.start_mask, start)?,
            Strategy::BottomUp => ctx.bottom_up()?,
        };
        let cost = ctx.finish(raw)?;

        debug!(
            "held-karp: cost={cost} states={} memo_hits={}",
            ctx.stats.states, ctx.stats.memo_hits
        );
        Ok((ctx, cost))
    }
}

/// Optimal tour cost from city 0 with the default strategy.
pub fn solve(matrix: &DistanceMatrix) -> Result<Cost> {
    HeldKarpSolver::new().solve_from_origin(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Complete graph with some edges removed.
    struct Sparse {
        n: usize,
        missing: Vec<(usize, usize)>,
    }

    impl EdgeCosts for Sparse {
        fn cities(&self) -> usize {
            self.n
        }

        fn cost(&self, from: usize, to: usize) -> Option<Cost> {
            (!self.missing.contains(&(from, to))).then_some(1)
        }
    }

    #[test]
    fn rejects_start_out_of_range() {
        let m = DistanceMatrix::from_rows(&[[0, 1], [1, 0]]).unwrap();
        let err = HeldKarpSolver::new().solve(&m, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_city_count_out_of_bounds() {
        let tiny = Sparse { n: 1, missing: vec![] };
        assert!(matches!(
            HeldKarpSolver::new().solve(&tiny, 0),
            Err(Error::InvalidInput(_))
        ));
        let huge = Sparse { n: MAX_CITIES + 1, missing: vec![] };
        assert!(matches!(
            HeldKarpSolver::new().solve(&huge, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn table_size_is_none_past_usize() {
        assert_eq!(HeldKarpSolver::table_bytes(2), Some(2 * 2 * 9));
        assert_eq!(HeldKarpSolver::table_bytes(60), None);
        assert_eq!(HeldKarpSolver::table_bytes(70), None);
    }

    #[test]
    fn table_limit_is_checked_before_solving() {
        let m = DistanceMatrix::new(10, vec![0; 100]).unwrap();
        let needed = HeldKarpSolver::table_bytes(10).unwrap();

        let tight = HeldKarpSolver::new().with_table_limit(needed - 1);
        let err = tight.solve_from_origin(&m).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "{err}");

        let exact = HeldKarpSolver::with_strategy(Strategy::BottomUp).with_table_limit(needed);
        assert_eq!(exact.solve_from_origin(&m).unwrap(), 0);
    }

    #[test]
    fn missing_edges_route_around() {
        // 0 -> 1 is gone, so the tour has to be 0 -> 2 -> 1 -> 0.
        let graph = Sparse { n: 3, missing: vec![(0, 1)] };
        for strategy in [Strategy::TopDown, Strategy::BottomUp] {
            let tour = HeldKarpSolver::with_strategy(strategy)
                .solve_tour(&graph, 0)
                .unwrap();
            assert_eq!(tour.cities, vec![0, 2, 1]);
            assert_eq!(tour.cost, 3);
        }
    }

    #[test]
    fn no_hamiltonian_cycle_is_unsolvable() {
        // Nothing leaves city 2 except back to itself.
        let graph = Sparse {
            n: 3,
            missing: vec![(2, 0), (2, 1)],
        };
        for strategy in [Strategy::TopDown, Strategy::BottomUp] {
            let err = HeldKarpSolver::with_strategy(strategy)
                .solve(&graph, 0)
                .unwrap_err();
            assert!(matches!(err, Error::Unsolvable(_)), "{err}");
        }
    }

    #[test]
    fn stats_report_table_size() {
        let m = DistanceMatrix::from_rows(&[[0, 2, 9], [1, 0, 6], [15, 7, 0]]).unwrap();
        let (tour, stats) = HeldKarpSolver::new().solve_with_stats(&m, 0).unwrap();
        assert_eq!(tour.cost, 9 + 7 + 1);
        assert_eq!(tour.cities, vec![0, 2, 1]);
        assert_eq!(Some(stats.table_bytes), HeldKarpSolver::table_bytes(3));
        // (0b001, 0), (0b011, 1), (0b101, 2)
        assert_eq!(stats.states, 3);
    }
}
