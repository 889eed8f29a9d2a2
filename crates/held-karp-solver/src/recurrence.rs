use held_karp_core::{Cost, Error, Result};

use crate::context::SolveContext;
use crate::costs::EdgeCosts;
use crate::memo::INFINITY;

/// `edge + rest`, saturating to `INFINITY` instead of wrapping.
#[inline(always)]
fn extend(edge: Cost, rest: Cost) -> Cost {
    if rest >= INFINITY {
        return INFINITY;
    }
    edge.checked_add(rest)
        .filter(|&total| total < INFINITY)
        .unwrap_or(INFINITY)
}

impl<C: EdgeCosts + ?Sized> SolveContext<'_, C> {
    /// Cost of closing the cycle from `pos` back to the start.
    #[inline(always)]
    fn closing(&self, pos: usize) -> Cost {
        self.costs
            .cost(pos, self.start)
            .filter(|&c| c < INFINITY)
            .unwrap_or(INFINITY)
    }

    /// Best completion of `(mask, pos)` over every unvisited city, scanned in
    /// index order so the first strict minimum wins. `child` yields the value
    /// of the successor state. The result is written to the table.
    fn relax<F>(&mut self, mask: u32, pos: usize, mut child: F) -> Result<Cost>
    where
        F: FnMut(&mut Self, u32, usize) -> Result<Cost>,
    {
        let mut best = INFINITY;
        let mut choice = None;
        let mut open = false;

        for city in 0..self.n {
            let bit = 1u32 << city;
            if mask & bit != 0 {
                continue;
            }
            open = true;
            let Some(edge) = self.costs.cost(pos, city) else {
                continue;
            };
            let candidate = extend(edge, child(self, mask | bit, city)?);
            if candidate < best {
                best = candidate;
                choice = Some(city);
            }
        }

        if !open {
            return Err(Error::unsolvable(format!(
                "state (mask {mask:#b}, city {pos}) is not complete but has no unvisited city"
            )));
        }

        let slot = self.table.slot(mask, pos);
        self.table.set(slot, best, choice);
        self.stats.states += 1;
        Ok(best)
    }

    /// Recursive evaluation with memo short-circuit. The mask grows on every
    /// call, so recursion depth is bounded by `n`.
    pub fn top_down(&mut self, mask: u32, pos: usize) -> Result<Cost> {
        if mask == self.full_mask {
            return Ok(self.closing(pos));
        }
        if let Some(cost) = self.table.get(self.table.slot(mask, pos)) {
            self.stats.memo_hits += 1;
            return Ok(cost);
        }
        self.relax(mask, pos, |ctx, next_mask, city| ctx.top_down(next_mask, city))
    }

    /// Iterative evaluation. Successors of a state always have a numerically
    /// larger mask, so sweeping masks in decreasing order finalizes every
    /// state after all of its successors.
    pub fn bottom_up(&mut self) -> Result<Cost> {
        for mask in (self.start_mask..self.full_mask).rev() {
            if mask & self.start_mask == 0 {
                continue;
            }
            for pos in 0..self.n {
                if mask & (1 << pos) == 0 {
                    continue;
                }
                // Only the initial state stands on the start city.
                if pos == self.start && mask != self.start_mask {
                    continue;
                }
                self.relax(mask, pos, |ctx, next_mask, city| {
                    ctx.finalized(next_mask, city)
                })?;
            }
        }
        self.finalized(self.start_mask, self.start)
    }

    fn finalized(&self, mask: u32, pos: usize) -> Result<Cost> {
        if mask == self.full_mask {
            return Ok(self.closing(pos));
        }
        self.table
            .get(self.table.slot(mask, pos))
            .ok_or_else(|| {
                Error::unsolvable(format!(
                    "state (mask {mask:#b}, city {pos}) read before it was evaluated"
                ))
            })
    }
}
