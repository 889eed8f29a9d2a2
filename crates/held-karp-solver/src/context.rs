use held_karp_core::{Cost, Error, Result, Tour};

use crate::costs::EdgeCosts;
use crate::memo::{MemoTable, INFINITY};

/// Counters gathered while filling the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Entries written to the memo table.
    pub states: usize,
    /// Lookups answered from the table instead of recomputed.
    pub memo_hits: usize,
    pub table_bytes: usize,
}

/// State of a single solve: borrowed costs, the memo table it owns, and the
/// masks derived from the city count.
pub(crate) struct SolveContext<'a, C: ?Sized> {
    pub costs: &'a C,
    pub n: usize,
    pub start: usize,
    pub start_mask: u32,
    pub full_mask: u32,
    pub table: MemoTable,
    pub stats: SolveStats,
}

impl<'a, C: EdgeCosts + ?Sized> SolveContext<'a, C> {
    pub fn new(costs: &'a C, start: usize) -> Result<Self> {
        let n = costs.cities();
        let table = MemoTable::new(n, start)?;
        Ok(Self {
            costs,
            n,
            start,
            start_mask: 1 << start,
            full_mask: (1u32 << n) - 1,
            stats: SolveStats {
                table_bytes: table.allocated_bytes(),
                ..SolveStats::default()
            },
            table,
        })
    }

    /// Follow the recorded choices forward from the start state.
    pub fn reconstruct(&self, cost: Cost) -> Result<Tour> {
        let mut cities = Vec::with_capacity(self.n);
        let mut mask = self.start_mask;
        let mut pos = self.start;
        cities.push(pos);

        while mask != self.full_mask {
            let slot = self.table.slot(mask, pos);
            let next = self.table.next(slot).ok_or_else(|| {
                Error::unsolvable(format!(
                    "no recorded successor for state (mask {mask:#b}, city {pos})"
                ))
            })?;
            mask |= 1 << next;
            pos = next;
            cities.push(pos);
        }

        Ok(Tour::new(cities, cost))
    }

    pub fn finish(&self, cost: Cost) -> Result<Cost> {
        if cost >= INFINITY {
            return Err(Error::unsolvable(format!(
                "no Hamiltonian cycle through {} cities from city {}",
                self.n, self.start
            )));
        }
        Ok(cost)
    }
}
