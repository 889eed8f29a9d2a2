use std::collections::TryReserveError;
use std::mem::size_of;

use held_karp_core::{Cost, Error, Result};

/// No completion found (yet). Strictly above every real tour cost.
pub const INFINITY: Cost = Cost::MAX - 1;
/// Slot not evaluated. Distinct from `INFINITY` and from every real cost.
pub(crate) const UNKNOWN: Cost = Cost::MAX;
const NO_CHOICE: u8 = u8::MAX;

/// Flat `(mask, pos) -> cost` table, one per solve.
///
/// Every reachable mask contains the start bit, so it is dropped before
/// indexing: `2^(n-1)` compressed masks times `n` positions. Alongside each
/// cost the table keeps the next city that achieved it.
pub(crate) struct MemoTable {
    n: usize,
    start: usize,
    costs: Vec<Cost>,
    next: Vec<u8>,
}

impl MemoTable {
    /// `None` when `n` is zero or the count does not fit in `usize`.
    pub fn entries(n: usize) -> Option<usize> {
        let shift = u32::try_from(n.checked_sub(1)?).ok()?;
        1usize.checked_shl(shift)?.checked_mul(n)
    }

    pub fn bytes(n: usize) -> Option<usize> {
        Self::entries(n)?.checked_mul(size_of::<Cost>() + size_of::<u8>())
    }

    pub fn new(n: usize, start: usize) -> Result<Self> {
        let len = Self::entries(n).ok_or_else(|| {
            Error::invalid_input(format!("memo table for {n} cities does not fit in memory"))
        })?;
        let alloc_error = |e: TryReserveError| {
            Error::invalid_input(format!(
                "cannot allocate memo table for {n} cities ({len} entries): {e}"
            ))
        };

        let mut costs = Vec::new();
        costs.try_reserve_exact(len).map_err(alloc_error)?;
        costs.resize(len, UNKNOWN);

        let mut next = Vec::new();
        next.try_reserve_exact(len).map_err(alloc_error)?;
        next.resize(len, NO_CHOICE);

        Ok(Self {
            n,
            start,
            costs,
            next,
        })
    }

    pub fn allocated_bytes(&self) -> usize {
        self.costs.len() * size_of::<Cost>() + self.next.len() * size_of::<u8>()
    }

    #[inline(always)]
    pub fn slot(&self, mask: u32, pos: usize) -> usize {
        let low = mask & ((1u32 << self.start) - 1);
        let high = (mask >> (self.start + 1)) << self.start;
        (low | high) as usize * self.n + pos
    }

    #[inline(always)]
    pub fn get(&self, slot: usize) -> Option<Cost> {
        let cost = self.costs[slot];
        (cost != UNKNOWN).then_some(cost)
    }

    #[inline(always)]
    pub fn set(&mut self, slot: usize, cost: Cost, next: Option<usize>) {
        debug_assert_eq!(self.costs[slot], UNKNOWN, "memo entries are write-once");
        self.costs[slot] = cost;
        self.next[slot] = next.map_or(NO_CHOICE, |city| city as u8);
    }

    pub fn next(&self, slot: usize) -> Option<usize> {
        let city = self.next[slot];
        (city != NO_CHOICE).then_some(city as usize)
    }

    #[cfg(test)]
    pub fn forget(&mut self, slot: usize) {
        self.costs[slot] = UNKNOWN;
        self.next[slot] = NO_CHOICE;
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<(Option<Cost>, Option<usize>)> {
        (0..self.costs.len())
            .map(|slot| (self.get(slot), self.next(slot)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_drops_the_start_bit() {
        let table = MemoTable::new(4, 2).unwrap();
        // 0b1110 -> 0b110 after removing bit 2
        assert_eq!(table.slot(0b1110, 1), 0b110 * 4 + 1);
        assert_eq!(table.slot(0b0100, 2), 2);
        assert_eq!(table.slot(0b1111, 3), 0b111 * 4 + 3);
    }

    #[test]
    fn slots_are_dense_and_unique() {
        let n = 5;
        for start in 0..n {
            let table = MemoTable::new(n, start).unwrap();
            let mut seen = vec![false; MemoTable::entries(n).unwrap()];
            for mask in 0u32..(1 << n) {
                if mask & (1 << start) == 0 {
                    continue;
                }
                for pos in 0..n {
                    let slot = table.slot(mask, pos);
                    assert!(!seen[slot], "slot {slot} reused");
                    seen[slot] = true;
                }
            }
            assert!(seen.into_iter().all(|s| s));
        }
    }

    #[test]
    fn sizes_saturate_to_none_instead_of_overflowing() {
        assert_eq!(MemoTable::entries(0), None);
        assert_eq!(MemoTable::entries(1), Some(1));
        assert_eq!(MemoTable::entries(4), Some(8 * 4));
        assert_eq!(MemoTable::bytes(25), Some((1 << 24) * 25 * 9));
        assert_eq!(MemoTable::entries(60), None);
        assert_eq!(MemoTable::bytes(60), None);
        assert_eq!(MemoTable::entries(70), None);
        assert_eq!(MemoTable::entries(usize::MAX), None);
    }

    #[test]
    fn allocation_matches_reported_size() {
        let table = MemoTable::new(6, 3).unwrap();
        assert_eq!(Some(table.allocated_bytes()), MemoTable::bytes(6));
    }

    #[test]
    fn unknown_is_distinct_from_infinity() {
        let mut table = MemoTable::new(3, 0).unwrap();
        assert_eq!(table.get(0), None);
        table.set(0, INFINITY, None);
        assert_eq!(table.get(0), Some(INFINITY));
        assert_eq!(table.next(0), None);
        table.set(1, 17, Some(2));
        assert_eq!(table.next(1), Some(2));
    }
}
