use held_karp_core::{Cost, DistanceMatrix};

/// Edge costs the recurrence reads from.
///
/// `cost` returns `None` for a missing edge. A [`DistanceMatrix`] is a
/// complete graph and never does, but sparse inputs plug in here and then
/// reach the unsolvable path instead of a bogus total.
pub trait EdgeCosts {
    fn cities(&self) -> usize;
    fn cost(&self, from: usize, to: usize) -> Option<Cost>;
}

impl EdgeCosts for DistanceMatrix {
    #[inline(always)]
    fn cities(&self) -> usize {
        self.n()
    }

    #[inline(always)]
    fn cost(&self, from: usize, to: usize) -> Option<Cost> {
        Some(Cost::from(self.get(from, to)))
    }
}
