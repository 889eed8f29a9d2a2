//! Exhaustive reference solver.
//!
//! Walks every ordering of the non-start cities in lexicographic order and
//! keeps the first cheapest cycle. `(n-1)!` tours, so only usable on tiny
//! instances; its job is to be obviously correct.

use held_karp_core::{Cost, DistanceMatrix, Error, Result, Tour};

/// Largest instance accepted: 9! = 362 880 orderings.
pub const BRUTE_FORCE_LIMIT: usize = 10;

pub fn solve(matrix: &DistanceMatrix, start: usize) -> Result<Tour> {
    let n = matrix.n();
    if n > BRUTE_FORCE_LIMIT {
        return Err(Error::invalid_input(format!(
            "brute force is limited to {BRUTE_FORCE_LIMIT} cities, got {n}"
        )));
    }
    if start >= n {
        return Err(Error::invalid_input(format!(
            "start city {start} out of range for {n} cities"
        )));
    }

    let mut rest: Vec<usize> = (0..n).filter(|&c| c != start).collect();
    let mut best: Option<Tour> = None;

    loop {
        let cost = cycle_cost(matrix, start, &rest);
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            let mut cities = Vec::with_capacity(n);
            cities.push(start);
            cities.extend_from_slice(&rest);
            best = Some(Tour::new(cities, cost));
        }
        if !next_permutation(&mut rest) {
            break;
        }
    }

    best.ok_or_else(|| Error::unsolvable("no ordering enumerated"))
}

/// Number of cycles [`solve`] examines for `n` cities.
pub fn tours_examined(n: usize) -> u64 {
    (1..n as u64).product()
}

fn cycle_cost(matrix: &DistanceMatrix, start: usize, rest: &[usize]) -> Cost {
    let mut total: Cost = 0;
    let mut pos = start;
    for &city in rest {
        total += Cost::from(matrix.get(pos, city));
        pos = city;
    }
    total + Cost::from(matrix.get(pos, start))
}

/// Rearranges `items` into the next lexicographic permutation. Returns
/// `false` (leaving `items` sorted ascending) once the last one is passed.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        items.reverse();
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
