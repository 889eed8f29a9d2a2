use std::ops::RangeInclusive;

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::matrix::{check_city_count, DistanceMatrix, Weight};
use crate::{Error, Result};

pub const DEFAULT_WEIGHTS: RangeInclusive<Weight> = 1..=100;

/// Random complete graphs: zero diagonal, every other entry drawn
/// independently and uniformly from an inclusive weight range.
pub struct MatrixGenerator {
    weights: Uniform<Weight>,
    rng: Xoshiro256PlusPlus,
}

impl MatrixGenerator {
    pub fn from_entropy(range: RangeInclusive<Weight>) -> Result<Self> {
        Ok(Self {
            weights: uniform(range)?,
            rng: Xoshiro256PlusPlus::from_entropy(),
        })
    }

    /// Reproducible stream: the same seed yields the same matrices.
    pub fn seeded(range: RangeInclusive<Weight>, seed: u64) -> Result<Self> {
        Ok(Self {
            weights: uniform(range)?,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    pub fn generate(&mut self, n: usize) -> Result<DistanceMatrix> {
        check_city_count(n)?;
        let mut weights = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                weights.push(if i == j {
                    0
                } else {
                    self.weights.sample(&mut self.rng)
                });
            }
        }
        debug!("generated {n}x{n} matrix");
        DistanceMatrix::new(n, weights)
    }
}

fn uniform(range: RangeInclusive<Weight>) -> Result<Uniform<Weight>> {
    let (low, high) = range.into_inner();
    if low > high {
        return Err(Error::invalid_input(format!(
            "empty weight range {low}..={high}"
        )));
    }
    Ok(Uniform::new_inclusive(low, high))
}
