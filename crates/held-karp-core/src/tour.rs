use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matrix::{Cost, DistanceMatrix};

/// A closed tour: `cities` starts at the origin and lists every city once;
/// the edge back to the origin is implied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub cities: Vec<usize>,
    pub cost: Cost,
}

impl Tour {
    pub fn new(cities: Vec<usize>, cost: Cost) -> Self {
        Self { cities, cost }
    }

    pub fn origin(&self) -> Option<usize> {
        self.cities.first().copied()
    }

    /// True when the tour visits each of the matrix's cities exactly once and
    /// its recorded cost matches the edges it walks.
    pub fn is_consistent_with(&self, matrix: &DistanceMatrix) -> bool {
        let n = matrix.n();
        if self.cities.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.cities {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        matrix.cycle_cost(&self.cities) == Some(self.cost)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for city in &self.cities {
            write!(f, "{city} -> ")?;
        }
        match self.origin() {
            Some(origin) => write!(f, "{origin}"),
            None => Ok(()),
        }
    }
}
