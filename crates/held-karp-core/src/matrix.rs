use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Smallest instance that forms a cycle.
pub const MIN_CITIES: usize = 2;
/// The DP table grows as `2^n * n`; past this it stops fitting in memory.
pub const MAX_CITIES: usize = 25;

/// Cost of a single edge.
pub type Weight = u32;
/// Sum of edge weights along a (partial) tour.
pub type Cost = u64;

/// Square matrix of edge weights, `get(i, j)` being the cost of travelling
/// from city `i` to city `j`.
///
/// Stored row-major in one flat buffer for cache locality. Construction
/// validates the shape, the city-count bounds and the zero diagonal, so a
/// value of this type is always a well-formed solver input. Symmetry is
/// not required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct DistanceMatrix {
    n: usize,
    weights: Vec<Weight>,
}

#[derive(Clone, Serialize, Deserialize)]
struct MatrixRepr {
    n: usize,
    weights: Vec<Weight>,
}

impl DistanceMatrix {
    pub fn new(n: usize, weights: Vec<Weight>) -> Result<Self> {
        check_city_count(n)?;
        if weights.len() != n * n {
            return Err(Error::invalid_input(format!(
                "expected {} weights for {n} cities, got {}",
                n * n,
                weights.len()
            )));
        }
        for city in 0..n {
            let w = weights[city * n + city];
            if w != 0 {
                return Err(Error::invalid_input(format!(
                    "diagonal entry ({city}, {city}) must be 0, got {w}"
                )));
            }
        }
        Ok(Self { n, weights })
    }

    pub fn from_rows<R: AsRef<[Weight]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut weights = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::invalid_input(format!(
                    "matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            weights.extend_from_slice(row);
        }
        Self::new(n, weights)
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn get(&self, from: usize, to: usize) -> Weight {
        self.weights[from * self.n + to]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.weights.chunks_exact(self.n)
    }

    pub fn as_slice(&self) -> &[Weight] {
        &self.weights
    }

    /// Cost of the closed cycle visiting `cities` in order and returning to
    /// the first one. `None` on overflow or an out-of-range city.
    pub fn cycle_cost(&self, cities: &[usize]) -> Option<Cost> {
        let (&first, _) = cities.split_first()?;
        let mut total: Cost = 0;
        for pair in cities.windows(2) {
            total = total.checked_add(self.edge(pair[0], pair[1])?)?;
        }
        let last = *cities.last()?;
        total.checked_add(self.edge(last, first)?)
    }

    fn edge(&self, from: usize, to: usize) -> Option<Cost> {
        (from < self.n && to < self.n).then(|| Cost::from(self.get(from, to)))
    }
}

pub(crate) fn check_city_count(n: usize) -> Result<()> {
    if (MIN_CITIES..=MAX_CITIES).contains(&n) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "number of cities must be between {MIN_CITIES} and {MAX_CITIES}, got {n}"
        )))
    }
}

impl TryFrom<MatrixRepr> for DistanceMatrix {
    type Error = Error;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Self::new(repr.n, repr.weights)
    }
}

impl From<DistanceMatrix> for MatrixRepr {
    fn from(matrix: DistanceMatrix) -> Self {
        Self {
            n: matrix.n,
            weights: matrix.weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_row_major_order() {
        let m = DistanceMatrix::from_rows(&[[0, 5, 9], [7, 0, 2], [4, 8, 0]]).unwrap();
        assert_eq!(m.n(), 3);
        assert_eq!(m.get(0, 1), 5);
        assert_eq!(m.get(1, 0), 7);
        assert_eq!(m.get(2, 1), 8);
        assert_eq!(m.rows().nth(1), Some(&[7, 0, 2][..]));
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn rejects_non_square_rows() {
        let err = DistanceMatrix::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("not square"));
    }

    #[test]
    fn rejects_city_count_out_of_bounds() {
        assert!(matches!(
            DistanceMatrix::new(1, vec![0]),
            Err(Error::InvalidInput(_))
        ));
        let n = MAX_CITIES + 1;
        assert!(matches!(
            DistanceMatrix::new(n, vec![0; n * n]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_zero_diagonal() {
        let err = DistanceMatrix::from_rows(&[[0, 1], [1, 3]]).unwrap_err();
        assert!(err.to_string().contains("diagonal entry (1, 1)"));
    }

    #[test]
    fn rejects_wrong_weight_count() {
        let err = DistanceMatrix::new(3, vec![0; 8]).unwrap_err();
        assert!(err.to_string().contains("expected 9 weights"));
    }

    #[test]
    fn cycle_cost_includes_return_edge() {
        let m = DistanceMatrix::from_rows(&[[0, 5], [7, 0]]).unwrap();
        assert_eq!(m.cycle_cost(&[0, 1]), Some(12));
        assert_eq!(m.cycle_cost(&[1, 0]), Some(12));
        assert_eq!(m.cycle_cost(&[0, 2]), None);
        assert_eq!(m.cycle_cost(&[]), None);
    }

    #[test]
    fn serde_rejects_invalid_matrix() {
        let json = r#"{"n":2,"weights":[0,1,1,5]}"#;
        assert!(serde_json::from_str::<DistanceMatrix>(json).is_err());

        let m = DistanceMatrix::from_rows(&[[0, 3], [4, 0]]).unwrap();
        let back: DistanceMatrix =
            serde_json::from_str(&serde_json::to_string(&m).unwrap()).unwrap();
        assert_eq!(back, m);
    }
}
