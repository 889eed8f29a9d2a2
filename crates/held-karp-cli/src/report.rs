use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use held_karp_core::Cost;

/// Outcome of one solve, as shown to the user.
#[derive(Clone, Debug, Serialize)]
pub struct SolveReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub cities: usize,
    pub start: usize,
    pub cost: Cost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour: Option<Vec<usize>>,
    /// Wall-clock time of the solve call alone, loading excluded.
    pub elapsed_ns: u64,
    pub states: usize,
    pub memo_hits: usize,
    /// `Some` only when a brute-force cross-check ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "File: {}, Shortest path cost: {}, Execution time: {} ns",
                file.display(),
                self.cost,
                self.elapsed_ns
            )?,
            None => write!(
                f,
                "Shortest path cost: {}\nExecution time: {} ns",
                self.cost, self.elapsed_ns
            )?,
        }
        if let Some(tour) = &self.tour {
            write!(f, "\nTour:")?;
            for city in tour {
                write!(f, " {city} ->")?;
            }
            write!(f, " {}", self.start)?;
        }
        match self.verified {
            Some(true) => write!(f, "\nVerified by exhaustive search"),
            Some(false) => write!(f, "\nMISMATCH with exhaustive search"),
            None => Ok(()),
        }
    }
}

/// One line of a batch run: a report or the reason the file was skipped.
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    pub index: usize,
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SolveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for BatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.report, &self.error) {
            (Some(report), _) => write!(f, "{report}"),
            (None, Some(error)) => write!(
                f,
                "Skipping file: {} due to errors: {error}",
                self.file.display()
            ),
            (None, None) => write!(f, "File: {}, no result", self.file.display()),
        }
    }
}
