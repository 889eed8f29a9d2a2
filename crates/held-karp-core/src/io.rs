//! Plain-text matrix files.
//!
//! The format is a flat list of integers: the city count `n`, then `n * n`
//! weights in row-major order. Writers put `n` on its own line followed by
//! one line per row; readers only care about whitespace-separated tokens,
//! so line breaks inside the weight list are not significant.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::matrix::{DistanceMatrix, Weight, MAX_CITIES, MIN_CITIES};
use crate::{Error, Result};

pub fn parse_matrix(text: &str) -> Result<DistanceMatrix> {
    let mut tokens = text.split_whitespace();

    let n_token = tokens
        .next()
        .ok_or_else(|| Error::parse("empty input: missing number of cities"))?;
    let n: usize = n_token
        .parse()
        .map_err(|_| Error::parse(format!("invalid number of cities: {n_token}")))?;
    if !(MIN_CITIES..=MAX_CITIES).contains(&n) {
        return Err(Error::parse(format!(
            "invalid number of cities {n}: must be between {MIN_CITIES} and {MAX_CITIES}"
        )));
    }

    let mut weights = Vec::with_capacity(n * n);
    for idx in 0..n * n {
        let (row, col) = (idx / n, idx % n);
        let token = tokens.next().ok_or_else(|| {
            Error::parse(format!(
                "expected {} weights, found {idx} (missing row {row}, column {col})",
                n * n
            ))
        })?;
        weights.push(parse_weight(token, row, col)?);
    }

    if tokens.next().is_some() {
        debug!("ignoring trailing tokens after {}x{} matrix", n, n);
    }

    DistanceMatrix::new(n, weights)
}

fn parse_weight(token: &str, row: usize, col: usize) -> Result<Weight> {
    if let Ok(value) = token.parse::<Weight>() {
        return Ok(value);
    }
    match token.parse::<i64>() {
        Ok(value) if value < 0 => Err(Error::invalid_input(format!(
            "negative weight {value} at row {row}, column {col}"
        ))),
        Ok(value) => Err(Error::parse(format!(
            "weight {value} at row {row}, column {col} exceeds {}",
            Weight::MAX
        ))),
        Err(_) => Err(Error::parse(format!(
            "invalid weight '{token}' at row {row}, column {col}"
        ))),
    }
}

pub fn serialize_matrix(matrix: &DistanceMatrix) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", matrix.n());
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(Weight::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn load_matrix(path: impl AsRef<Path>) -> Result<DistanceMatrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let matrix = parse_matrix(&text)?;
    debug!("loaded {}x{} matrix from {}", matrix.n(), matrix.n(), path.display());
    Ok(matrix)
}

pub fn save_matrix(path: impl AsRef<Path>, matrix: &DistanceMatrix) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serialize_matrix(matrix)).map_err(|e| Error::io(path, e))?;
    info!("matrix saved to file: {}", path.display());
    Ok(())
}

/// Right-aligned, width-4 columns for console display.
pub fn format_matrix(matrix: &DistanceMatrix) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for w in row {
            let _ = write!(out, "{w:>4} ");
        }
        out.push('\n');
    }
    out
}
