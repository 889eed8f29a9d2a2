//! Shared types for exact TSP over small complete graphs.
//!
//! Everything a solver borrows ([`DistanceMatrix`]) or hands back ([`Tour`],
//! [`Cost`]) lives here, together with the error kinds used across the
//! workspace and the collaborators that feed matrices in: the text file
//! format ([`io`]), random generation ([`generate`]) and the batch file
//! naming convention ([`batch`]).

pub mod batch;
mod error;
pub mod generate;
pub mod io;
mod matrix;
mod tour;

pub use error::{Error, Result};
pub use generate::MatrixGenerator;
pub use matrix::{Cost, DistanceMatrix, Weight, MAX_CITIES, MIN_CITIES};
pub use tour::Tour;
