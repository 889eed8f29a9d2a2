//! Naming convention shared by matrix generation and batch solving.

use std::path::{Path, PathBuf};

/// File name of the `index`-th matrix of a batch (1-based).
pub fn batch_file_name(index: usize) -> String {
    format!("matrix_{index}.txt")
}

pub fn batch_paths(dir: &Path, count: usize) -> Vec<PathBuf> {
    (1..=count).map(|i| dir.join(batch_file_name(i))).collect()
}
