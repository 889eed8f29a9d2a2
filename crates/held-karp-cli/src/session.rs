//! Interactive menu.
//!
//! A [`Session`] owns the current matrix: generating or loading replaces it,
//! displaying and solving only read it. Input and output are generic so the
//! loop can be driven from a script.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use held_karp_core::batch::{batch_file_name, batch_paths};
use held_karp_core::generate::DEFAULT_WEIGHTS;
use held_karp_core::io::{format_matrix, load_matrix, save_matrix};
use held_karp_core::{DistanceMatrix, MatrixGenerator, Result, MAX_CITIES, MIN_CITIES};

use crate::batch::run_batch;
use crate::run::{solve_matrix, SolveOptions};

const NO_MATRIX: &str = "No distance matrix available. Please generate or load one first.";

pub struct Session<R, W> {
    input: R,
    output: W,
    dir: PathBuf,
    matrix: Option<DistanceMatrix>,
    seed: Option<u64>,
    options: SolveOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            dir: dir.into(),
            matrix: None,
            seed: None,
            options: SolveOptions {
                tour: true,
                ..SolveOptions::default()
            },
        }
    }

    /// Makes generated matrices reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.matrix.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            match choice.parse::<u32>() {
                Ok(1) => self.generate()?,
                Ok(2) => self.load()?,
                Ok(3) => self.display()?,
                Ok(4) => self.solve()?,
                Ok(5) => self.solve_many()?,
                Ok(6) => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        write!(
            self.output,
            "\n=== Traveling Salesman Problem (TSP) ===\n\
             1. Generate random distance matrix\n\
             2. Load distance matrix from file\n\
             3. Display distance matrix\n\
             4. Solve TSP\n\
             5. Solve TSP (Multiple files, only generated one)\n\
             6. Exit\n\
             Select an option: "
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn prompt_number(&mut self, question: &str) -> Result<Option<usize>> {
        Ok(self.prompt(question)?.and_then(|answer| answer.parse().ok()))
    }

    fn generate(&mut self) -> Result<()> {
        let question = format!("Enter the number of cities (max {MAX_CITIES}): ");
        let cities = match self.prompt_number(&question)? {
            Some(n) if (MIN_CITIES..=MAX_CITIES).contains(&n) => n,
            _ => {
                writeln!(
                    self.output,
                    "Invalid number of cities! Must be between {MIN_CITIES} and {MAX_CITIES}."
                )?;
                return Ok(());
            }
        };
        let Some(count) = self.prompt_number("Enter the number of matrices to generate: ")? else {
            writeln!(self.output, "Invalid number of matrices.")?;
            return Ok(());
        };

        let mut generator = match self.seed {
            Some(seed) => MatrixGenerator::seeded(DEFAULT_WEIGHTS, seed)?,
            None => MatrixGenerator::from_entropy(DEFAULT_WEIGHTS)?,
        };
        for i in 1..=count {
            let matrix = generator.generate(cities)?;
            let path = self.dir.join(batch_file_name(i));
            if let Err(err) = save_matrix(&path, &matrix) {
                writeln!(self.output, "Error: {err}")?;
                return Ok(());
            }
            writeln!(self.output, "Matrix saved to file: {}", path.display())?;
            self.matrix = Some(matrix);
        }
        writeln!(self.output, "{count} matrices generated and saved to files.")?;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter filename: ")? else {
            return Ok(());
        };
        let path = self.dir.join(Path::new(&name));
        match load_matrix(&path) {
            Ok(matrix) => {
                self.matrix = Some(matrix);
                writeln!(self.output, "Distance matrix loaded successfully.")?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        match &self.matrix {
            Some(matrix) => write!(
                self.output,
                "\nCurrent distance matrix:\n{}",
                format_matrix(matrix)
            )?,
            None => writeln!(self.output, "{NO_MATRIX}")?,
        }
        Ok(())
    }

    fn solve(&mut self) -> Result<()> {
        let Some(matrix) = &self.matrix else {
            writeln!(self.output, "{NO_MATRIX}")?;
            return Ok(());
        };
        match solve_matrix(matrix, None, &self.options) {
            Ok(report) => writeln!(self.output, "\n{report}")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn solve_many(&mut self) -> Result<()> {
        let Some(count) = self.prompt_number("Enter the number of files to process: ")? else {
            writeln!(self.output, "Invalid number of files.")?;
            return Ok(());
        };
        let options = SolveOptions {
            tour: false,
            ..self.options
        };
        for item in run_batch(&batch_paths(&self.dir, count), &options, 1) {
            writeln!(self.output, "{}", item.to_record())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str, dir: &Path) -> (String, Option<DistanceMatrix>) {
        let mut session = Session::new(script.as_bytes(), Vec::new(), dir).with_seed(5);
        session.run().unwrap();
        let matrix = session.matrix().cloned();
        (String::from_utf8(session.into_output()).unwrap(), matrix)
    }

    #[test]
    fn display_and_solve_without_matrix() {
        let (out, matrix) = run_script("3\n4\n6\n", Path::new("."));
        assert_eq!(out.matches(NO_MATRIX).count(), 2);
        assert!(out.ends_with("Exiting program. Goodbye!\n"));
        assert!(matrix.is_none());
    }

    #[test]
    fn invalid_choices_reprompt() {
        let (out, _) = run_script("9\nabc\n", Path::new("."));
        assert_eq!(out.matches("Invalid option. Please try again.").count(), 2);
        assert_eq!(out.matches("Select an option: ").count(), 3);
    }

    #[test]
    fn out_of_range_city_count_is_rejected() {
        let (out, matrix) = run_script("1\n30\n6\n", Path::new("."));
        assert!(out.contains("Invalid number of cities! Must be between 2 and 25."));
        assert!(matrix.is_none());
    }

    #[test]
    fn missing_file_keeps_previous_state() {
        let (out, matrix) = run_script("2\ndefinitely-missing.txt\n", Path::new("."));
        assert!(out.contains("Error: failed to access"));
        assert!(matrix.is_none());
    }
}
