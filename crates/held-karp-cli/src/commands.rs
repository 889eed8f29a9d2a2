use std::fs;
use std::io::{self, Write};

use log::info;

use held_karp_core::batch::{batch_file_name, batch_paths};
use held_karp_core::io::{format_matrix, load_matrix, save_matrix};
use held_karp_core::{Error, MatrixGenerator, Result};

use crate::batch::{run_batch, summarize};
use crate::options::{BatchArgs, Command, GenerateArgs, MenuArgs, SolveArgs, SolveFlags};
use crate::run::{solve_file, SolveOptions};
use crate::session::Session;

pub fn run(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Generate(args) => generate(&args, out),
        Command::Show { file } => {
            let matrix = load_matrix(&file)?;
            write!(out, "{}", format_matrix(&matrix))?;
            Ok(())
        }
        Command::Solve(args) => solve(&args, out),
        Command::Batch(args) => batch(&args, out),
        Command::Menu(args) => menu(&args),
    }
}

/// Exit status for a failed command: 2 for bad input (malformed file,
/// city count out of range), 1 for everything else.
pub fn exit_status(err: &Error) -> u8 {
    if err.is_input_error() {
        2
    } else {
        1
    }
}

impl From<&SolveFlags> for SolveOptions {
    fn from(flags: &SolveFlags) -> Self {
        Self {
            start: flags.start,
            strategy: flags.strategy.into(),
            tour: flags.tour,
            verify: flags.verify,
            table_limit: flags
                .max_table_mib
                .map(|mib| mib.saturating_mul(1 << 20)),
        }
    }
}

fn generate(args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
    let range = args.min..=args.max;
    let mut generator = match args.seed {
        Some(seed) => MatrixGenerator::seeded(range, seed)?,
        None => MatrixGenerator::from_entropy(range)?,
    };
    fs::create_dir_all(&args.dir).map_err(|e| Error::io(&args.dir, e))?;

    for i in 1..=args.count {
        let matrix = generator.generate(args.cities)?;
        let path = args.dir.join(batch_file_name(i));
        save_matrix(&path, &matrix)?;
        writeln!(out, "Matrix saved to file: {}", path.display())?;
    }
    writeln!(out, "{} matrices generated and saved to files.", args.count)?;
    Ok(())
}

fn solve(args: &SolveArgs, out: &mut impl Write) -> Result<()> {
    let report = solve_file(&args.file, &SolveOptions::from(&args.solve))?;
    if args.solve.json {
        serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{report}")?;
    }
    Ok(())
}

fn batch(args: &BatchArgs, out: &mut impl Write) -> Result<()> {
    let paths = batch_paths(&args.dir, args.count);
    let items = run_batch(&paths, &SolveOptions::from(&args.solve), args.jobs);
    let records: Vec<_> = items.iter().map(|item| item.to_record()).collect();

    if args.solve.json {
        serde_json::to_writer_pretty(&mut *out, &records).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        for record in &records {
            writeln!(out, "{record}")?;
        }
    }

    let (solved, failed) = summarize(&items);
    info!("batch finished: {solved} solved, {failed} skipped");
    if !args.solve.json {
        writeln!(out, "{solved} solved, {failed} skipped")?;
    }
    Ok(())
}

fn menu(args: &MenuArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), args.dir.clone()).run()
}
