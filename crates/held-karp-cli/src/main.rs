use std::io;
use std::process::ExitCode;

use clap::Parser;

use held_karp_cli::options::{Command, MenuArgs};
use held_karp_cli::{commands, logging, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logger(cli.log_level.to_filter()) {
        eprintln!("held-karp: {err}");
    }

    let command = cli.command.unwrap_or(Command::Menu(MenuArgs { dir: ".".into() }));
    let stdout = io::stdout();
    match commands::run(command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("held-karp: {err}");
            ExitCode::from(commands::exit_status(&err))
        }
    }
}

