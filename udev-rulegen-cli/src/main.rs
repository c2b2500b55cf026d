//! udev-rulegen command line tool.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod input;
mod logging;

use crate::cli::{Cli, Command};
use crate::commands::{run_generate, run_parse, write_stdout};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Command::Parse(args) => run_parse(args).and_then(|out| write_stdout(&out)),
        Command::Generate(args) => run_generate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
