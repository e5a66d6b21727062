mod cli;
mod commands;

use std::process::ExitCode;

use cli::{Cli, Commands};
use commands::{inspect, search};

pub fn run() -> anyhow::Result<ExitCode> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Search(args) => search::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}

fn main() -> anyhow::Result<ExitCode> { run() }
