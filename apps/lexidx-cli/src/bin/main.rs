use std::io;

use anyhow::Result;
use clap::Parser;

use lexidx_cli::cli::{Cli, Command};
use lexidx_cli::{commands, context, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let paths = context::resolve_paths(&cli.config)?;
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Build(args) => commands::build::run(args, paths, &mut out).map(|_| ()),
        Command::Search(args) => commands::search::run(args, paths, io::stdin().lock(), &mut out, &mut io::stderr()),
    }
}
