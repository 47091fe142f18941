use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Boolean search over a lemma inverted index.
#[derive(Parser)]
#[command(name = "lexidx", version, about)]
pub struct Cli {
    /// Configuration file. Relative data paths resolve against its directory.
    #[arg(long, env = "LEXIDX_CONFIG", default_value = "lexidx.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the inverted index from per-page lemma files.
    Build(BuildArgs),
    /// Evaluate a boolean query (AND, OR, NOT, parentheses).
    Search(SearchArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory of `page<N>/lemmas.txt` files (overrides `data.lemma_dir`).
    #[arg(long)]
    pub lemma_dir: Option<PathBuf>,

    /// Where to write the index (overrides `data.index_file`).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Index file (overrides `data.index_file`).
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Registry file (overrides `data.registry_file`).
    #[arg(long)]
    pub registry: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Query words, joined with spaces. Read from stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}
