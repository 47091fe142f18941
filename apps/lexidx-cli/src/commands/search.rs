use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use lexidx_core::config::IndexPaths;
use lexidx_query::SearchEngine;

use crate::cli::SearchArgs;
use crate::output::print_hits;

/// Load the index, take the query from `args` or `input`, print the matches.
///
/// Results go to `out`; the interactive banner and prompt go to `console` so
/// that `out` stays machine-readable.
pub fn run<R, W, C>(args: SearchArgs, mut paths: IndexPaths, input: R, out: &mut W, console: &mut C) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Write,
{
    if let Some(index) = args.index { paths.index_file = index; }
    if let Some(registry) = args.registry { paths.registry_file = registry; }

    let engine = SearchEngine::open(&paths)
        .with_context(|| format!("Cannot open index {}; run `lexidx build` first", paths.index_file.display()))?;

    let query = if args.query.is_empty() { prompt(input, console)? } else { args.query.join(" ") };
    let query = query.trim();
    if query.is_empty() {
        writeln!(out, "Empty query.")?;
        return Ok(());
    }

    let hits = engine.search_hits(query);
    print_hits(out, query, &hits, args.format)
}

/// Read one line; end of input counts as an empty query.
fn prompt<R: BufRead, C: Write>(mut input: R, console: &mut C) -> Result<String> {
    writeln!(console, "Boolean search. Operators: AND, OR, NOT. Parentheses group.")?;
    writeln!(console, "Example: (кошка AND собака) OR (река AND лес) OR море")?;
    writeln!(console)?;
    write!(console, "Enter query: ")?;
    console.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}
