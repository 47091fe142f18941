use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use lexidx_core::SearchHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Found N documents` followed by one `<id>\t<url>` line per match.
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    count: usize,
    results: &'a [SearchHit],
}

pub fn print_hits<W: Write>(out: &mut W, query: &str, hits: &[SearchHit], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "\nFound {} documents", hits.len())?;
            for hit in hits {
                writeln!(out, "  {}\t{}", hit.doc_id, hit.url)?;
            }
        }
        OutputFormat::Json => {
            let report = JsonReport { query, count: hits.len(), results: hits };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
