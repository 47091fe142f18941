use std::io::Write;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use lexidx_core::config::IndexPaths;
use lexidx_core::traits::LemmaSource;
use lexidx_index::{BuildStats, DirLemmaSource, IndexBuilder};

use crate::cli::BuildArgs;

/// Build the index from the lemma directory and persist it.
pub fn run<W: Write>(args: BuildArgs, paths: IndexPaths, out: &mut W) -> Result<BuildStats> {
    let lemma_dir = args.lemma_dir.unwrap_or(paths.lemma_dir);
    let output = args.output.unwrap_or(paths.index_file);

    let source = DirLemmaSource::open(&lemma_dir)
        .with_context(|| format!("Lemma directory {} is unavailable; run the lemmatizer first", lemma_dir.display()))?;
    let documents = source.documents()?;
    info!(lemma_dir = %lemma_dir.display(), pages = documents.len(), "building inverted index");

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let mut builder = IndexBuilder::new();
    for doc_id in documents {
        pb.set_message(format!("page{doc_id}"));
        builder.ingest(&source, doc_id)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = builder
        .persist(&output)
        .with_context(|| format!("Failed to write index to {}", output.display()))?;
    writeln!(out, "✅ Inverted index written to {}", output.display())?;
    writeln!(out, "📊 Pages: {} ({} without lemmas)", stats.documents, stats.documents_without_lemmas)?;
    writeln!(out, "📊 Unique terms: {}", stats.lemmas)?;
    Ok(stats)
}
