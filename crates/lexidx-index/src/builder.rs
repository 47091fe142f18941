use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use lexidx_core::error::Result;
use lexidx_core::traits::LemmaSource;
use lexidx_core::{DocId, InvertedIndex};

/// Counters reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Documents visited, including those that contributed nothing.
    pub documents: usize,
    pub documents_without_lemmas: usize,
    /// Distinct lemmas in the resulting index.
    pub lemmas: usize,
}

/// Accumulates lemma -> document postings.
///
/// The result does not depend on the order documents are added in: postings
/// are kept ordered, and adding the same (lemma, document) pair again is a
/// no-op.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: InvertedIndex,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Visit every document `source` lists, in its order.
    pub fn build<S: LemmaSource + ?Sized>(source: &S) -> Result<Self> {
        let mut builder = Self::new();
        for doc_id in source.documents()? {
            builder.ingest(source, doc_id)?;
        }
        Ok(builder)
    }

    /// Pull one document's lemmas from `source` and add them.
    pub fn ingest<S: LemmaSource + ?Sized>(&mut self, source: &S, doc_id: DocId) -> Result<()> {
        let lemmas = source.lemmas(doc_id)?;
        debug!(doc_id, lemmas = lemmas.len(), "ingesting document");
        self.add_document(doc_id, lemmas);
        Ok(())
    }

    pub fn add_document<I, S>(&mut self, doc_id: DocId, lemmas: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut contributed = false;
        for lemma in lemmas {
            let lemma = lemma.as_ref().trim();
            if lemma.is_empty() { continue; }
            if lemma.contains(char::is_whitespace) {
                warn!(doc_id, lemma, "skipping lemma containing whitespace");
                continue;
            }
            self.index.insert(lemma.to_lowercase(), doc_id);
            contributed = true;
        }
        self.stats.documents += 1;
        if !contributed { self.stats.documents_without_lemmas += 1; }
    }

    pub fn stats(&self) -> BuildStats {
        BuildStats { lemmas: self.index.len(), ..self.stats }
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn finish(self) -> InvertedIndex { self.index }

    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> { write_index(&self.index, out) }

    /// Write the index to `path` and report what was written.
    pub fn persist(&self, path: &Path) -> Result<BuildStats> {
        let stats = self.stats();
        if stats.documents == 0 {
            warn!(path = %path.display(), "no documents contributed; writing an empty index");
        }
        persist_index(&self.index, path)?;
        info!(path = %path.display(), documents = stats.documents, lemmas = stats.lemmas, "inverted index written");
        Ok(stats)
    }
}

/// Serialize as `<lemma> <id> <id>...` lines, lemmas and ids ascending.
pub fn write_index<W: Write>(index: &InvertedIndex, mut out: W) -> io::Result<()> {
    for (lemma, postings) in index {
        out.write_all(lemma.as_bytes())?;
        for doc_id in postings {
            write!(out, " {doc_id}")?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Write through a temporary file in the target directory, then rename it into place.
///
/// An existing index keeps its permissions. A new one is created like any
/// other file (0666 less the umask on unix) rather than owner-only.
pub fn persist_index(index: &InvertedIndex, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut builder = tempfile::Builder::new();
    builder.prefix(".lexidx-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), existing.permissions())?;
    }
    write_index(index, BufWriter::new(tmp.as_file_mut()))?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
