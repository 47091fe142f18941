use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use lexidx_core::error::{Error, Result};
use lexidx_core::traits::LemmaSource;
use lexidx_core::{DocId, Lemma};

/// File inside each page directory listing `<lemma> <variant>...` per line.
pub const LEMMAS_FILE: &str = "lemmas.txt";

const PAGE_PREFIX: &str = "page";

/// Lemma artifacts laid out as `<root>/page<N>/lemmas.txt`, `N` being the doc id.
#[derive(Debug, Clone)]
pub struct DirLemmaSource {
    root: PathBuf,
    pages: BTreeMap<DocId, Vec<PathBuf>>,
}

impl DirLemmaSource {
    /// Scan `root` for page directories. Fails if `root` itself is missing or
    /// cannot be listed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::source_not_found(&root));
        }
        let mut pages: BTreeMap<DocId, Vec<PathBuf>> = BTreeMap::new();
        for entry in WalkDir::new(&root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_dir() { continue; }
            let name = entry.file_name().to_string_lossy();
            match page_doc_id(&name) {
                Some(doc_id) => pages.entry(doc_id).or_default().push(entry.path().to_path_buf()),
                None => debug!(dir = %entry.path().display(), "skipping non-page directory"),
            }
        }
        for (doc_id, dirs) in &pages {
            if dirs.len() > 1 {
                warn!(doc_id, count = dirs.len(), "several page directories share one document id; merging");
            }
        }
        debug!(root = %root.display(), documents = pages.len(), "scanned lemma source");
        Ok(Self { root, pages })
    }

    pub fn root(&self) -> &Path { &self.root }
}

impl LemmaSource for DirLemmaSource {
    fn documents(&self) -> Result<Vec<DocId>> {
        Ok(self.pages.keys().copied().collect())
    }

    fn lemmas(&self, doc_id: DocId) -> Result<Vec<Lemma>> {
        let mut lemmas = Vec::new();
        for dir in self.pages.get(&doc_id).into_iter().flatten() {
            let file = dir.join(LEMMAS_FILE);
            if !file.is_file() {
                debug!(doc_id, file = %file.display(), "no lemma file; document contributes nothing");
                continue;
            }
            lemmas.extend(parse_lemma_lines(&fs::read_to_string(&file)?));
        }
        Ok(lemmas)
    }
}

/// `page12` -> 12. Anything else, including `page0`, is not a document.
fn page_doc_id(name: &str) -> Option<DocId> {
    let digits = name.strip_prefix(PAGE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&id| id > 0)
}

/// First whitespace-separated field of every non-blank line, lower-cased.
pub fn parse_lemma_lines(text: &str) -> Vec<Lemma> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_lowercase)
        .collect()
}

/// Lemma sets held in memory, visited in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryLemmaSource {
    documents: Vec<(DocId, Vec<Lemma>)>,
}

impl MemoryLemmaSource {
    pub fn new() -> Self { Self::default() }

    pub fn insert<I, S>(&mut self, doc_id: DocId, lemmas: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Lemma>,
    {
        self.documents.push((doc_id, lemmas.into_iter().map(Into::into).collect()));
    }

    pub fn with<I, S>(mut self, doc_id: DocId, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Lemma>,
    {
        self.insert(doc_id, lemmas);
        self
    }
}

impl LemmaSource for MemoryLemmaSource {
    fn documents(&self) -> Result<Vec<DocId>> {
        let mut seen = std::collections::HashSet::new();
        Ok(self.documents.iter().map(|(id, _)| *id).filter(|id| seen.insert(*id)).collect())
    }

    fn lemmas(&self, doc_id: DocId) -> Result<Vec<Lemma>> {
        Ok(self
            .documents
            .iter()
            .filter(|(id, _)| *id == doc_id)
            .flat_map(|(_, lemmas)| lemmas.iter().cloned())
            .collect())
    }
}
