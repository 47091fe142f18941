use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use lexidx_core::error::{Error, Result};
use lexidx_core::{DocId, InvertedIndex, PostingSet, Registry};

/// Read a persisted index. A missing file means the build step has not run.
pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    if !path.is_file() {
        return Err(Error::source_not_found(path));
    }
    let text = fs::read_to_string(path)?;
    let index = parse_index(&text, path)?;
    info!(path = %path.display(), lemmas = index.len(), "inverted index loaded");
    Ok(index)
}

/// Parse index text; `file` only labels errors.
pub fn parse_index(text: &str, file: &Path) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    for (n, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(lemma) = fields.next() else { continue };
        let postings = fields
            .map(|field| {
                field
                    .parse::<DocId>()
                    .map_err(|_| Error::parse(file, n + 1, format!("invalid document id {field:?} for lemma {lemma:?}")))
            })
            .collect::<Result<PostingSet>>()?;
        let lemma = lemma.to_lowercase();
        if index.replace(lemma.as_str(), postings).is_some() {
            warn!(file = %file.display(), line = n + 1, lemma = %lemma, "repeated lemma replaces earlier entry");
        }
    }
    Ok(index)
}

/// Read the `<docId>\t<url>` registry. A missing file yields an empty registry.
pub fn load_registry(path: &Path) -> Result<Registry> {
    if !path.is_file() {
        debug!(path = %path.display(), "no document registry");
        return Ok(Registry::new());
    }
    let text = fs::read_to_string(path)?;
    let registry = parse_registry(&text, path)?;
    info!(path = %path.display(), documents = registry.len(), "document registry loaded");
    Ok(registry)
}

/// Parse registry text; `file` only labels errors.
///
/// A line without a tab registers its id with an empty URL when it is all
/// digits and is ignored otherwise.
pub fn parse_registry(text: &str, file: &Path) -> Result<Registry> {
    let mut registry = Registry::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let parse_id = |raw: &str| {
            raw.trim()
                .parse::<DocId>()
                .map_err(|_| Error::parse(file, n + 1, format!("invalid document id {raw:?}")))
        };
        match line.split_once('\t') {
            Some((id, url)) => registry.insert(parse_id(id)?, url.trim()),
            None if line.bytes().all(|b| b.is_ascii_digit()) => registry.insert(parse_id(line)?, ""),
            None => debug!(file = %file.display(), line = n + 1, "skipping registry line without a tab"),
        }
    }
    Ok(registry)
}
