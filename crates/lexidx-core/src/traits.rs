use crate::error::Result;
use crate::types::{DocId, Lemma, PostingSet};

/// Per-document lemma sets produced by an external lemmatizer.
pub trait LemmaSource {
    /// Documents to index, in the order the builder should visit them.
    fn documents(&self) -> Result<Vec<DocId>>;

    /// Lemmas of one document. A document without a lemma artifact yields an
    /// empty list rather than an error.
    fn lemmas(&self, doc_id: DocId) -> Result<Vec<Lemma>>;
}

/// Evaluates a boolean query string to the set of matching documents.
pub trait BooleanSearch: Send + Sync {
    fn search(&self, query: &str) -> PostingSet;
}
