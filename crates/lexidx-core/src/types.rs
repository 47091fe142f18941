//! Domain types shared by the index builder, the loader and the query engine.

use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Positive integer identifying one document. Gaps are allowed.
pub type DocId = u64;

/// Lower-cased canonical word form used as the index key.
pub type Lemma = String;

/// Documents containing one lemma. Iterates in ascending order.
pub type PostingSet = BTreeSet<DocId>;

/// Lemma -> posting set.
///
/// Both levels are ordered, so iterating an index yields lemmas ascending and
/// each posting set ascending. That ordering is what the persisted format
/// relies on for byte-stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: BTreeMap<Lemma, PostingSet>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record that `doc_id` contains `lemma`. Repeated pairs have no effect.
    pub fn insert(&mut self, lemma: impl Into<Lemma>, doc_id: DocId) {
        self.postings.entry(lemma.into()).or_default().insert(doc_id);
    }

    /// Replace the posting set for `lemma`, returning the previous one.
    pub fn replace(&mut self, lemma: impl Into<Lemma>, postings: PostingSet) -> Option<PostingSet> {
        self.postings.insert(lemma.into(), postings)
    }

    pub fn get(&self, lemma: &str) -> Option<&PostingSet> { self.postings.get(lemma) }

    pub fn contains(&self, lemma: &str) -> bool { self.postings.contains_key(lemma) }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn iter(&self) -> btree_map::Iter<'_, Lemma, PostingSet> { self.postings.iter() }

    /// Union of every posting set.
    pub fn doc_ids(&self) -> PostingSet {
        self.postings.values().flatten().copied().collect()
    }
}

impl<'a> IntoIterator for &'a InvertedIndex {
    type Item = (&'a Lemma, &'a PostingSet);
    type IntoIter = btree_map::Iter<'a, Lemma, PostingSet>;

    fn into_iter(self) -> Self::IntoIter { self.postings.iter() }
}

impl<L: Into<Lemma>> FromIterator<(L, PostingSet)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (L, PostingSet)>>(iter: I) -> Self {
        Self { postings: iter.into_iter().map(|(lemma, ids)| (lemma.into(), ids)).collect() }
    }
}

/// Document id -> URL. A document may be registered with an empty URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    urls: BTreeMap<DocId, String>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, doc_id: DocId, url: impl Into<String>) {
        self.urls.insert(doc_id, url.into());
    }

    /// URL for `doc_id`, or `""` when the document is unknown.
    pub fn url(&self, doc_id: DocId) -> &str {
        self.urls.get(&doc_id).map_or("", String::as_str)
    }

    pub fn contains(&self, doc_id: DocId) -> bool { self.urls.contains_key(&doc_id) }

    pub fn len(&self) -> usize { self.urls.len() }

    pub fn is_empty(&self) -> bool { self.urls.is_empty() }

    pub fn doc_ids(&self) -> PostingSet { self.urls.keys().copied().collect() }

    pub fn iter(&self) -> btree_map::Iter<'_, DocId, String> { self.urls.iter() }

    /// Pair each matching document with its registered URL, ascending by id.
    pub fn annotate(&self, results: &PostingSet) -> Vec<SearchHit> {
        results
            .iter()
            .map(|&doc_id| SearchHit { doc_id, url: self.url(doc_id).to_string() })
            .collect()
    }
}

impl<U: Into<String>> FromIterator<(DocId, U)> for Registry {
    fn from_iter<I: IntoIterator<Item = (DocId, U)>>(iter: I) -> Self {
        Self { urls: iter.into_iter().map(|(id, url)| (id, url.into())).collect() }
    }
}

/// Every document id known to a query session; the complement base for NOT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe(PostingSet);

impl Universe {
    /// Registry ids when a registry is present, otherwise every id the index mentions.
    pub fn derive(registry: &Registry, index: &InvertedIndex) -> Self {
        if registry.is_empty() { Self(index.doc_ids()) } else { Self(registry.doc_ids()) }
    }

    pub fn ids(&self) -> &PostingSet { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn contains(&self, doc_id: DocId) -> bool { self.0.contains(&doc_id) }
}

impl From<PostingSet> for Universe {
    fn from(ids: PostingSet) -> Self { Self(ids) }
}

impl FromIterator<DocId> for Universe {
    fn from_iter<I: IntoIterator<Item = DocId>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

/// One matching document, as handed to output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub url: String,
}
