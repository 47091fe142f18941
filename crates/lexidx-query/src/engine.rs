use tracing::{debug, info};

use lexidx_core::config::IndexPaths;
use lexidx_core::error::Result;
use lexidx_core::traits::BooleanSearch;
use lexidx_core::{InvertedIndex, PostingSet, Registry, SearchHit, Universe};
use lexidx_index::{load_index, load_registry};

use crate::eval::Evaluator;
use crate::parser::parse_query;

/// A loaded index, its registry and the derived universe.
///
/// Nothing is mutated after construction, so one engine can serve concurrent
/// searches through a shared reference.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: InvertedIndex,
    registry: Registry,
    universe: Universe,
}

impl SearchEngine {
    pub fn new(index: InvertedIndex, registry: Registry) -> Self {
        let universe = Universe::derive(&registry, &index);
        Self { index, registry, universe }
    }

    /// Use an explicit universe instead of deriving one.
    pub fn with_universe(index: InvertedIndex, registry: Registry, universe: Universe) -> Self {
        Self { index, registry, universe }
    }

    /// Load the index (required) and the registry (optional) from `paths`.
    pub fn open(paths: &IndexPaths) -> Result<Self> {
        let index = load_index(&paths.index_file)?;
        let registry = load_registry(&paths.registry_file)?;
        let engine = Self::new(index, registry);
        info!(
            lemmas = engine.index.len(),
            registered = engine.registry.len(),
            universe = engine.universe.len(),
            "search engine ready"
        );
        Ok(engine)
    }

    /// Matching document ids, ascending. Unknown terms and malformed queries
    /// match nothing rather than failing.
    pub fn search(&self, query: &str) -> PostingSet {
        let parsed = parse_query(query);
        if !parsed.trailing.is_empty() {
            debug!(query, trailing = %parsed.trailing_text(), "ignoring tokens after the query expression");
        }
        let result = Evaluator::new(&self.index, &self.universe).evaluate(&parsed.expr);
        debug!(query, terms = ?parsed.expr.terms(), hits = result.len(), "query evaluated");
        result
    }

    /// `search` with each id paired with its registry URL.
    pub fn search_hits(&self, query: &str) -> Vec<SearchHit> {
        self.registry.annotate(&self.search(query))
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn registry(&self) -> &Registry { &self.registry }

    pub fn universe(&self) -> &Universe { &self.universe }
}

impl BooleanSearch for SearchEngine {
    fn search(&self, query: &str) -> PostingSet { SearchEngine::search(self, query) }
}
