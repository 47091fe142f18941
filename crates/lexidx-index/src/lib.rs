//! lexidx-index
//!
//! Builds the lemma inverted index from per-document lemma artifacts, writes
//! it in its line-oriented text format, and reads it (and the document
//! registry) back.

pub mod builder;
pub mod loader;
pub mod source;

pub use builder::{persist_index, write_index, BuildStats, IndexBuilder};
pub use loader::{load_index, load_registry, parse_index, parse_registry};
pub use source::{DirLemmaSource, MemoryLemmaSource};
