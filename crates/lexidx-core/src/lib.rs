#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Shared vocabulary for the lexidx crates: document ids, posting sets, the
//! inverted index and registry types, the error taxonomy, and configuration.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use types::{DocId, InvertedIndex, Lemma, PostingSet, Registry, SearchHit, Universe};
