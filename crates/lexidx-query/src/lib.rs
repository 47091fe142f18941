//! lexidx-query
//!
//! Boolean queries over a loaded inverted index. A query string is lexed
//! (`token`), parsed into an `Expr` tree (`parser`, `ast`) and evaluated with
//! set algebra (`eval`). `SearchEngine` ties the steps to a loaded index.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or_expr  := and_expr (OR and_expr)*
//! and_expr := primary (AND primary)*
//! primary  := TERM | '(' or_expr ')' | NOT primary
//! ```

pub mod ast;
pub mod engine;
pub mod eval;
pub mod parser;
pub mod token;

pub use ast::Expr;
pub use engine::SearchEngine;
pub use eval::Evaluator;
pub use parser::{parse, parse_query, ParsedQuery};
pub use token::{tokenize, Token};
