//! Text analysis: tokenization and term filtering
//!
//! Both stages are injected into the index and apply identically to field
//! text at indexing time and to query strings at search time. The defaults
//! split on whitespace and normalize tokens to lowercase word characters;
//! callers replace either stage by implementing the corresponding trait.

mod filter;
mod tokenizer;

pub use filter::{LowercaseFilter, TermFilter};
pub use tokenizer::{Tokenize, WhitespaceTokenizer};
