//! Cuttle: a lightweight, in-memory, dynamic full-text search engine.
//!
//! Documents with one or more named text fields are indexed incrementally
//! into a character trie keyed by code units. Queries are ranked with
//! Okapi BM25, every query term expanding to the stored terms it prefixes.
//! Removal is logical and O(1); [`SearchIndex::vacuum`] reclaims removed
//! postings and prunes empty trie branches. The whole index state round-
//! trips through [`IndexSnapshot`]; the tokenizer, filter, and field
//! accessors are re-supplied on restore.
//!
//! ```
//! use cuttle::SearchIndex;
//!
//! struct Article {
//!     title: String,
//!     body: String,
//! }
//!
//! let mut index: SearchIndex<Article, u64> = SearchIndex::builder()
//!     .field("title", |a: &Article| Some(a.title.clone()))
//!     .field("body", |a: &Article| Some(a.body.clone()))
//!     .build();
//!
//! index.insert(
//!     1,
//!     &Article {
//!         title: "Lorem".into(),
//!         body: "ipsum dolor sit".into(),
//!     },
//! );
//!
//! let hits = index.search("lorem");
//! assert_eq!(hits[0].key, 1);
//! assert_eq!(index.expand("ip"), vec!["ipsum"]);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod index;
pub mod search;
pub mod snapshot;

pub use analysis::{LowercaseFilter, TermFilter, Tokenize, WhitespaceTokenizer};
pub use config::Bm25Params;
pub use error::{CuttleError, Result};
pub use index::{IndexBuilder, SearchIndex};
pub use search::SearchHit;
pub use snapshot::{IndexSnapshot, SNAPSHOT_VERSION};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
