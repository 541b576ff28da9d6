//! Document index state: field registration, the term trie, and the
//! insert / remove / vacuum lifecycle
//!
//! Removal is logical: the document leaves the live registry immediately
//! but its postings stay reachable from the trie until [`vacuum`] reclaims
//! them physically. Scoring skips postings of removed documents in the
//! meantime.
//!
//! [`vacuum`]: SearchIndex::vacuum

mod posting;
mod registry;
mod trie;

pub use posting::Posting;
pub use registry::{DocDetails, DocRegistry, FieldStats};
pub use trie::{TermTrie, TrieNode};

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::analysis::{LowercaseFilter, TermFilter, Tokenize, WhitespaceTokenizer};
use crate::config::Bm25Params;
use crate::error::{CuttleError, Result};
use crate::snapshot::{IndexSnapshot, SNAPSHOT_VERSION};

/// Per-field accessor: yields the field's text for a document, or `None`
/// when the document does not carry the field.
pub type FieldAccessor<D> = Box<dyn Fn(&D) -> Option<String>>;

pub(crate) struct FieldEntry<D> {
    pub(crate) name: String,
    pub(crate) boost: f32,
    pub(crate) accessor: FieldAccessor<D>,
    pub(crate) stats: FieldStats,
}

/// In-memory full-text search index over documents of type `D`, keyed by
/// caller-supplied keys of type `K`.
///
/// The field list is fixed at construction. All state is owned by the
/// index value; dropping it releases the trie, postings, registry, and
/// statistics. The index is single-threaded: callers needing shared access
/// must serialize externally.
pub struct SearchIndex<D, K> {
    pub(crate) fields: Vec<FieldEntry<D>>,
    pub(crate) bm25: Bm25Params,
    pub(crate) tokenizer: Box<dyn Tokenize>,
    pub(crate) filter: Box<dyn TermFilter>,
    pub(crate) trie: TermTrie,
    pub(crate) docs: DocRegistry<K>,
}

impl<D, K> std::fmt::Debug for SearchIndex<D, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("field_count", &self.fields.len())
            .field("bm25", &self.bm25)
            .finish()
    }
}

impl<D, K: Eq + Hash + Clone> SearchIndex<D, K> {
    /// Start configuring a new index.
    pub fn builder() -> IndexBuilder<D, K> {
        IndexBuilder::new()
    }

    /// Number of live documents.
    pub fn live_count(&self) -> usize {
        self.docs.live_count()
    }

    /// Whether `key` refers to a live document.
    pub fn contains_key(&self, key: &K) -> bool {
        self.docs.contains(key)
    }

    /// Number of distinct stored terms.
    pub fn term_count(&self) -> usize {
        self.trie.term_count()
    }

    /// Running statistics for the named field.
    pub fn field_stats(&self, name: &str) -> Option<FieldStats> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.stats)
    }

    /// The trie node spelled by `term`, if the path exists. The empty term
    /// yields the root.
    pub fn find_node(&self, term: &str) -> Option<&TrieNode> {
        self.trie.find_node(term)
    }

    /// Every stored term having `prefix` as a prefix, in depth-first order.
    pub fn expand(&self, prefix: &str) -> Vec<String> {
        self.trie.expand(prefix)
    }

    /// Indexes `doc` under `key`.
    ///
    /// Each field's accessor is invoked; present text is tokenized and
    /// filtered, empty terms are dropped, and the surviving terms are
    /// attached to the trie with per-field frequencies. A field whose
    /// accessor yields `None` contributes length 0, exactly like a present
    /// but empty field. Inserting a key that is already live upserts: the
    /// old document is logically removed first.
    pub fn insert(&mut self, key: K, doc: &D) {
        if self.docs.contains(&key) {
            self.remove(&key);
        }

        let live_before = self.docs.live_count();
        let field_count = self.fields.len();
        let mut field_lengths = vec![0u32; field_count];
        let mut term_counts: HashMap<String, Vec<u32>> = HashMap::new();

        for (position, field) in self.fields.iter_mut().enumerate() {
            let mut filtered = 0u32;
            if let Some(text) = (field.accessor)(doc) {
                for token in self.tokenizer.tokenize(&text) {
                    let term = self.filter.apply(&token);
                    if term.is_empty() {
                        continue;
                    }
                    filtered += 1;
                    term_counts
                        .entry(term)
                        .or_insert_with(|| vec![0; field_count])[position] += 1;
                }
            }
            field.stats.add(filtered, live_before);
            field_lengths[position] = filtered;
        }

        let slot = self.docs.register(key, field_lengths);
        let distinct_terms = term_counts.len();
        for (term, per_field) in term_counts {
            self.trie.attach(&term, Posting::new(slot, per_field));
        }
        debug!(slot, terms = distinct_terms, "indexed document");
    }

    /// Logically removes `key`: the document leaves the live registry and
    /// stops matching queries, but its postings are reclaimed only by
    /// [`vacuum`](SearchIndex::vacuum). Unknown keys are a no-op; removing
    /// twice has the same effect as removing once.
    pub fn remove(&mut self, key: &K) {
        let Some(details) = self.docs.mark_removed(key) else {
            return;
        };
        let field_lengths = details.field_lengths.clone();

        let live_after = self.docs.live_count();
        for (field, len) in self.fields.iter_mut().zip(field_lengths) {
            field.stats.subtract(len, live_after);
        }
        debug!(live = live_after, "removed document");
    }

    /// Physically reclaims logically removed documents: their postings are
    /// dropped, empty trie branches are pruned, and the document arena is
    /// compacted. Idempotent; queries observe identical results before and
    /// after.
    pub fn vacuum(&mut self) {
        let remap = self.docs.compact();
        let reclaimed = remap.iter().filter(|slot| slot.is_none()).count();
        self.trie.prune(&remap);
        debug!(reclaimed, live = self.docs.live_count(), "vacuum complete");
    }
}

/// Configures and constructs a [`SearchIndex`].
///
/// Fields are scored in registration order; tokenizer and filter default
/// to [`WhitespaceTokenizer`] and [`LowercaseFilter`].
pub struct IndexBuilder<D, K> {
    fields: Vec<(String, f32, FieldAccessor<D>)>,
    bm25: Bm25Params,
    tokenizer: Box<dyn Tokenize>,
    filter: Box<dyn TermFilter>,
    _key: PhantomData<K>,
}

impl<D, K> Default for IndexBuilder<D, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, K> IndexBuilder<D, K> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            bm25: Bm25Params::default(),
            tokenizer: Box::new(WhitespaceTokenizer),
            filter: Box::new(LowercaseFilter::default()),
            _key: PhantomData,
        }
    }

    /// Register a field with the default boost of 1.0.
    pub fn field(
        self,
        name: impl Into<String>,
        accessor: impl Fn(&D) -> Option<String> + 'static,
    ) -> Self {
        self.field_with_boost(name, 1.0, accessor)
    }

    /// Register a field with a multiplicative score boost.
    pub fn field_with_boost(
        mut self,
        name: impl Into<String>,
        boost: f32,
        accessor: impl Fn(&D) -> Option<String> + 'static,
    ) -> Self {
        self.fields.push((name.into(), boost, Box::new(accessor)));
        self
    }

    /// Replace the default tokenizer for both indexing and querying.
    pub fn tokenizer(mut self, tokenizer: impl Tokenize + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Replace the default term filter.
    pub fn filter(mut self, filter: impl TermFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Override the BM25 ranking constants.
    pub fn bm25(mut self, params: Bm25Params) -> Self {
        self.bm25 = params;
        self
    }

    /// Build an empty index.
    pub fn build(self) -> SearchIndex<D, K> {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, boost, accessor)| FieldEntry {
                name,
                boost,
                accessor,
                stats: FieldStats::default(),
            })
            .collect();
        SearchIndex {
            fields,
            bm25: self.bm25,
            tokenizer: self.tokenizer,
            filter: self.filter,
            trie: TermTrie::new(),
            docs: DocRegistry::default(),
        }
    }

    /// Rebuild an index from a snapshot, re-supplying the accessors the
    /// snapshot cannot carry.
    ///
    /// The builder's field list must match the snapshot's descriptors in
    /// count, order, and name; boosts and statistics are restored from the
    /// snapshot. Tokenizer and filter must be equivalent to the ones the
    /// snapshot was taken under for queries to reproduce.
    pub fn restore(self, snapshot: IndexSnapshot<K>) -> Result<SearchIndex<D, K>> {
        if !snapshot.is_compatible() {
            return Err(CuttleError::IncompatibleSnapshot {
                expected: SNAPSHOT_VERSION,
                actual: snapshot.version,
            });
        }
        if snapshot.fields.len() != self.fields.len() {
            return Err(CuttleError::FieldCountMismatch {
                configured: self.fields.len(),
                snapshot: snapshot.fields.len(),
            });
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for (position, ((name, _boost, accessor), descriptor)) in self
            .fields
            .into_iter()
            .zip(snapshot.fields)
            .enumerate()
        {
            if name != descriptor.name {
                return Err(CuttleError::FieldNameMismatch {
                    position,
                    configured: name,
                    snapshot: descriptor.name,
                });
            }
            fields.push(FieldEntry {
                name: descriptor.name,
                boost: descriptor.boost,
                accessor,
                stats: descriptor.stats,
            });
        }

        debug!(
            fields = fields.len(),
            version = snapshot.version,
            "restored index from snapshot"
        );
        Ok(SearchIndex {
            fields,
            bm25: snapshot.bm25,
            tokenizer: self.tokenizer,
            filter: self.filter,
            trie: snapshot.trie,
            docs: snapshot.docs,
        })
    }
}

impl<K> IndexBuilder<serde_json::Value, K> {
    /// Register a field read by property access on JSON documents: the
    /// value at `name` is indexed when it is a string, and absent
    /// otherwise.
    pub fn json_field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let property = name.clone();
        self.field(name, move |doc: &serde_json::Value| {
            doc.get(&property)
                .and_then(|value| value.as_str())
                .map(str::to_string)
        })
    }
}
