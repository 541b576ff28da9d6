//! Snapshot serialization for the index state
//!
//! A snapshot captures the document registry, the full trie with its
//! postings, the field descriptors (name, boost, running statistics), and
//! the BM25 constants. The tokenizer, filter, and field accessors are
//! code, not state: they are re-supplied through
//! [`IndexBuilder::restore`](crate::index::IndexBuilder::restore), and must
//! be equivalent to the originals for the restored index to answer every
//! query identically.

use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Bm25Params;
use crate::error::Result;
use crate::index::{DocRegistry, FieldStats, SearchIndex, TermTrie};

/// Snapshot format version for compatibility checking
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted descriptor of one field; the accessor is deliberately absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub boost: f32,
    pub stats: FieldStats,
}

/// Complete persisted state of a [`SearchIndex`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct IndexSnapshot<K> {
    pub version: u32,
    pub fields: Vec<FieldDescriptor>,
    pub bm25: Bm25Params,
    pub trie: TermTrie,
    pub docs: DocRegistry<K>,
}

impl<K> IndexSnapshot<K> {
    /// Check whether this snapshot version can be restored
    pub fn is_compatible(&self) -> bool {
        self.version <= SNAPSHOT_VERSION
    }

    /// Serialize the snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>>
    where
        K: Serialize,
    {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a snapshot from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self>
    where
        K: DeserializeOwned + Eq + Hash,
    {
        Ok(bincode::deserialize(data)?)
    }
}

impl<D, K: Eq + Hash + Clone> SearchIndex<D, K> {
    /// Capture the full index state for serialization.
    pub fn snapshot(&self) -> IndexSnapshot<K> {
        IndexSnapshot {
            version: SNAPSHOT_VERSION,
            fields: self
                .fields
                .iter()
                .map(|field| FieldDescriptor {
                    name: field.name.clone(),
                    boost: field.boost,
                    stats: field.stats,
                })
                .collect(),
            bm25: self.bm25,
            trie: self.trie.clone(),
            docs: self.docs.clone(),
        }
    }
}
