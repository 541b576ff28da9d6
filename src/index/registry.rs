//! Document registry and per-field length statistics

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Running field-length statistics across live documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Total filtered tokens this field contributed across live documents.
    pub sum_len: u64,
    /// `sum_len / live document count`; 0 when no live documents remain.
    pub avg_len: f32,
}

impl FieldStats {
    /// Fold in an about-to-be-registered document's contribution. The
    /// denominator anticipates the new document, which is registered after
    /// field statistics are updated.
    pub fn add(&mut self, len: u32, live_before: usize) {
        self.sum_len += u64::from(len);
        self.avg_len = self.sum_len as f32 / (live_before + 1) as f32;
    }

    /// Fold out a just-removed document's contribution.
    pub fn subtract(&mut self, len: u32, live_after: usize) {
        self.sum_len -= u64::from(len);
        self.avg_len = if live_after == 0 {
            0.0
        } else {
            self.sum_len as f32 / live_after as f32
        };
    }
}

/// Bookkeeping for one document: its key, removal flag, and the number of
/// filtered tokens each field contributed at insertion time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocDetails<K> {
    pub key: K,
    pub removed: bool,
    pub field_lengths: Vec<u32>,
}

/// Arena of document details plus the live-key mapping.
///
/// Documents are addressed by `u32` arena slot; postings store slots rather
/// than back-pointers. Removed entries linger in the arena until
/// [`compact`](DocRegistry::compact) reclaims them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct DocRegistry<K> {
    entries: Vec<DocDetails<K>>,
    live: HashMap<K, u32>,
}

impl<K> Default for DocRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            live: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> DocRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not logically removed) documents.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    pub fn details(&self, slot: u32) -> &DocDetails<K> {
        &self.entries[slot as usize]
    }

    pub fn is_live(&self, slot: u32) -> bool {
        !self.entries[slot as usize].removed
    }

    /// Records a new live document and returns its arena slot.
    pub fn register(&mut self, key: K, field_lengths: Vec<u32>) -> u32 {
        let slot = self.entries.len() as u32;
        self.entries.push(DocDetails {
            key: key.clone(),
            removed: false,
            field_lengths,
        });
        self.live.insert(key, slot);
        slot
    }

    /// Logically removes `key`: flags the details and drops the key from
    /// the live mapping. Unknown or already-removed keys are a no-op.
    pub fn mark_removed(&mut self, key: &K) -> Option<&DocDetails<K>> {
        let slot = self.live.remove(key)?;
        let details = &mut self.entries[slot as usize];
        details.removed = true;
        Some(details)
    }

    /// Drops removed entries, renumbering the survivors, and returns the
    /// old-slot → new-slot table for the matching posting sweep.
    pub fn compact(&mut self) -> Vec<Option<u32>> {
        let mut remap = vec![None; self.entries.len()];
        let mut next = 0u32;
        for (old, details) in self.entries.iter().enumerate() {
            if !details.removed {
                remap[old] = Some(next);
                next += 1;
            }
        }
        self.entries.retain(|details| !details.removed);
        for slot in self.live.values_mut() {
            *slot = remap[*slot as usize].expect("live key maps to a live entry");
        }
        remap
    }

    /// Iterates the details of live documents.
    pub fn live_entries(&self) -> impl Iterator<Item = &DocDetails<K>> {
        self.entries.iter().filter(|details| !details.removed)
    }
}
