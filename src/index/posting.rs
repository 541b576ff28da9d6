use serde::{Deserialize, Serialize};

/// One term-document pairing, carrying per-field term frequencies.
///
/// Documents are referenced by their `u32` slot in the registry arena; a
/// posting is owned by exactly one trie node (the node whose path spells
/// the term).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Registry arena slot of the owning document.
    pub doc: u32,
    /// Occurrences of the term per field position; one entry per field.
    pub term_frequency: Vec<u32>,
}

impl Posting {
    pub fn new(doc: u32, term_frequency: Vec<u32>) -> Self {
        Self {
            doc,
            term_frequency,
        }
    }

    /// Term frequency within one field position.
    pub fn tf(&self, field: usize) -> u32 {
        self.term_frequency.get(field).copied().unwrap_or(0)
    }

    /// Total occurrences across all fields; at least 1 for any stored posting.
    pub fn total_tf(&self) -> u32 {
        self.term_frequency.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_field_frequency() {
        let posting = Posting::new(3, vec![2, 0, 1]);
        assert_eq!(posting.tf(0), 2);
        assert_eq!(posting.tf(1), 0);
        assert_eq!(posting.tf(2), 1);
        assert_eq!(posting.tf(9), 0);
    }

    #[test]
    fn test_total_frequency() {
        let posting = Posting::new(0, vec![2, 0, 1]);
        assert_eq!(posting.total_tf(), 3);
    }
}
