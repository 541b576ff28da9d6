//! Query evaluation: prefix expansion over the trie plus BM25 ranking
//!
//! Each query term is expanded to every stored term it prefixes. Across
//! distinct query terms contributions sum, classical BM25. Within the
//! expansions of a single query term, only the first expansion that
//! reaches a document contributes additively; later expansions of the same
//! query term can raise that document's score but never stack onto it.

pub mod scoring;

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use ordered_float::OrderedFloat;

use crate::index::SearchIndex;

/// One ranked search result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit<K> {
    pub key: K,
    pub score: f32,
}

impl<D, K: Eq + Hash + Clone> SearchIndex<D, K> {
    /// Ranks live documents against `query`, highest score first.
    ///
    /// The query is tokenized and filtered exactly like field text;
    /// duplicate query terms each contribute independently. Postings of
    /// logically removed documents are skipped. An empty index, an
    /// all-whitespace query, or a query with no stored expansion all yield
    /// an empty result. Tie order between equal scores is unspecified.
    pub fn search(&self, query: &str) -> Vec<SearchHit<K>> {
        let live_docs = self.docs.live_count() as f32;
        let mut scores: HashMap<u32, f32> = HashMap::new();

        for token in self.tokenizer.tokenize(query) {
            let term = self.filter.apply(&token);
            if term.is_empty() {
                continue;
            }
            self.score_query_term(&term, live_docs, &mut scores);
        }

        let mut hits: Vec<SearchHit<K>> = scores
            .into_iter()
            .map(|(slot, score)| SearchHit {
                key: self.docs.details(slot).key.clone(),
                score,
            })
            .collect();
        hits.sort_by_key(|hit| Reverse(OrderedFloat(hit.score)));
        hits
    }

    fn score_query_term(&self, term: &str, live_docs: f32, scores: &mut HashMap<u32, f32>) {
        // Documents already scored by an earlier expansion of THIS query
        // term; for them later expansions max instead of add.
        let mut visited: HashSet<u32> = HashSet::new();

        for (extra_units, node) in self.trie.expansions(term) {
            let df = node
                .postings()
                .iter()
                .filter(|posting| self.docs.is_live(posting.doc))
                .count();
            if df == 0 {
                continue;
            }
            let idf = scoring::idf(live_docs, df as f32);
            let boost = scoring::expansion_boost(extra_units);

            for posting in node.postings() {
                if !self.docs.is_live(posting.doc) {
                    continue;
                }
                let details = self.docs.details(posting.doc);

                let mut score = 0.0f32;
                for (position, field) in self.fields.iter().enumerate() {
                    let tf_raw = posting.tf(position);
                    if tf_raw == 0 {
                        continue;
                    }
                    let len = details.field_lengths[position] as f32;
                    let tf = scoring::tf_norm(&self.bm25, tf_raw as f32, len, field.stats.avg_len);
                    score += tf * idf * field.boost * boost;
                }

                if score > 0.0 {
                    let entry = scores.entry(posting.doc).or_insert(0.0);
                    if visited.insert(posting.doc) {
                        *entry += score;
                    } else {
                        *entry = entry.max(score);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_field_index() -> SearchIndex<String, u64> {
        SearchIndex::builder()
            .field("text", |doc: &String| Some(doc.clone()))
            .build()
    }

    #[test]
    fn test_empty_index_yields_nothing() {
        let index = single_field_index();
        assert!(index.search("anything").is_empty());
    }

    #[test]
    fn test_blank_query_yields_nothing() {
        let mut index = single_field_index();
        index.insert(1, &"lorem ipsum".to_string());
        assert!(index.search("").is_empty());
        assert!(index.search(" \t\n ").is_empty());
        assert!(index.search("...").is_empty());
    }

    #[test]
    fn test_unknown_prefix_contributes_nothing() {
        let mut index = single_field_index();
        index.insert(1, &"lorem".to_string());
        assert!(index.search("zeta").is_empty());
    }

    #[test]
    fn test_higher_term_frequency_ranks_first() {
        let mut index = single_field_index();
        index.insert(1, &"rust rust rust".to_string());
        index.insert(2, &"rust programming language".to_string());

        let hits = index.search("rust");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, 1);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_exact_match_outranks_prefix_expansion() {
        let mut index = single_field_index();
        index.insert(1, &"term".to_string());
        index.insert(2, &"termite".to_string());

        let hits = index.search("term");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, 1);
    }

    #[test]
    fn test_removed_documents_are_skipped_without_vacuum() {
        let mut index = single_field_index();
        index.insert(1, &"lorem ipsum".to_string());
        index.insert(2, &"lorem dolor".to_string());
        index.remove(&1);

        let hits = index.search("lorem");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, 2);
    }

    #[test]
    fn test_duplicate_query_terms_stack() {
        let mut index = single_field_index();
        index.insert(1, &"rust systems".to_string());

        let once = index.search("rust");
        let twice = index.search("rust rust");
        assert!((twice[0].score - 2.0 * once[0].score).abs() < 1e-6);
    }

    #[test]
    fn test_expansions_of_one_query_term_do_not_stack() {
        let mut index = single_field_index();
        // one document matching two expansions of the same query term
        index.insert(1, &"abc abcde".to_string());
        index.insert(2, &"zzz".to_string());

        let hits = index.search("ab");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, 1);

        // the first expansion ("abc", one extra unit) contributes additively
        // and the weaker "abcde" expansion can only raise, so the combined
        // score equals the first expansion's contribution alone
        let params = crate::Bm25Params::default();
        let expected =
            scoring::tf_norm(&params, 1.0, 2.0, 1.5) * scoring::idf(2.0, 1.0) * scoring::expansion_boost(1);
        assert!((hits[0].score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_scores_sum_across_distinct_query_terms() {
        let mut index = single_field_index();
        index.insert(1, &"lorem ipsum".to_string());
        index.insert(2, &"lorem".to_string());

        let lorem = index.search("lorem");
        let both = index.search("lorem ipsum");

        let doc1_lorem = lorem.iter().find(|hit| hit.key == 1).unwrap().score;
        let doc1_both = both.iter().find(|hit| hit.key == 1).unwrap().score;
        assert!(doc1_both > doc1_lorem);
    }

    #[test]
    fn test_field_boost_scales_contribution() {
        struct Pair {
            left: String,
            right: String,
        }
        let build = |boost: f32| {
            let mut index: SearchIndex<Pair, u64> = SearchIndex::builder()
                .field("left", |p: &Pair| Some(p.left.clone()))
                .field_with_boost("right", boost, |p: &Pair| Some(p.right.clone()))
                .build();
            index.insert(
                1,
                &Pair {
                    left: "alpha".into(),
                    right: "beta".into(),
                },
            );
            index
        };

        let flat = build(1.0);
        let boosted = build(3.0);
        let flat_score = flat.search("beta")[0].score;
        let boosted_score = boosted.search("beta")[0].score;
        assert!((boosted_score - 3.0 * flat_score).abs() < 1e-6);
    }
}
