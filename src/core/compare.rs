// File: src/core/compare.rs
use crate::core::types::HashPair;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of matching suspect n-grams against the reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub matched_count: usize,
    pub total_count: usize,
    /// Matching pairs, in the order they appeared in the input.
    pub matched_pairs: Vec<HashPair>,
}

impl Comparison {
    pub fn score(&self) -> f64 {
        score(self.matched_count, self.total_count)
    }
}

/// Keeps the suspect pairs whose hash is in `reference`. O(1) average per pair.
pub fn compare(suspect: &[HashPair], reference: &HashSet<u64>) -> Comparison {
    let matched_pairs: Vec<HashPair> = suspect
        .iter()
        .filter(|pair| reference.contains(&pair.hash))
        .copied()
        .collect();

    Comparison {
        matched_count: matched_pairs.len(),
        total_count: suspect.len(),
        matched_pairs,
    }
}

/// Similarity percentage in `[0, 100]`. A document with no n-grams scores 0.
pub fn score(matched_count: usize, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    100.0 * matched_count.min(total_count) as f64 / total_count as f64
}
