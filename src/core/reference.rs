// File: src/core/reference.rs
use crate::core::rolling::rolling_hash;
use crate::core::types::HashParams;
use crate::core::vocab::Vocabulary;
use crate::error::Result;
use crate::persistence::{load_reference, save_reference, ReferencePaths};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// The canonical n-gram hash set of a reference corpus plus the vocabulary
/// its ids were drawn from. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    pub hashes: HashSet<u64>,
    pub vocab: Vocabulary,
}

impl ReferenceIndex {
    /// Assigns ids over `tokens` and collapses every window hash into a set.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], params: &HashParams) -> Self {
        let vocab = Vocabulary::assign_ids(tokens);
        let ids = vocab.encode(tokens);
        let hashes = rolling_hash(&ids, params).into_iter().map(|pair| pair.hash).collect();
        Self { hashes, vocab }
    }

    pub fn load(paths: &ReferencePaths) -> Result<Self> {
        let (hashes, vocab) = load_reference(paths)?;
        Ok(Self { hashes, vocab })
    }

    pub fn save(&self, paths: &ReferencePaths) -> Result<()> {
        save_reference(&self.hashes, &self.vocab, paths)
    }

    pub fn summary(&self, tokens: usize, window: usize) -> ReferenceSummary {
        ReferenceSummary {
            tokens,
            vocab_size: self.vocab.len(),
            hash_count: self.hashes.len(),
            window,
        }
    }
}

/// Counts reported after a reference build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    pub tokens: usize,
    pub vocab_size: usize,
    pub hash_count: usize,
    pub window: usize,
}

/// Builds the reference from `tokens`, persists it and returns it.
pub fn build_from_tokens<S: AsRef<str>>(
    tokens: &[S],
    params: &HashParams,
    paths: &ReferencePaths,
) -> Result<(HashSet<u64>, Vocabulary)> {
    let index = ReferenceIndex::from_tokens(tokens, params);
    index.save(paths)?;
    info!(
        tokens = tokens.len(),
        vocab = index.vocab.len(),
        hashes = index.hashes.len(),
        window = params.window,
        "reference built"
    );
    Ok((index.hashes, index.vocab))
}

/// Offline entry point: builds and persists a reference, reporting counts only.
pub fn build_reference<S: AsRef<str>>(
    tokens: &[S],
    params: &HashParams,
    paths: &ReferencePaths,
) -> Result<ReferenceSummary> {
    let (hashes, vocab) = build_from_tokens(tokens, params, paths)?;
    Ok(ReferenceIndex { hashes, vocab }.summary(tokens.len(), params.window))
}
