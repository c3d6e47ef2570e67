// File: src/core/engine.rs
use crate::core::compare::compare;
use crate::core::rolling::rolling_hash;
use crate::core::types::{HashPair, HashParams};
use crate::error::Result;
use crate::shared::SharedIndex;
use crate::synonyms::SynonymSource;
use crate::text::{preview, DefaultNormalizer, Normalizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_PREVIEW_CHARS: usize = 300;

/// Everything a caller needs to report on one suspect scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The first characters of the cleaned text.
    pub cleaned_preview: String,
    pub tokens: usize,
    pub ngrams_total: usize,
    pub ngrams_matched: usize,
    pub score_percent: f64,
    pub matches: Vec<HashPair>,
    pub window: usize,
    pub used_synonyms: bool,
}

/// Composes cleaning, encoding, hashing and comparison into one scan, and
/// serves prefix suggestions from the trie.
///
/// Per-request state lives on the stack of `scan`/`suggest`; the engine
/// itself only holds the shared read-only index and the collaborators, so
/// one engine can serve many threads.
pub struct ScanEngine {
    index: Arc<SharedIndex>,
    params: HashParams,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    synonyms: Option<Box<dyn SynonymSource + Send + Sync>>,
    preview_chars: usize,
}

impl ScanEngine {
    pub fn new(index: Arc<SharedIndex>, params: HashParams) -> Self {
        Self {
            index,
            params,
            normalizer: Box::new(DefaultNormalizer::default()),
            synonyms: None,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_normalizer(mut self, normalizer: impl Normalizer + Send + Sync + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn with_synonyms(mut self, synonyms: impl SynonymSource + Send + Sync + 'static) -> Self {
        self.synonyms = Some(Box::new(synonyms));
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn params(&self) -> &HashParams {
        &self.params
    }

    /// Scans `raw_text` with the engine's default window size.
    pub fn scan(&self, raw_text: &str, use_synonyms: bool) -> Result<ScanResult> {
        self.scan_with_window(raw_text, self.params.window, use_synonyms)
    }

    /// Scans `raw_text` against the reference using n-grams of length `window`.
    ///
    /// Fails only if the reference cannot be loaded. Text with fewer known
    /// tokens than `window` scores 0.
    pub fn scan_with_window(&self, raw_text: &str, window: usize, use_synonyms: bool) -> Result<ScanResult> {
        let reference = self.index.reference()?;
        let params = self.params.with_window(window);

        let cleaned = self.normalizer.clean(raw_text);
        let tokens = self.normalizer.tokenize(&cleaned);

        let synonyms = if use_synonyms { self.synonyms.as_deref() } else { None };
        if use_synonyms && synonyms.is_none() {
            warn!("synonym scan requested but no synonym source is configured");
        }

        let ids = match synonyms {
            Some(source) => reference.vocab.encode_canonical(&tokens, &source.canonical_map(&tokens)),
            None => reference.vocab.encode(&tokens),
        };

        let suspect_pairs = rolling_hash(&ids, &params);
        let comparison = compare(&suspect_pairs, &reference.hashes);
        let score_percent = comparison.score();

        debug!(
            tokens = tokens.len(),
            known = ids.len(),
            ngrams = comparison.total_count,
            matched = comparison.matched_count,
            score = score_percent,
            "scan complete"
        );

        Ok(ScanResult {
            cleaned_preview: preview(&cleaned, self.preview_chars),
            tokens: tokens.len(),
            ngrams_total: comparison.total_count,
            ngrams_matched: comparison.matched_count,
            score_percent,
            matches: comparison.matched_pairs,
            window,
            used_synonyms: synonyms.is_some(),
        })
    }

    /// Completions for the last word of `input`, like an editor completer.
    pub fn suggest(&self, input: &str, max_results: usize) -> Result<Vec<String>> {
        let Some(prefix) = input.split_whitespace().last() else {
            return Ok(Vec::new());
        };
        let trie = self.index.trie()?;
        Ok(trie.suggest(prefix, max_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::ReferenceIndex;
    use crate::core::trie::Trie;
    use crate::persistence::ReferencePaths;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn engine(reference_tokens: &[&str], window: usize) -> ScanEngine {
        let params = HashParams::default().with_window(window);
        let reference = ReferenceIndex::from_tokens(reference_tokens, &params);
        let trie = Trie::build_from_tokens(reference_tokens);
        ScanEngine::new(Arc::new(SharedIndex::preloaded(reference, trie)), params)
    }

    #[test]
    fn test_scan_half_match() {
        let engine = engine(&["hello", "world", "hello", "icog"], 2);
        let result = engine.scan("Hello world, ICOG!", false).unwrap();

        assert_eq!(result.tokens, 3);
        assert_eq!(result.ngrams_total, 2);
        assert_eq!(result.ngrams_matched, 1);
        assert_eq!(result.score_percent, 50.0);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].start, 0);
        assert_eq!(result.cleaned_preview, "hello world icog");
        assert_eq!(result.window, 2);
    }

    #[test]
    fn test_scan_indices_skip_unknown_tokens() {
        let engine = engine(&["a", "b", "c", "d"], 2);
        let result = engine.scan("zzz a yyy b c", false).unwrap();

        // Encoded ids are [a, b, c]; positions refer to that sequence.
        assert_eq!(result.tokens, 5);
        assert_eq!(result.ngrams_total, 2);
        let starts: Vec<usize> = result.matches.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 1]);
        assert_eq!(result.score_percent, 100.0);
    }

    #[test]
    fn test_scan_empty_and_short_input() {
        let engine = engine(&["hello", "world", "hello", "icog"], 2);

        let result = engine.scan("", false).unwrap();
        assert_eq!(result.tokens, 0);
        assert_eq!(result.ngrams_total, 0);
        assert_eq!(result.score_percent, 0.0);

        let result = engine.scan("hello", false).unwrap();
        assert_eq!(result.ngrams_total, 0);
        assert_eq!(result.score_percent, 0.0);
    }

    #[test]
    fn test_scan_with_window_override() {
        let engine = engine(&["a", "b", "c", "d"], 2);
        let result = engine.scan_with_window("a b c d", 3, false).unwrap();
        assert_eq!(result.window, 3);
        assert_eq!(result.ngrams_total, 2);
        // The reference was hashed with k = 2, so 3-grams never match.
        assert_eq!(result.ngrams_matched, 0);
    }

    #[test]
    fn test_scan_with_synonyms() {
        let synonyms = HashMap::from([("large".to_string(), "big".to_string())]);
        let engine = engine(&["the", "big", "dog"], 3).with_synonyms(synonyms);

        let plain = engine.scan("the large dog", false).unwrap();
        assert_eq!(plain.ngrams_total, 0);
        assert!(!plain.used_synonyms);

        let canon = engine.scan("the large dog", true).unwrap();
        assert_eq!(canon.ngrams_matched, 1);
        assert_eq!(canon.score_percent, 100.0);
        assert!(canon.used_synonyms);
    }

    #[test]
    fn test_scan_synonyms_without_source_falls_back() {
        let engine = engine(&["a", "b"], 2);
        let result = engine.scan("a b", true).unwrap();
        assert!(!result.used_synonyms);
        assert_eq!(result.score_percent, 100.0);
    }

    #[test]
    fn test_preview_is_truncated() {
        let engine = engine(&["a", "b"], 2).with_preview_chars(3);
        assert_eq!(engine.scan("abcdef ghi", false).unwrap().cleaned_preview, "abc");
    }

    #[test]
    fn test_suggest_uses_last_word() {
        let engine = engine(&["hello", "helium", "hi", "habit"], 2);
        assert_eq!(engine.suggest("say he", 5).unwrap(), vec!["helium", "hello"]);
        assert!(engine.suggest("", 5).unwrap().is_empty());
        assert!(engine.suggest("   ", 5).unwrap().is_empty());
        assert!(engine.suggest("xyz", 5).unwrap().is_empty());
    }

    #[test]
    fn test_scan_propagates_missing_reference() {
        let dir = TempDir::new().unwrap();
        let index = SharedIndex::new(ReferencePaths::in_dir(dir.path()), dir.path().join("trie.bin"));
        let engine = ScanEngine::new(Arc::new(index), HashParams::default());

        assert!(engine.scan("anything", false).unwrap_err().is_not_found());
        assert!(engine.suggest("any", 3).unwrap_err().is_not_found());
    }
}
