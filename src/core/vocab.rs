// File: src/core/vocab.rs
use crate::core::types::TokenId;
use std::collections::HashMap;

/// Word to id mapping, built once from a reference corpus.
///
/// Ids are dense, start at 1 and follow first-occurrence order. The word
/// list is kept alongside the map so the vocabulary can be written out in
/// id order and rebuilt exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    ids: HashMap<String, TokenId>,
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next unused id to every token not seen before.
    pub fn assign_ids<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut vocab = Self::new();
        for token in tokens {
            vocab.get_or_insert(token.as_ref());
        }
        vocab
    }

    /// Rebuilds a vocabulary from words listed in id order.
    /// Returns the first duplicated word on failure.
    pub fn from_words(words: Vec<String>) -> Result<Self, String> {
        let mut ids = HashMap::with_capacity(words.len());
        for (pos, word) in words.iter().enumerate() {
            if ids.insert(word.clone(), pos as TokenId + 1).is_some() {
                return Err(word.clone());
            }
        }
        Ok(Self { ids, words })
    }

    fn get_or_insert(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        self.words.push(token.to_string());
        let id = self.words.len() as TokenId;
        self.ids.insert(token.to_string(), id);
        id
    }

    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    /// Maps tokens to ids, silently dropping tokens outside the vocabulary
    /// so that suspect hashes stay comparable with the reference.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TokenId> {
        tokens.iter().filter_map(|t| self.get(t.as_ref())).collect()
    }

    /// Like [`encode`](Self::encode), but first replaces each token with its
    /// canonical form from `synonyms` (tokens absent from the table stay as-is).
    pub fn encode_canonical<S: AsRef<str>>(
        &self,
        tokens: &[S],
        synonyms: &HashMap<String, String>,
    ) -> Vec<TokenId> {
        tokens
            .iter()
            .map(|t| t.as_ref())
            .map(|t| synonyms.get(t).map(String::as_str).unwrap_or(t))
            .filter_map(|t| self.get(t))
            .collect()
    }

    /// Words in id order; the word at position `i` has id `i + 1`.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
