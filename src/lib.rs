// File: src/lib.rs
//! Plagiarism detection by exact n-gram overlap, plus prefix word suggestion.
//!
//! A reference corpus is tokenized, given a vocabulary of dense ids and
//! hashed window by window with a Rabin-Karp rolling hash. Suspect text is
//! encoded against that same vocabulary, hashed the same way, and scored by
//! how many of its n-gram hashes appear in the reference set. A trie over the
//! corpus words answers completion queries.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod shared;
pub mod synonyms;
pub mod text;

pub use crate::config::CheckerConfig;
pub use crate::core::compare::{compare, score, Comparison};
pub use crate::core::engine::{ScanEngine, ScanResult};
pub use crate::core::reference::{build_from_tokens, build_reference, ReferenceIndex, ReferenceSummary};
pub use crate::core::rolling::{rolling_hash, window_hash};
pub use crate::core::trie::Trie;
pub use crate::core::types::{HashPair, HashParams, TokenId};
pub use crate::core::vocab::Vocabulary;
pub use crate::error::{CheckerError, Result};
pub use crate::shared::SharedIndex;
