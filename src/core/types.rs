// File: src/core/types.rs
use serde::{Deserialize, Serialize};

/// A dense, positive identifier for a vocabulary word. Ids start at 1.
pub type TokenId = u32;

/// Default polynomial base.
pub const DEFAULT_BASE: u64 = 257;
/// Default modulus, a large prime.
pub const DEFAULT_MODULUS: u64 = 1_000_000_007;
/// Default n-gram length.
pub const DEFAULT_WINDOW: usize = 10;

/// The hash of one n-gram window together with where that window starts.
///
/// `start` indexes the *encoded* id sequence, i.e. after unknown tokens
/// have been dropped, not the raw token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashPair {
    pub hash: u64,
    pub start: usize,
}

impl HashPair {
    pub fn new(hash: u64, start: usize) -> Self {
        Self { hash, start }
    }
}

/// Rabin-Karp parameters: window size `k`, base `B`, modulus `M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    pub window: usize,
    pub base: u64,
    pub modulus: u64,
}

impl HashParams {
    pub fn new(window: usize, base: u64, modulus: u64) -> Self {
        Self { window, base, modulus }
    }

    pub fn with_window(self, window: usize) -> Self {
        Self { window, ..self }
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, base: DEFAULT_BASE, modulus: DEFAULT_MODULUS }
    }
}
