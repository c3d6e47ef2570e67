// File: src/config.rs
use crate::core::types::{HashParams, DEFAULT_BASE, DEFAULT_MODULUS, DEFAULT_WINDOW};
use crate::error::{CheckerError, Result};
use crate::persistence::ReferencePaths;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Runtime settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// n-gram length `k`.
    pub window: usize,
    pub base: u64,
    pub modulus: u64,
    pub hashes_path: PathBuf,
    pub vocab_path: PathBuf,
    pub trie_path: PathBuf,
    /// JSON object of token to canonical token, used when scanning with synonyms.
    pub synonyms_path: Option<PathBuf>,
    pub max_suggestions: usize,
    pub preview_chars: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
            hashes_path: PathBuf::from("data/reference/reference_hashes.bin"),
            vocab_path: PathBuf::from("data/reference/vocab.bin"),
            trie_path: PathBuf::from("data/trie/trie.bin"),
            synonyms_path: None,
            max_suggestions: 10,
            preview_chars: 300,
        }
    }
}

impl CheckerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CheckerError::open("config", path, e))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CheckerError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base < 2 {
            return Err(CheckerError::Config(format!("base must be at least 2, got {}", self.base)));
        }
        if self.modulus < 2 {
            return Err(CheckerError::Config(format!("modulus must be at least 2, got {}", self.modulus)));
        }
        Ok(())
    }

    pub fn hash_params(&self) -> HashParams {
        HashParams::new(self.window, self.base, self.modulus)
    }

    pub fn reference_paths(&self) -> ReferencePaths {
        ReferencePaths::new(&self.hashes_path, &self.vocab_path)
    }
}
