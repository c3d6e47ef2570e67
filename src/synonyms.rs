// File: src/synonyms.rs
use crate::error::{CheckerError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Supplies a canonical form for suspect tokens before encoding, so that
/// synonym substitutions still hash like the reference wording.
pub trait SynonymSource {
    /// Maps each token to its canonical form. Tokens left out of the map
    /// are encoded unchanged.
    fn canonical_map(&self, tokens: &[String]) -> HashMap<String, String>;
}

/// A fixed token to canonical-token table, typically exported from a
/// lexical database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    canonical: HashMap<String, String>,
}

impl SynonymTable {
    pub fn new(canonical: HashMap<String, String>) -> Self {
        Self { canonical }
    }

    /// Reads a JSON object of `"token": "canonical"` entries.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CheckerError::open("synonym table", path, e))?;
        let canonical: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CheckerError::format("synonym table", path, e.to_string()))?;
        info!(path = %path.display(), entries = canonical.len(), "synonym table loaded");
        Ok(Self { canonical })
    }

    pub fn canonical(&self, token: &str) -> Option<&str> {
        self.canonical.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

impl SynonymSource for SynonymTable {
    fn canonical_map(&self, tokens: &[String]) -> HashMap<String, String> {
        tokens
            .iter()
            .filter_map(|t| self.canonical(t).map(|c| (t.clone(), c.to_string())))
            .collect()
    }
}

impl SynonymSource for HashMap<String, String> {
    fn canonical_map(&self, tokens: &[String]) -> HashMap<String, String> {
        tokens
            .iter()
            .filter_map(|t| self.get(t).map(|c| (t.clone(), c.clone())))
            .collect()
    }
}
