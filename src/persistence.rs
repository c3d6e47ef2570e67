// File: src/persistence.rs
//! On-disk formats for the reference hash set, the vocabulary and the trie.
//!
//! Every file starts with a 4-byte magic and a little-endian `u32` format
//! version, followed by a bincode payload made only of plain records
//! (integers, strings, vectors). Loading depends on that record layout, not
//! on the in-memory node types, so a rebuilt binary can read older files of
//! the same version.
//!
//! ```text
//! hash set   "RKHS" v1  Vec<u64>                 sorted ascending
//! vocabulary "RKVC" v1  Vec<String>              id order, id = position + 1
//! trie       "RKTR" v1  Vec<TrieRecord>          root first, children sorted
//! ```
//!
//! Writes go to a temporary file in the target directory which is then
//! renamed over the destination.

use crate::core::trie::{Trie, TrieNode};
use crate::core::vocab::Vocabulary;
use crate::error::{CheckerError, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const HASHES_MAGIC: [u8; 4] = *b"RKHS";
pub const VOCAB_MAGIC: [u8; 4] = *b"RKVC";
pub const TRIE_MAGIC: [u8; 4] = *b"RKTR";
pub const FORMAT_VERSION: u32 = 1;

/// Where the two halves of a reference are stored. They are always
/// written and loaded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePaths {
    pub hashes: PathBuf,
    pub vocab: PathBuf,
}

impl ReferencePaths {
    pub fn new(hashes: impl Into<PathBuf>, vocab: impl Into<PathBuf>) -> Self {
        Self { hashes: hashes.into(), vocab: vocab.into() }
    }

    /// `reference_hashes.bin` and `vocab.bin` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("reference_hashes.bin"), dir.join("vocab.bin"))
    }
}

/// One trie node as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TrieRecord {
    terminal: bool,
    children: Vec<(char, u32)>,
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Writes the header and bincode payload of an artifact to `writer`.
/// I/O failures are reported against `path`.
fn write_payload<W: Write, T: Serialize>(mut writer: W, path: &Path, magic: [u8; 4], payload: &T) -> Result<()> {
    writer.write_all(&magic).map_err(|e| CheckerError::io(path, e))?;
    writer
        .write_all(&FORMAT_VERSION.to_le_bytes())
        .map_err(|e| CheckerError::io(path, e))?;
    bincode::serialize_into(&mut writer, payload).map_err(|err| match *err {
        bincode::ErrorKind::Io(e) => CheckerError::io(path, e),
        other => CheckerError::Serialization(Box::new(other)),
    })?;
    writer.flush().map_err(|e| CheckerError::io(path, e))
}

/// Writes a complete artifact into a temporary file next to `path`.
/// Nothing is visible at `path` until [`commit`] runs.
fn stage_artifact<T: Serialize>(path: &Path, magic: [u8; 4], payload: &T) -> Result<NamedTempFile> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| CheckerError::io(dir, e))?;

    let temp_file = NamedTempFile::new_in(dir).map_err(|e| CheckerError::io(dir, e))?;
    write_payload(BufWriter::new(&temp_file), path, magic, payload)?;
    Ok(temp_file)
}

fn commit(temp_file: NamedTempFile, what: &'static str, path: &Path) -> Result<()> {
    temp_file.persist(path).map_err(|e| CheckerError::io(path, e.error))?;
    info!(what, path = %path.display(), "saved");
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(what: &'static str, path: &Path, magic: [u8; 4]) -> Result<T> {
    let file = File::open(path).map_err(|e| CheckerError::open(what, path, e))?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 8];
    reader
        .read_exact(&mut header)
        .map_err(|_| CheckerError::format(what, path, "truncated header"))?;
    if header[..4] != magic {
        return Err(CheckerError::format(what, path, "bad magic bytes"));
    }
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version != FORMAT_VERSION {
        return Err(CheckerError::format(
            what,
            path,
            format!("unsupported format version {version} (expected {FORMAT_VERSION})"),
        ));
    }

    bincode::deserialize_from(reader).map_err(|e| CheckerError::format(what, path, e.to_string()))
}

/// Persists a reference hash set and its vocabulary.
///
/// Both files are fully written before either is renamed into place, so a
/// failure while writing leaves any previous pair untouched.
pub fn save_reference(hashes: &HashSet<u64>, vocab: &Vocabulary, paths: &ReferencePaths) -> Result<()> {
    let mut sorted: Vec<u64> = hashes.iter().copied().collect();
    sorted.sort_unstable();
    let staged_hashes = stage_artifact(&paths.hashes, HASHES_MAGIC, &sorted)?;
    let staged_vocab = stage_artifact(&paths.vocab, VOCAB_MAGIC, &vocab.words())?;

    commit(staged_hashes, "reference hash set", &paths.hashes)?;
    commit(staged_vocab, "vocabulary", &paths.vocab)
}

/// Loads a reference hash set and vocabulary. Both files must exist.
pub fn load_reference(paths: &ReferencePaths) -> Result<(HashSet<u64>, Vocabulary)> {
    let hashes: Vec<u64> = read_artifact("reference hash set", &paths.hashes, HASHES_MAGIC)?;
    let words: Vec<String> = read_artifact("vocabulary", &paths.vocab, VOCAB_MAGIC)?;
    let vocab = Vocabulary::from_words(words).map_err(|word| {
        CheckerError::format("vocabulary", &paths.vocab, format!("duplicate word {word:?}"))
    })?;

    let hashes: HashSet<u64> = hashes.into_iter().collect();
    info!(hashes = hashes.len(), vocab = vocab.len(), "reference loaded");
    Ok((hashes, vocab))
}

pub fn save_trie(trie: &Trie, path: &Path) -> Result<()> {
    let records: Vec<TrieRecord> = trie
        .nodes
        .iter()
        .map(|node| TrieRecord {
            terminal: node.terminal,
            children: node.children.iter().map(|(&ch, &idx)| (ch, idx as u32)).collect(),
        })
        .collect();
    let staged = stage_artifact(path, TRIE_MAGIC, &records)?;
    commit(staged, "trie", path)
}

pub fn load_trie(path: &Path) -> Result<Trie> {
    let records: Vec<TrieRecord> = read_artifact("trie", path, TRIE_MAGIC)?;
    if records.is_empty() {
        return Err(CheckerError::format("trie", path, "missing root node"));
    }

    let count = records.len();
    let mut nodes = Vec::with_capacity(count);
    let mut has_parent = vec![false; count];
    for (idx, record) in records.into_iter().enumerate() {
        let mut node = TrieNode { terminal: record.terminal, ..TrieNode::default() };
        for (ch, child) in record.children {
            let child = child as usize;
            // Children always come after their parent in insertion order.
            if child <= idx || child >= count {
                return Err(CheckerError::format(
                    "trie",
                    path,
                    format!("node {idx} has invalid child index {child}"),
                ));
            }
            // Every node but the root hangs off exactly one edge.
            if std::mem::replace(&mut has_parent[child], true) {
                return Err(CheckerError::format(
                    "trie",
                    path,
                    format!("node {child} is reachable from more than one edge"),
                ));
            }
            if node.children.insert(ch, child).is_some() {
                return Err(CheckerError::format("trie", path, format!("node {idx} repeats edge {ch:?}")));
            }
        }
        nodes.push(node);
    }

    let trie = Trie::from_nodes(nodes);
    info!(path = %path.display(), words = trie.word_count(), nodes = trie.node_count(), "trie loaded");
    Ok(trie)
}
