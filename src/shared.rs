// File: src/shared.rs
use crate::core::reference::ReferenceIndex;
use crate::core::trie::Trie;
use crate::error::Result;
use crate::persistence::{load_trie, ReferencePaths};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

type Slot<T> = RwLock<Option<Arc<T>>>;

/// Process-wide handle to the persisted reference and trie.
///
/// Each artifact is loaded on first use and then handed out as an `Arc`, so
/// scans and suggestions never hold the lock while they run. A failed load
/// is not cached; the next call retries. Rebuilt artifacts are picked up
/// after [`invalidate`](Self::invalidate), which works through a shared
/// `Arc<SharedIndex>`. Callers still holding an old `Arc` keep using it.
#[derive(Debug)]
pub struct SharedIndex {
    reference_paths: ReferencePaths,
    trie_path: PathBuf,
    reference: Slot<ReferenceIndex>,
    trie: Slot<Trie>,
}

/// Read-lock fast path; on a miss the artifact is loaded without holding
/// the lock and the first value stored wins.
fn get_or_load<T>(slot: &Slot<T>, load: impl FnOnce() -> Result<T>) -> Result<Arc<T>> {
    if let Some(cached) = slot.read().as_ref() {
        return Ok(Arc::clone(cached));
    }
    let loaded = Arc::new(load()?);
    let mut guard = slot.write();
    Ok(Arc::clone(guard.get_or_insert(loaded)))
}

impl SharedIndex {
    pub fn new(reference_paths: ReferencePaths, trie_path: impl Into<PathBuf>) -> Self {
        Self {
            reference_paths,
            trie_path: trie_path.into(),
            reference: RwLock::new(None),
            trie: RwLock::new(None),
        }
    }

    /// A handle whose artifacts are already in memory.
    pub fn preloaded(reference: ReferenceIndex, trie: Trie) -> Self {
        Self {
            reference_paths: ReferencePaths::new("", ""),
            trie_path: PathBuf::new(),
            reference: RwLock::new(Some(Arc::new(reference))),
            trie: RwLock::new(Some(Arc::new(trie))),
        }
    }

    pub fn reference(&self) -> Result<Arc<ReferenceIndex>> {
        get_or_load(&self.reference, || {
            let reference = ReferenceIndex::load(&self.reference_paths)?;
            debug!("reference cached");
            Ok(reference)
        })
    }

    pub fn trie(&self) -> Result<Arc<Trie>> {
        get_or_load(&self.trie, || {
            let trie = load_trie(&self.trie_path)?;
            debug!("trie cached");
            Ok(trie)
        })
    }

    /// Drops cached artifacts so the next access reloads them from disk.
    pub fn invalidate(&self) {
        self.reference.write().take();
        self.trie.write().take();
        debug!("shared index invalidated");
    }
}
