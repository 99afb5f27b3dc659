use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use tracing::debug;

use crate::{
    dialect::DialectRegistry,
    host::ScopeId,
    reference::step_def::StepDefinition,
    vfs::FileId,
};

/// Per-document cache of all step definitions visible to that document.
///
/// Entries are tagged with the modification stamp they were built under and
/// are valid only while the stamp is unchanged; a mismatched entry is
/// treated as absent and rebuilt, never served stale. Concurrent rebuilds of
/// the same document are allowed and idempotent.
pub struct DefinitionIndex {
    entries: DashMap<FileId, Arc<IndexEntry>>,
    rebuilds: AtomicU64,
}

pub struct IndexEntry {
    pub stamp: u64,
    pub definitions: Vec<StepDefinition>,
}

impl Default for DefinitionIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// Definitions visible to `document`, valid under `stamp`.
    ///
    /// On a stamp mismatch the entry is rebuilt by concatenating every
    /// registered dialect's definitions; a dialect producing nothing is
    /// skipped silently.
    pub fn get(
        &self,
        registry: &DialectRegistry,
        document: &FileId,
        scope: &ScopeId,
        stamp: u64,
    ) -> Arc<IndexEntry> {
        if let Some(entry) = self.entries.get(document).filter(|e| e.stamp == stamp) {
            return Arc::clone(entry.value());
        }

        let mut definitions = Vec::new();
        for dialect in registry.iter() {
            definitions.extend(dialect.load_definitions(document, scope));
        }
        debug!("definition index rebuilt for {document}: {} definitions at stamp {stamp}", definitions.len());

        let entry = Arc::new(IndexEntry {
            stamp,
            definitions,
        });
        self.entries.insert(document.clone(), Arc::clone(&entry));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        entry
    }

    /// Drop a document's entry eagerly (e.g. when the document closes).
    /// Stamp validation makes this optional; stale entries are already
    /// logically absent.
    pub fn evict(
        &self,
        document: &FileId,
    ) {
        self.entries.remove(document);
    }

    /// Number of rebuilds performed so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "../../tests/src/reference/index_tests.rs"]
mod tests;
