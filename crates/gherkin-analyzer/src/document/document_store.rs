use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;

use crate::{
    document::feature::FeatureDocument,
    host::{ResolveHost, ScopeId},
    syntax::StepOccurrence,
    vfs::FileId,
};

/// Thread-safe store of open feature documents.
///
/// Uses `DashMap` internally so that all operations are safe to call
/// concurrently without external synchronisation. The store owns the
/// modification counter: every structural change bumps it, which logically
/// evicts all derived caches in the engine.
///
/// This is the reference [`ResolveHost`]: every tracked document resolves
/// within the single scope the store was created with.
pub struct DocumentStore {
    scope: ScopeId,
    documents: DashMap<FileId, Arc<FeatureDocument>>,
    stamp: AtomicU64,
}

impl DocumentStore {
    pub fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            documents: DashMap::new(),
            stamp: AtomicU64::new(0),
        }
    }

    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    /// Open (register) a document, parsing its steps.
    pub fn open(
        &self,
        file: FileId,
        text: String,
    ) -> Arc<FeatureDocument> {
        let document = Arc::new(FeatureDocument::parse(file.clone(), text));
        self.documents.insert(file, Arc::clone(&document));
        self.bump_stamp();
        document
    }

    /// Replace the full content of a document.
    pub fn update(
        &self,
        file: FileId,
        text: String,
    ) -> Arc<FeatureDocument> {
        self.open(file, text)
    }

    /// Close (unregister) a document.
    pub fn close(
        &self,
        file: &FileId,
    ) {
        self.documents.remove(file);
        self.bump_stamp();
    }

    pub fn get(
        &self,
        file: &FileId,
    ) -> Option<Arc<FeatureDocument>> {
        self.documents.get(file).map(|entry| Arc::clone(entry.value()))
    }

    pub fn all_files(&self) -> Vec<FileId> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Advance the modification counter. Called on every structural change;
    /// also usable directly to model out-of-store edits (e.g. a step
    /// definition file changing on disk).
    pub fn bump_stamp(&self) -> u64 {
        self.stamp.fetch_add(1, Ordering::Release) + 1
    }
}

impl ResolveHost for DocumentStore {
    fn modification_stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    fn enclosing_scope(
        &self,
        occurrence: &StepOccurrence,
    ) -> Option<ScopeId> {
        if self.documents.contains_key(occurrence.file()) {
            return Some(self.scope.clone());
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
