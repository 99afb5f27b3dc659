//! The resolution engine.

use std::time::Instant;

use tracing::debug;

use crate::{
    cancel::{CancellationToken, Cancelled},
    dialect::DialectRegistry,
    host::ResolveHost,
    reference::{
        cache::ResolutionCache,
        index::DefinitionIndex,
        perf::ResolvePerf,
        resolution::ResolutionResult,
        resolver::resolve_occurrence,
        span,
        step_ref::StepReference,
    },
    syntax::{OccurrenceKey, StepOccurrence},
    vfs::FileId,
};

/// Builds step references and resolves them against the registered dialects.
///
/// Owns the definition index, both resolution cache tiers and the perf
/// counters; all entry points are `&self` and safe to call concurrently from
/// host worker threads.
pub struct StepReferenceProvider {
    registry: DialectRegistry,
    index: DefinitionIndex,
    cache: ResolutionCache,
    perf: ResolvePerf,
}

impl StepReferenceProvider {
    pub fn new(registry: DialectRegistry) -> Self {
        Self {
            registry,
            index: DefinitionIndex::new(),
            cache: ResolutionCache::new(),
            perf: ResolvePerf::default(),
        }
    }

    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    pub fn index(&self) -> &DefinitionIndex {
        &self.index
    }

    /// The reference for a step occurrence, or `None` when the step has no
    /// referenceable text (keyword-only or empty line).
    pub fn reference_for<'a>(
        &'a self,
        host: &'a dyn ResolveHost,
        occurrence: &'a StepOccurrence,
    ) -> Option<StepReference<'a>> {
        let range = span::reference_span(occurrence)?;
        Some(StepReference::new(self, host, occurrence, range))
    }

    /// Resolve an occurrence through the cache tiers.
    ///
    /// The host's modification stamp is read exactly once here and held for
    /// the whole query, so the index and caches observe one consistent
    /// generation even while the host keeps editing.
    pub fn resolve_all(
        &self,
        host: &dyn ResolveHost,
        occurrence: &StepOccurrence,
        incomplete: bool,
        cancel: &CancellationToken,
    ) -> Result<ResolutionResult, Cancelled> {
        let started = Instant::now();
        let stamp = host.modification_stamp();
        let key = occurrence.key();

        let mut primary_hit = false;
        let outcome = self.cache.resolve_with(&key, incomplete, stamp, &mut primary_hit, || {
            debug!("resolving step {:?} at stamp {stamp}", occurrence.text());
            resolve_occurrence(host, &self.registry, &self.index, occurrence, stamp, cancel)
        });

        self.perf.record(started.elapsed(), primary_hit, &outcome);
        outcome
    }

    /// Drop cached state for a closed document. Cache entries for its
    /// occurrences die logically with the next stamp; the definition index
    /// entry is removed eagerly.
    pub fn evict(
        &self,
        document: &FileId,
    ) {
        self.index.evict(document);
    }

    /// Forget one occurrence entirely, its last-known-good result included.
    pub fn forget_occurrence(
        &self,
        key: &OccurrenceKey,
    ) {
        self.cache.forget(key);
    }

    pub fn log_perf_summary(&self) {
        self.perf.log_summary();
    }
}

#[cfg(test)]
#[path = "../../tests/src/reference/provider_tests.rs"]
mod tests;
