//! Two-tier resolution memoization.
//!
//! The primary tier caches per-occurrence results under the modification
//! stamp they were computed at; a mismatched stamp is logical eviction. The
//! fallback tier keeps the last non-empty result ever produced for an
//! occurrence: while a document is mid-edit a correct resolution may be
//! momentarily impossible to compute, and serving the last good answer keeps
//! navigation and highlighting from flickering. It self-heals the moment a
//! fresh non-empty result lands.

use dashmap::DashMap;

use crate::{
    cancel::Cancelled,
    reference::resolution::ResolutionResult,
    syntax::OccurrenceKey,
};

pub struct ResolutionCache {
    primary: DashMap<PrimaryKey, CachedResolution>,
    fallback: DashMap<OccurrenceKey, ResolutionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PrimaryKey {
    occurrence: OccurrenceKey,
    incomplete: bool,
}

struct CachedResolution {
    stamp: u64,
    result: ResolutionResult,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self {
            primary: DashMap::new(),
            fallback: DashMap::new(),
        }
    }

    /// Look up `key` under `stamp`, computing on a miss.
    ///
    /// A primary hit never re-invokes `compute` and never writes the
    /// fallback tier; an empty cached result still reads it, so repeated
    /// queries under one stamp observe the same answer the fresh computation
    /// returned. A cancelled computation leaves both tiers untouched.
    ///
    /// `hit` reports whether the primary tier answered.
    pub fn resolve_with<F>(
        &self,
        key: &OccurrenceKey,
        incomplete: bool,
        stamp: u64,
        hit: &mut bool,
        compute: F,
    ) -> Result<ResolutionResult, Cancelled>
    where
        F: FnOnce() -> Result<ResolutionResult, Cancelled>,
    {
        let primary_key = PrimaryKey {
            occurrence: key.clone(),
            incomplete,
        };

        if let Some(cached) = self.primary.get(&primary_key).filter(|e| e.stamp == stamp) {
            *hit = true;
            let result = cached.result.clone();
            drop(cached);
            if result.is_empty()
                && let Some(last_valid) = self.fallback.get(key)
            {
                return Ok(last_valid.value().clone());
            }
            return Ok(result);
        }

        let fresh = compute()?;
        self.primary.insert(primary_key, CachedResolution {
            stamp,
            result: fresh.clone(),
        });

        if fresh.is_empty() {
            if let Some(last_valid) = self.fallback.get(key) {
                return Ok(last_valid.value().clone());
            }
            return Ok(fresh);
        }

        self.fallback.insert(key.clone(), fresh.clone());
        Ok(fresh)
    }

    /// Drop everything remembered about one occurrence, fallback included.
    /// For hosts that destroy occurrences (a step deleted from a document).
    pub fn forget(
        &self,
        key: &OccurrenceKey,
    ) {
        self.primary.retain(|k, _| k.occurrence != *key);
        self.fallback.remove(key);
    }

    pub fn clear(&self) {
        self.primary.clear();
        self.fallback.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/src/reference/cache_tests.rs"]
mod tests;
