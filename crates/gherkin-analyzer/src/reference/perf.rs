use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::info;

use crate::{cancel::Cancelled, reference::resolution::ResolutionResult};

/// Lightweight runtime counters for step-resolution behavior.
///
/// The cache-hit profile tells us whether the two cache tiers are earning
/// their keep on a given workload.
#[derive(Default)]
pub(super) struct ResolvePerf {
    queries: AtomicU64,
    primary_hits: AtomicU64,
    resolver_runs: AtomicU64,
    empty_results: AtomicU64,
    cancelled: AtomicU64,
    total_elapsed_ns: AtomicU64,
}

impl ResolvePerf {
    pub(super) fn record(
        &self,
        elapsed: Duration,
        primary_hit: bool,
        outcome: &Result<ResolutionResult, Cancelled>,
    ) {
        let queries = self.queries.fetch_add(1, Ordering::Relaxed) + 1;
        if primary_hit {
            self.primary_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.resolver_runs.fetch_add(1, Ordering::Relaxed);
        }

        match outcome {
            Ok(result) if result.is_empty() => {
                self.empty_results.fetch_add(1, Ordering::Relaxed);
            },
            Ok(_) => {},
            Err(Cancelled) => {
                self.cancelled.fetch_add(1, Ordering::Relaxed);
            },
        }

        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.total_elapsed_ns.fetch_add(elapsed_ns, Ordering::Relaxed);

        if queries % 256 == 0 {
            self.log_summary();
        }
    }

    pub(super) fn log_summary(&self) {
        let queries = self.queries.load(Ordering::Relaxed);
        if queries == 0 {
            info!("[perf][resolve] no queries recorded yet");
            return;
        }

        let primary_hits = self.primary_hits.load(Ordering::Relaxed);
        let resolver_runs = self.resolver_runs.load(Ordering::Relaxed);
        let empty_results = self.empty_results.load(Ordering::Relaxed);
        let cancelled = self.cancelled.load(Ordering::Relaxed);
        let total_elapsed_ns = self.total_elapsed_ns.load(Ordering::Relaxed);

        let avg_ms = total_elapsed_ns as f64 / queries as f64 / 1_000_000.0;

        info!(
            "[perf][resolve] queries={queries}, primary_hits={primary_hits}, \
             resolver_runs={resolver_runs}, empty={empty_results}, cancelled={cancelled}, \
             avg_ms={avg_ms:.2}"
        );
    }
}
