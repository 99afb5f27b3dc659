//! The match resolver: reference text against every visible definition.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    cancel::{CancellationToken, Cancelled},
    dialect::DialectRegistry,
    host::ResolveHost,
    reference::{index::DefinitionIndex, resolution::ResolutionResult},
    syntax::StepOccurrence,
};

/// Compute the set of declarations matching `occurrence`, under the caller's
/// modification stamp.
///
/// One declaration contributes at most once no matter how many dialects or
/// step-text variants matched it; the first matching variant wins and the
/// remaining variants are not tried for that definition. The cancellation
/// token is polled before every pattern comparison; on a request the whole
/// computation aborts with no partial result.
pub(crate) fn resolve_occurrence(
    host: &dyn ResolveHost,
    registry: &DialectRegistry,
    index: &DefinitionIndex,
    occurrence: &StepOccurrence,
    stamp: u64,
    cancel: &CancellationToken,
) -> Result<ResolutionResult, Cancelled> {
    let Some(scope) = host.enclosing_scope(occurrence) else {
        debug!("no enclosing scope for step in {}", occurrence.file());
        return Ok(ResolutionResult::empty());
    };

    // Each dialect may read the step text its own way; match against the
    // deduplicated union of those variants.
    let mut variants: Vec<String> = Vec::new();
    for dialect in registry.iter() {
        if let Some(text) = dialect.step_text(occurrence)
            && !text.is_empty()
            && !variants.contains(&text)
        {
            variants.push(text);
        }
    }
    if variants.is_empty() {
        return Ok(ResolutionResult::empty());
    }

    let entry = index.get(registry, occurrence.file(), &scope, stamp);

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for definition in &entry.definitions {
        let Some(dialect) = registry.by_id(definition.dialect) else {
            continue;
        };
        if !dialect.supports(occurrence) {
            continue;
        }
        for variant in &variants {
            cancel.check()?;
            if dialect.matches(definition, variant) {
                if seen.insert(definition.declaration.clone()) {
                    resolved.push(definition.declaration.clone());
                }
                break;
            }
        }
    }

    Ok(ResolutionResult::new(resolved))
}

#[cfg(test)]
#[path = "../../tests/src/reference/resolver_tests.rs"]
mod tests;
