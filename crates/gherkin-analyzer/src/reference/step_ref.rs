//! The externally visible reference handle.

use crate::{
    cancel::{CancellationToken, Cancelled},
    host::ResolveHost,
    reference::{provider::StepReferenceProvider, resolution::ResolutionResult, step_def::DeclarationHandle},
    syntax::{StepOccurrence, TextRange},
};

/// A resolvable reference from one step occurrence to its definitions.
///
/// Borrowed views only: a reference is built per query generation and
/// discarded with it. The memoized state lives in the provider, keyed by the
/// occurrence's identity, so rebuilding the façade is free.
pub struct StepReference<'a> {
    provider: &'a StepReferenceProvider,
    host: &'a dyn ResolveHost,
    occurrence: &'a StepOccurrence,
    range: TextRange,
}

impl<'a> StepReference<'a> {
    pub(crate) fn new(
        provider: &'a StepReferenceProvider,
        host: &'a dyn ResolveHost,
        occurrence: &'a StepOccurrence,
        range: TextRange,
    ) -> Self {
        Self {
            provider,
            host,
            occurrence,
            range,
        }
    }

    /// Range of the referenceable text, local to the step.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn occurrence(&self) -> &StepOccurrence {
        self.occurrence
    }

    /// Single-valued resolution: a declaration only when exactly one
    /// matches. Ambiguity is observable solely through [`resolve_all`].
    ///
    /// [`resolve_all`]: Self::resolve_all
    pub fn resolve(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<DeclarationHandle>, Cancelled> {
        let resolved = self.resolve_all(true, cancel)?;
        Ok(resolved.single().cloned())
    }

    /// All matching declarations, deduplicated by identity.
    pub fn resolve_all(
        &self,
        incomplete: bool,
        cancel: &CancellationToken,
    ) -> Result<ResolutionResult, Cancelled> {
        self.provider.resolve_all(self.host, self.occurrence, incomplete, cancel)
    }

    /// Whether this reference points at `declaration`, per the host's
    /// equivalence relation over every resolved declaration.
    pub fn is_reference_to(
        &self,
        declaration: &DeclarationHandle,
        cancel: &CancellationToken,
    ) -> Result<bool, Cancelled> {
        let resolved = self.resolve_all(false, cancel)?;
        Ok(resolved.iter().any(|d| self.host.elements_equivalent(d, declaration)))
    }

    /// Verbatim occurrence text, keyword included.
    pub fn canonical_text(&self) -> &str {
        self.occurrence.text()
    }

    /// Renaming the step text through its reference is not supported.
    pub fn handle_rename(
        &self,
        _new_name: &str,
    ) -> &StepOccurrence {
        self.occurrence
    }

    /// Rebinding to another declaration is not supported.
    pub fn bind_to(
        &self,
        _declaration: &DeclarationHandle,
    ) -> &StepOccurrence {
        self.occurrence
    }

    /// An unresolved step is a reportable problem, never silently ignored.
    pub fn is_soft(&self) -> bool {
        false
    }
}
