//! The narrow seam between the resolution engine and its host.

use crate::{reference::DeclarationHandle, syntax::StepOccurrence};

/// Opaque identity of a resolvable scope (a module, project or directory
/// boundary). The engine only ever passes it through to dialects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(String);

impl ScopeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Host collaborators the engine depends on.
///
/// The modification stamp must increase monotonically on every structural
/// document change; it is the single source of truth for cache invalidation
/// and is read once per query.
pub trait ResolveHost: Send + Sync {
    /// Current value of the host's modification counter.
    fn modification_stamp(&self) -> u64;

    /// The scope a step occurrence resolves within, or `None` when the
    /// occurrence is not attached to any resolvable scope.
    fn enclosing_scope(
        &self,
        occurrence: &StepOccurrence,
    ) -> Option<ScopeId>;

    /// Whether two declaration handles denote the same declaration. Identity
    /// equality by default; hosts with aliased handles override this.
    fn elements_equivalent(
        &self,
        a: &DeclarationHandle,
        b: &DeclarationHandle,
    ) -> bool {
        a == b
    }
}
