use std::collections::HashSet;

use serde::Serialize;

use crate::reference::step_def::DeclarationHandle;

/// The set of declarations a step resolved to.
///
/// Deduplicated by declaration identity; first-seen order is kept for
/// stable output but carries no ranking semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    declarations: Vec<DeclarationHandle>,
}

impl ResolutionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result, dropping duplicate identities.
    pub fn new(declarations: Vec<DeclarationHandle>) -> Self {
        let mut seen = HashSet::new();
        let declarations = declarations.into_iter().filter(|d| seen.insert(d.clone())).collect();
        Self {
            declarations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclarationHandle> {
        self.declarations.iter()
    }

    pub fn declarations(&self) -> &[DeclarationHandle] {
        &self.declarations
    }

    /// The declaration, but only when the resolution is unambiguous.
    pub fn single(&self) -> Option<&DeclarationHandle> {
        match self.declarations.as_slice() {
            [declaration] => Some(declaration),
            _ => None,
        }
    }
}
