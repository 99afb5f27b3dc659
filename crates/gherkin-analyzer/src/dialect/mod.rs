//! Step-definition dialects.
//!
//! A dialect understands one way of writing executable step definitions:
//! which files hold them, how their patterns are written, and how a pattern
//! matches a step. The resolver treats all of this as opaque: it only drives
//! the capability set below and dedups the declarations that come back.

pub mod expression;
pub mod js_steps;
pub mod rust_steps;

use std::sync::Arc;

use serde::Serialize;

use crate::{
    host::ScopeId,
    reference::StepDefinition,
    syntax::StepOccurrence,
    vfs::FileId,
};

pub use js_steps::JsStepsDialect;
pub use rust_steps::RustStepsDialect;

/// Tag identifying a dialect. Opaque to the resolver; used to route a
/// definition back to the dialect that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DialectId(&'static str);

impl DialectId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for DialectId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// One implementation dialect for step definitions.
pub trait StepDialect: Send + Sync {
    fn id(&self) -> DialectId;

    /// The step text this dialect would match against, or `None` when it
    /// cannot interpret the occurrence. An empty string counts for nothing.
    fn step_text(
        &self,
        occurrence: &StepOccurrence,
    ) -> Option<String>;

    /// All step definitions of this dialect visible to `document` within
    /// `scope`. Returning nothing is not a failure; the union over all
    /// dialects is what the index stores.
    fn load_definitions(
        &self,
        document: &FileId,
        scope: &ScopeId,
    ) -> Vec<StepDefinition>;

    /// Whether definitions of this dialect can apply to the occurrence at
    /// all. Checked per candidate before any pattern matching.
    fn supports(
        &self,
        occurrence: &StepOccurrence,
    ) -> bool {
        let _ = occurrence;
        true
    }

    /// Test one definition's pattern against one step-text variant.
    fn matches(
        &self,
        definition: &StepDefinition,
        step_text: &str,
    ) -> bool;
}

/// Ordered collection of registered dialects.
///
/// Iteration order is insertion order; it does not affect correctness
/// because resolution results dedup by declaration identity.
#[derive(Default)]
pub struct DialectRegistry {
    dialects: Vec<Arc<dyn StepDialect>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        dialect: Arc<dyn StepDialect>,
    ) {
        self.dialects.push(dialect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn StepDialect>> {
        self.dialects.iter()
    }

    /// First registered dialect with the given tag.
    pub fn by_id(
        &self,
        id: DialectId,
    ) -> Option<&Arc<dyn StepDialect>> {
        self.dialects.iter().find(|d| d.id() == id)
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
