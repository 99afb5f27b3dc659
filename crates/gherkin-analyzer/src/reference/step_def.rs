use serde::Serialize;

use crate::{dialect::DialectId, vfs::FileId};

/// One executable step definition, as produced by a dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StepDefinition {
    /// Dialect that produced this definition and owns its pattern language.
    pub dialect: DialectId,
    /// Pattern source. Opaque to the resolver; only the owning dialect
    /// interprets it.
    pub pattern: String,
    /// Declaration site the definition lives at.
    pub declaration: DeclarationHandle,
}

/// Identity of a declaration site, managed by the host.
///
/// The resolver never looks inside; it dedups by equality and lets
/// [`ResolveHost::elements_equivalent`](crate::host::ResolveHost) decide
/// anything finer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeclarationHandle {
    /// File the declaration lives in.
    pub file: FileId,
    /// 1-based line.
    pub line: u32,
    /// Display name (function name, or the pattern itself for anonymous
    /// definitions).
    pub name: String,
}
