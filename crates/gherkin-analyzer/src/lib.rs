pub mod cancel;
pub mod check;
pub mod config;
pub mod dialect;
pub mod document;
pub mod host;
pub mod reference;
pub mod syntax;
pub mod vfs;

pub use cancel::{CancellationToken, Cancelled};
pub use dialect::{DialectId, DialectRegistry, JsStepsDialect, RustStepsDialect, StepDialect};
pub use document::{DocumentStore, FeatureDocument};
pub use host::{ResolveHost, ScopeId};
pub use reference::{
    DeclarationHandle, DefinitionIndex, ResolutionResult, StepDefinition, StepReference,
    StepReferenceProvider,
};
pub use syntax::{OccurrenceKey, StepOccurrence, StepTokenKind, TextRange};
pub use vfs::FileId;
