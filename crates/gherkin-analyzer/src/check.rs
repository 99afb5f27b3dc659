//! The `check` workflow: resolve every step of a feature tree against the
//! step definitions discovered under a directory, and report the outcome.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    cancel::{CancellationToken, Cancelled},
    config::DialectToggles,
    dialect::{DialectRegistry, JsStepsDialect, RustStepsDialect},
    document::DocumentStore,
    host::ScopeId,
    reference::{DeclarationHandle, StepDefinition, StepReferenceProvider},
    vfs::FileId,
};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no feature files found under {}", .0.display())]
    NoFeatures(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Resolved,
    Ambiguous,
    Unresolved,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub line: u32,
    pub text: String,
    pub status: StepStatus,
    pub declarations: Vec<DeclarationHandle>,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: FileId,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    pub resolved: usize,
    pub ambiguous: usize,
    pub unresolved: usize,
}

impl CheckReport {
    /// Ambiguity is reported but tolerated; only unresolved steps fail a
    /// check run.
    pub fn is_clean(&self) -> bool {
        self.unresolved == 0
    }
}

/// Registry with the built-in dialects enabled by configuration.
pub fn build_registry(toggles: &DialectToggles) -> DialectRegistry {
    let mut registry = DialectRegistry::new();
    if toggles.rust {
        registry.register(Arc::new(RustStepsDialect::new()));
    }
    if toggles.js {
        registry.register(Arc::new(JsStepsDialect::new()));
    }
    registry
}

/// Resolve every step under `features` against the definitions under
/// `steps`.
pub fn run_check(
    features: &Path,
    steps: &Path,
    toggles: &DialectToggles,
) -> Result<CheckReport, CheckError> {
    let provider = StepReferenceProvider::new(build_registry(toggles));
    let store = DocumentStore::new(ScopeId::new(steps.display().to_string()));

    let mut documents = Vec::new();
    for entry in WalkDir::new(features)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if entry.path().extension().and_then(|e| e.to_str()) != Some("feature") {
            continue;
        }
        let text = std::fs::read_to_string(entry.path()).map_err(|source| CheckError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        documents.push(store.open(FileId::from_path(entry.path()), text));
    }
    if documents.is_empty() {
        return Err(CheckError::NoFeatures(features.to_path_buf()));
    }

    let cancel = CancellationToken::new();
    let mut report = CheckReport::default();
    for document in &documents {
        let mut step_reports = Vec::new();
        for step in document.steps() {
            let Some(reference) = provider.reference_for(&store, step) else {
                debug!(
                    "skipping step without referenceable text at {}:{}",
                    document.file(),
                    document.line_of(step.offset())
                );
                continue;
            };
            let resolved = match reference.resolve_all(false, &cancel) {
                Ok(resolved) => resolved,
                Err(Cancelled) => continue,
            };
            let status = match resolved.len() {
                0 => StepStatus::Unresolved,
                1 => StepStatus::Resolved,
                _ => StepStatus::Ambiguous,
            };
            match status {
                StepStatus::Resolved => report.resolved += 1,
                StepStatus::Ambiguous => report.ambiguous += 1,
                StepStatus::Unresolved => report.unresolved += 1,
            }
            step_reports.push(StepReport {
                line: document.line_of(step.offset()),
                text: step.text().to_owned(),
                status,
                declarations: resolved.declarations().to_vec(),
            });
        }
        report.files.push(FileReport {
            file: document.file().clone(),
            steps: step_reports,
        });
    }

    provider.log_perf_summary();
    info!(
        "checked {} feature file(s): {} resolved, {} ambiguous, {} unresolved",
        report.files.len(),
        report.resolved,
        report.ambiguous,
        report.unresolved
    );
    Ok(report)
}

/// All step definitions the enabled dialects discover under `steps`.
pub fn list_definitions(
    steps: &Path,
    toggles: &DialectToggles,
) -> Vec<StepDefinition> {
    let registry = build_registry(toggles);
    let scope = ScopeId::new(steps.display().to_string());
    let listing_document = FileId::new("steps://listing");
    let mut definitions = Vec::new();
    for dialect in registry.iter() {
        definitions.extend(dialect.load_definitions(&listing_document, &scope));
    }
    definitions
}

#[cfg(test)]
#[path = "../tests/src/check_tests.rs"]
mod tests;
