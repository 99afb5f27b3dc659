//! Step definitions written in cucumber-js style.
//!
//! Scans JavaScript/TypeScript sources for `Given(…)`, `When(…)` and
//! `Then(…)` calls whose first argument is a string literal (a Cucumber
//! expression) or a slash-delimited regex literal. The call site itself is
//! the declaration; cucumber-js step bodies are usually anonymous, so the
//! pattern source doubles as the declaration name.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    dialect::{DialectId, StepDialect, expression::PatternCache},
    host::ScopeId,
    reference::{DeclarationHandle, StepDefinition, span},
    syntax::StepOccurrence,
    vfs::FileId,
};

pub const JS_DIALECT: DialectId = DialectId::new("js");

const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts"];

static STEP_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:Given|When|Then)\s*\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|/((?:[^/\\]|\\.)+)/)"#,
    )
    .unwrap()
});

pub struct JsStepsDialect {
    patterns: PatternCache,
}

impl Default for JsStepsDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl JsStepsDialect {
    pub fn new() -> Self {
        Self {
            patterns: PatternCache::new(),
        }
    }

    /// Extract all step definitions from one JS/TS source text.
    pub fn scan_source(
        file: &FileId,
        source: &str,
    ) -> Vec<StepDefinition> {
        let mut definitions = Vec::new();
        for (line_idx, line) in source.lines().enumerate() {
            for capture in STEP_CALL.captures_iter(line) {
                let pattern = if let Some(regex) = capture.get(3) {
                    format!("/{}/", regex.as_str())
                } else {
                    let literal = capture.get(1).or_else(|| capture.get(2));
                    match literal {
                        Some(m) => unescape(m.as_str()),
                        None => continue,
                    }
                };
                definitions.push(StepDefinition {
                    dialect: JS_DIALECT,
                    declaration: DeclarationHandle {
                        file: file.clone(),
                        line: line_idx as u32 + 1,
                        name: pattern.clone(),
                    },
                    pattern,
                });
            }
        }
        definitions
    }
}

impl StepDialect for JsStepsDialect {
    fn id(&self) -> DialectId {
        JS_DIALECT
    }

    fn step_text(
        &self,
        occurrence: &StepOccurrence,
    ) -> Option<String> {
        span::reference_text(occurrence).map(str::to_owned)
    }

    fn load_definitions(
        &self,
        _document: &FileId,
        scope: &ScopeId,
    ) -> Vec<StepDefinition> {
        let mut definitions = Vec::new();
        for entry in WalkDir::new(scope.as_str())
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let extension = entry.path().extension().and_then(|e| e.to_str());
            if !extension.is_some_and(|e| JS_EXTENSIONS.contains(&e)) {
                continue;
            }
            let Ok(source) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            let file = FileId::from_path(entry.path());
            definitions.extend(Self::scan_source(&file, &source));
        }
        debug!("js dialect loaded {} definitions from {}", definitions.len(), scope.as_str());
        definitions
    }

    fn matches(
        &self,
        definition: &StepDefinition,
        step_text: &str,
    ) -> bool {
        self.patterns.matches(&definition.pattern, step_text)
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src/dialect/js_steps_tests.rs"]
mod tests;
