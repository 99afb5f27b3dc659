//! Step definitions written with cucumber-rs attribute macros.
//!
//! Scans Rust sources for `#[given(..)]` / `#[when(..)]` / `#[then(..)]`
//! attributes and records the annotated function as the declaration site.
//! Three pattern forms are recognized:
//!
//! - `#[given("I buy 3 apples")]`, a literal Cucumber expression,
//! - `#[given(expr = "I buy {int} apples")]`, an explicit expression,
//! - `#[given(regex = r"^I buy (\d+) apples$")]`, a regular expression,
//!   stored slash-delimited so the matcher knows not to escape it.

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

pub const RUST_DIALECT: DialectId = DialectId::new("rust");

/// How many lines below an attribute the annotated `fn` may sit (further
/// attributes and doc lines in between are skipped).
const FN_LOOKAHEAD_LINES: usize = 8;

static STEP_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#\[\s*(?:given|when|then)\s*\((.*)\)\s*\]\s*$").unwrap());

static FN_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

pub struct RustStepsDialect {
    patterns: PatternCache,
}

impl Default for RustStepsDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl RustStepsDialect {
    pub fn new() -> Self {
        Self {
            patterns: PatternCache::new(),
        }
    }

    /// Extract all step definitions from one Rust source text.
    pub fn scan_source(
        file: &FileId,
        source: &str,
    ) -> Vec<StepDefinition> {
        let lines: Vec<&str> = source.lines().collect();
        let mut definitions = Vec::new();
        for (line_idx, line) in lines.iter().enumerate() {
            let Some(capture) = STEP_ATTRIBUTE.captures(line) else {
                continue;
            };
            let Some(pattern) = parse_attribute_args(&capture[1]) else {
                debug!("unrecognized step attribute on {file}:{}", line_idx + 1);
                continue;
            };
            let (decl_line, name) = find_fn_item(&lines, line_idx + 1)
                .unwrap_or((line_idx, pattern.clone()));
            definitions.push(StepDefinition {
                dialect: RUST_DIALECT,
                pattern,
                declaration: DeclarationHandle {
                    file: file.clone(),
                    line: decl_line as u32 + 1,
                    name,
                },
            });
        }
        definitions
    }
}

impl StepDialect for RustStepsDialect {
    fn id(&self) -> DialectId {
        RUST_DIALECT
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
            if entry.path().extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            let Ok(source) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            let file = FileId::from_path(entry.path());
            definitions.extend(Self::scan_source(&file, &source));
        }
        debug!("rust dialect loaded {} definitions from {}", definitions.len(), scope.as_str());
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

/// Pattern source from the attribute's argument list, or `None` when the
/// arguments are not a recognized form.
fn parse_attribute_args(args: &str) -> Option<String> {
    let args = args.trim();
    if let Some(value) = strip_named_arg(args, "regex") {
        return parse_string_literal(value).map(|re| format!("/{re}/"));
    }
    if let Some(value) = strip_named_arg(args, "expr") {
        return parse_string_literal(value);
    }
    parse_string_literal(args)
}

fn strip_named_arg<'a>(
    args: &'a str,
    name: &str,
) -> Option<&'a str> {
    let rest = args.strip_prefix(name)?.trim_start();
    rest.strip_prefix('=').map(str::trim)
}

/// Decode a Rust string literal: `"…"`, `r"…"` or `r#"…"#`.
fn parse_string_literal(literal: &str) -> Option<String> {
    let literal = literal.trim().trim_end_matches(',').trim_end();
    if let Some(rest) = literal.strip_prefix("r#\"") {
        return rest.strip_suffix("\"#").map(str::to_owned);
    }
    if let Some(rest) = literal.strip_prefix("r\"") {
        return rest.strip_suffix('"').map(str::to_owned);
    }
    let rest = literal.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(rest))
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

/// The next `fn` item at or below `from`, skipping over further attributes.
fn find_fn_item(
    lines: &[&str],
    from: usize,
) -> Option<(usize, String)> {
    for (offset, line) in lines.iter().skip(from).take(FN_LOOKAHEAD_LINES).enumerate() {
        if let Some(capture) = FN_ITEM.captures(line) {
            return Some((from + offset, capture[1].to_owned()));
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src/dialect/rust_steps_tests.rs"]
mod tests;
