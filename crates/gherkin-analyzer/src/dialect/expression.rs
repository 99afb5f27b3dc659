//! Step pattern compilation.
//!
//! Dialects store patterns in one of two source forms: a slash-delimited
//! regular expression (`/^I buy (\d+) apples$/`) or a Cucumber expression
//! (`I buy {int} apples`). Both compile to an anchored [`Regex`]. Compiled
//! patterns are memoized per dialect in a [`PatternCache`]; a pattern that
//! fails to compile matches nothing and never aborts resolution.

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use tracing::{debug, warn};

/// Concurrent memo of compiled patterns, keyed by pattern source.
///
/// Failed compilations are cached too, so a broken definition costs one
/// warning rather than one per query.
#[derive(Default)]
pub struct PatternCache {
    compiled: DashMap<String, Option<Arc<Regex>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-text match of `pattern` against one step-text variant.
    pub fn matches(
        &self,
        pattern: &str,
        text: &str,
    ) -> bool {
        if let Some(entry) = self.compiled.get(pattern) {
            return entry.as_ref().is_some_and(|re| re.is_match(text));
        }
        let compiled = compile_pattern(pattern).map(Arc::new);
        let hit = compiled.as_ref().is_some_and(|re| re.is_match(text));
        self.compiled.insert(pattern.to_owned(), compiled);
        hit
    }
}

/// Compile a pattern source into an anchored regex.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    let source = if let Some(inner) = pattern.strip_prefix('/').and_then(|rest| rest.strip_suffix('/')) {
        format!("^(?:{inner})$")
    } else {
        expression_to_regex(pattern)?
    };
    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(error) => {
            warn!("invalid step pattern {pattern:?}: {error}");
            None
        },
    }
}

/// Translate a Cucumber expression into regex source.
///
/// Supports the parameter types `{int}`, `{float}`, `{word}`, `{string}` and
/// `{}`/`{anonymous}`, optional text `(s)`, alternation `one/two` and
/// backslash escapes. An unknown parameter type yields `None`.
fn expression_to_regex(expression: &str) -> Option<String> {
    let mut out = String::from("^");
    let mut word = WordBuffer::default();
    let mut chars = expression.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                word.push_literal(chars.next()?);
            },
            '{' => {
                word.flush(&mut out);
                let name = take_until(&mut chars, '}')?;
                let Some(pattern) = parameter_pattern(name.trim()) else {
                    debug!("unknown parameter type {{{name}}} in expression {expression:?}");
                    return None;
                };
                out.push_str(pattern);
            },
            '(' => {
                word.flush(&mut out);
                let text = take_until(&mut chars, ')')?;
                out.push_str("(?:");
                out.push_str(&regex::escape(&text));
                out.push_str(")?");
            },
            '/' => {
                word.break_alternative();
            },
            ' ' | '\t' => {
                word.flush(&mut out);
                out.push(c);
            },
            other => {
                word.push_literal(other);
            },
        }
    }
    word.flush(&mut out);
    out.push('$');
    Some(out)
}

fn take_until(
    chars: &mut std::str::Chars<'_>,
    close: char,
) -> Option<String> {
    let mut text = String::new();
    for c in chars {
        if c == close {
            return Some(text);
        }
        text.push(c);
    }
    None
}

fn parameter_pattern(name: &str) -> Option<&'static str> {
    match name {
        "int" => Some(r"-?\d+"),
        "float" => Some(r"[+-]?(?:\d+\.\d*|\.\d+|\d+)"),
        "word" => Some(r"[^\s]+"),
        "string" => Some(r#"(?:"[^"]*"|'[^']*')"#),
        "" | "anonymous" => Some(".*"),
        _ => None,
    }
}

/// Accumulates one space-delimited word of an expression so that alternation
/// (`cat/dog`) can be grouped once the word ends.
#[derive(Default)]
struct WordBuffer {
    parts: Vec<String>,
    current: String,
}

impl WordBuffer {
    fn push_literal(
        &mut self,
        c: char,
    ) {
        let mut buf = [0u8; 4];
        self.current.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }

    fn break_alternative(&mut self) {
        self.parts.push(std::mem::take(&mut self.current));
    }

    fn flush(
        &mut self,
        out: &mut String,
    ) {
        if self.parts.is_empty() {
            out.push_str(&self.current);
            self.current.clear();
            return;
        }
        let parts = std::mem::take(&mut self.parts);
        let last = std::mem::take(&mut self.current);
        out.push_str("(?:");
        for (i, part) in parts.iter().chain(std::iter::once(&last)).enumerate() {
            if i > 0 {
                out.push('|');
            }
            out.push_str(part);
        }
        out.push(')');
    }
}

#[cfg(test)]
#[path = "../../tests/src/dialect/expression_tests.rs"]
mod tests;
