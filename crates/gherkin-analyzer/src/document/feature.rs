//! Feature-file walking.
//!
//! A deliberately small reading of the Gherkin surface: enough structure to
//! find step lines and their byte offsets. Tables, docstrings and comments
//! are skipped; everything else about the document tree stays the host's
//! business.

use crate::{
    syntax::{StepOccurrence, step::is_step_keyword},
    vfs::FileId,
};

/// One parsed feature document and the step occurrences found in it.
#[derive(Debug, Clone)]
pub struct FeatureDocument {
    file: FileId,
    text: String,
    steps: Vec<StepOccurrence>,
}

impl FeatureDocument {
    pub fn parse(
        file: FileId,
        text: String,
    ) -> Self {
        let steps = collect_steps(&file, &text);
        Self {
            file,
            text,
            steps,
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn steps(&self) -> &[StepOccurrence] {
        &self.steps
    }

    /// 1-based line of a byte offset, for reporting.
    pub fn line_of(
        &self,
        offset: u32,
    ) -> u32 {
        let offset = (offset as usize).min(self.text.len());
        self.text[..offset].bytes().filter(|&b| b == b'\n').count() as u32 + 1
    }
}

fn collect_steps(
    file: &FileId,
    text: &str,
) -> Vec<StepOccurrence> {
    let mut steps = Vec::new();
    let mut offset = 0usize;
    let mut docstring: Option<&str> = None;

    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim_start();

        if let Some(delimiter) = docstring {
            if trimmed.starts_with(delimiter) {
                docstring = None;
            }
        } else if let Some(delimiter) = ["\"\"\"", "```"].into_iter().find(|d| trimmed.starts_with(d)) {
            docstring = Some(delimiter);
        } else if is_step_line(trimmed) {
            let indent = line.len() - trimmed.len();
            steps.push(StepOccurrence::parse(
                file.clone(),
                (offset + indent) as u32,
                trimmed,
            ));
        }

        offset += raw_line.len() + 1;
    }

    steps
}

/// A step line starts with a step keyword standing alone or followed by
/// whitespace. Comments, table rows and Gherkin structure lines
/// (`Feature:`, `Scenario:`…) never qualify.
fn is_step_line(trimmed: &str) -> bool {
    if trimmed.starts_with('#') || trimmed.starts_with('|') {
        return false;
    }
    trimmed.split_whitespace().next().is_some_and(is_step_keyword)
}

#[cfg(test)]
#[path = "../../tests/src/document/feature_tests.rs"]
mod tests;
