//! Referenceable span of a step.

use crate::syntax::{StepOccurrence, StepTokenKind, TextRange};

/// The minimal contiguous range covering a step's descriptive text and
/// embedded parameters, excluding the keyword and trailing whitespace but
/// keeping whitespace between adjacent text/parameter tokens.
///
/// `None` when the step has no text or parameter tokens at all; no reference
/// is constructed in that case.
pub fn reference_span(occurrence: &StepOccurrence) -> Option<TextRange> {
    let mut tokens = occurrence.tokens().iter();
    let first = tokens.find(|t| t.kind.is_text_or_parameter())?;

    let start = first.range.start;
    let mut end_before_space = first.range.end;
    for token in tokens {
        match token.kind {
            StepTokenKind::WhiteSpace => {
                // The boundary sticks here; it moves again only if more
                // text or parameters follow.
            },
            StepTokenKind::Text | StepTokenKind::Parameter => {
                end_before_space = token.range.end;
            },
            _ => break,
        }
    }

    Some(TextRange::new(start, end_before_space))
}

/// Step text within the referenceable span, when one exists.
pub fn reference_text(occurrence: &StepOccurrence) -> Option<&str> {
    reference_span(occurrence).map(|range| occurrence.slice(range))
}

#[cfg(test)]
#[path = "../../tests/src/reference/span_tests.rs"]
mod tests;
