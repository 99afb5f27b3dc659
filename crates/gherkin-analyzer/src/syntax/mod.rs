//! Step-line tokens and occurrences.

pub mod kind;
pub mod lexer;
pub mod step;

pub use kind::StepTokenKind;
pub use lexer::Lexer;
pub use step::{OccurrenceKey, StepOccurrence, StepToken, TextRange};
