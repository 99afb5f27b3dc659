use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::{
    syntax::kind::StepTokenKind,
    syntax::lexer::Lexer,
    vfs::FileId,
};

/// Step keywords promoted from plain text during step construction.
static STEP_KEYWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["Given", "When", "Then", "And", "But", "*"]));

/// Whether `word` is a step keyword.
pub fn is_step_keyword(word: &str) -> bool {
    STEP_KEYWORDS.contains(word)
}

/// A half-open byte range, in the coordinate space of the owning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub const fn new(
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            start,
            end,
        }
    }

    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One token of a step line, with its step-local range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToken {
    pub kind: StepTokenKind,
    pub range: TextRange,
}

/// An immutable view of one step usage site in a document.
///
/// The document tree itself belongs to the host; an occurrence carries only
/// what resolution needs: the containing file, the step's byte offset within
/// it, the verbatim step text and its token stream. Occurrences are built per
/// query and discarded afterwards; only their [`OccurrenceKey`] identity
/// survives in caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOccurrence {
    file: FileId,
    offset: u32,
    text: String,
    tokens: Vec<StepToken>,
}

impl StepOccurrence {
    /// Lex a step line and promote a leading keyword token.
    pub fn parse(
        file: FileId,
        offset: u32,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let mut tokens = Vec::new();
        let mut pos: u32 = 0;
        let mut keyword_seen = false;
        for (mut kind, slice) in Lexer::new(&text) {
            let end = pos + slice.len() as u32;
            if !keyword_seen && kind != StepTokenKind::WhiteSpace {
                if kind == StepTokenKind::Text && STEP_KEYWORDS.contains(slice) {
                    kind = StepTokenKind::Keyword;
                }
                keyword_seen = true;
            }
            tokens.push(StepToken {
                kind,
                range: TextRange::new(pos, end),
            });
            pos = end;
        }
        Self {
            file,
            offset,
            text,
            tokens,
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    /// Byte offset of the step within its document.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Verbatim step text, keyword included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[StepToken] {
        &self.tokens
    }

    /// Slice the step text by a step-local range.
    pub fn slice(
        &self,
        range: TextRange,
    ) -> &str {
        &self.text[range.start as usize..range.end as usize]
    }

    /// Cache identity of this occurrence: file plus the absolute range the
    /// whole step covers in it.
    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            file: self.file.clone(),
            range: TextRange::new(self.offset, self.offset + self.text.len() as u32),
        }
    }
}

/// Stable identity of a step occurrence, usable as a cache key after the
/// occurrence itself is gone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    pub file: FileId,
    pub range: TextRange,
}
