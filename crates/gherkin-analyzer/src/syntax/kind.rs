use logos::Logos;

/// Semantic token kinds of a single step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum StepTokenKind {
    Error = 0,
    WhiteSpace,
    /// Leading step keyword (`Given`, `When`, `Then`, `And`, `But`, `*`).
    Keyword,
    /// A run of plain step text.
    Text,
    /// A scenario-outline parameter, braces included (`<quantity>`).
    Parameter,
    /// A trailing line comment (`# …`).
    Comment,
    /// A table-cell separator; never part of the step text proper.
    Pipe,
}

impl StepTokenKind {
    /// Tokens that can open or extend the referenceable span of a step.
    pub fn is_text_or_parameter(self) -> bool {
        matches!(self, Self::Text | Self::Parameter)
    }
}

/// Raw lexer tokens. `Keyword` is not produced here: keywords are plain
/// words to the lexer and are promoted during step construction.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t]+")]
    WhiteSpace,

    #[regex(r"<[^<>\r\n]*>")]
    Parameter,

    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    Comment,

    #[token("|")]
    Pipe,

    #[regex(r"[^ \t<#|\r\n]+")]
    #[token("<")]
    Text,
}

impl From<TokenKind> for StepTokenKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::WhiteSpace => Self::WhiteSpace,
            TokenKind::Parameter => Self::Parameter,
            TokenKind::Comment => Self::Comment,
            TokenKind::Pipe => Self::Pipe,
            TokenKind::Text => Self::Text,
        }
    }
}
