use logos::Logos;

use crate::syntax::kind::{StepTokenKind, TokenKind};

/// A lexer that wraps `logos::Lexer` to produce `StepTokenKind` tokens.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (StepTokenKind, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let token_result = self.inner.next()?;
        let text = self.inner.slice();

        let kind = match token_result {
            Ok(token) => token.into(),
            Err(_) => StepTokenKind::Error,
        };

        Some((kind, text))
    }
}
