// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Cursor over a token slice.
//!
//! Every production parser works on a [`Cursor`] over its own part of the
//! token stream. Spans stay absolute, so an error raised while parsing the end
//! of a range still points into the original text.
//!
//! ```text
//! Source Text → Lexer → Tokens → Cursor → Production parsers
//! ```

use crate::error::{ParseError, ParseErrorKind, ParseResult, Span};
use crate::lexer::{SpannedToken, Token};

/// Position within a slice of spanned tokens.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'t, 'src> {
    tokens: &'t [SpannedToken<'src>],
    pos: usize,
    eof: usize,
}

impl<'t, 'src> Cursor<'t, 'src> {
    /// `eof` is the byte offset reported for errors at the end of the slice.
    pub fn new(tokens: &'t [SpannedToken<'src>], eof: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
        }
    }

    pub fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|t| t.0)
    }

    pub fn bump(&mut self) -> Option<SpannedToken<'src>> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the next token if it equals `token`.
    pub fn eat(&mut self, token: Token<'src>) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span of the next token, or an empty span at the end of input.
    pub fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or(Span::new(self.eof, self.eof), |t| t.1)
    }

    /// Span covering every remaining token.
    pub fn rest_span(&self) -> Span {
        match (self.tokens.get(self.pos), self.tokens.last()) {
            (Some(first), Some(last)) => first.1.to(last.1),
            _ => Span::new(self.eof, self.eof),
        }
    }

    pub fn eof_offset(&self) -> usize {
        self.eof
    }

    /// Consume a run of exactly `width` digits.
    ///
    /// Fails with `message` on anything else, including a longer run.
    pub fn digits(
        &mut self,
        width: usize,
        kind: ParseErrorKind,
        message: &str,
    ) -> ParseResult<(&'src str, Span)> {
        let span = self.span();
        match self.peek() {
            Some(Token::Digits(s)) if s.len() == width => {
                self.pos += 1;
                Ok((s, span))
            }
            _ => Err(ParseError::at(kind, message, span)),
        }
    }
}

/// Split a token slice on every [`Token::Slash`].
///
/// The result always has one more part than there are slashes; parts may be
/// empty.
pub(crate) fn split_on_slash<'t, 'src>(
    tokens: &'t [SpannedToken<'src>],
) -> Vec<&'t [SpannedToken<'src>]> {
    tokens
        .split(|t| matches!(t.0, Token::Slash))
        .collect()
}

/// Parse a run of ASCII digits into an integer.
pub(crate) fn parse_number<N>(digits: &str) -> Option<N>
where
    N: lexical::FromLexical,
{
    lexical::parse::<N, _>(digits).ok()
}
