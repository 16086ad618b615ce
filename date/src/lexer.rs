// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for the formal date alphabet.
//!
//! The grammar is case-sensitive ASCII. Anything outside the alphabet becomes
//! a [`Token::Error`] so the parsers can report it at its exact position.

use std::fmt::{self, Display};

use logos::Logos;

use crate::error::Span;

/// Tokenize a formal date string into spanned tokens.
#[must_use]
pub fn tokenize(src: &str) -> Vec<SpannedToken<'_>> {
    Token::lexer(src)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(tok) => SpannedToken(tok, Span::from(span)),
            Err(()) => SpannedToken(Token::Error, Span::from(span)),
        })
        .collect()
}

/// Token emitted by the formal date lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Plus sign (+), a year or offset sign
    #[token("+")]
    Plus,

    /// Hyphen (-), a negative sign or a date separator
    #[token("-")]
    Minus,

    /// Colon (:), the time separator
    #[token(":")]
    Colon,

    /// Solidus (/), the range separator
    #[token("/")]
    Slash,

    /// A run of ASCII digits
    #[regex("[0-9]+")]
    Digits(&'a str),

    /// `A`, approximate marker
    #[token("A")]
    Approximate,

    /// `P`, duration marker
    #[token("P")]
    Period,

    /// `R`, recurrence marker
    #[token("R")]
    Repeat,

    /// `T`, time designator
    #[token("T")]
    Time,

    /// `Z`, the UTC offset
    #[token("Z")]
    Zulu,

    /// `Y`, years designator
    #[token("Y")]
    Year,

    /// `M`, months designator before `T`, minutes designator after it
    #[token("M")]
    MonthOrMinute,

    /// `D`, days designator
    #[token("D")]
    Day,

    /// `H`, hours designator
    #[token("H")]
    Hour,

    /// `S`, seconds designator
    #[token("S")]
    Second,

    /// Error token for characters outside the alphabet
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Colon => write!(f, ":"),
            Self::Slash => write!(f, "/"),
            Self::Digits(s) => write!(f, "{s}"),
            Self::Approximate => write!(f, "A"),
            Self::Period => write!(f, "P"),
            Self::Repeat => write!(f, "R"),
            Self::Time => write!(f, "T"),
            Self::Zulu => write!(f, "Z"),
            Self::Year => write!(f, "Y"),
            Self::MonthOrMinute => write!(f, "M"),
            Self::Day => write!(f, "D"),
            Self::Hour => write!(f, "H"),
            Self::Second => write!(f, "S"),
            Self::Error => write!(f, "<error>"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its associated span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);

impl Display for SpannedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    fn kinds(src: &str) -> Vec<Token<'_>> {
        tokenize(src).into_iter().map(|t| t.0).collect()
    }

    #[test]
    fn tokenizes_simple_date() {
        assert_eq!(
            kinds("+1999-05-12T10:30:00Z"),
            vec![
                Plus,
                Digits("1999"),
                Minus,
                Digits("05"),
                Minus,
                Digits("12"),
                Time,
                Digits("10"),
                Colon,
                Digits("30"),
                Colon,
                Digits("00"),
                Zulu,
            ]
        );
    }

    #[test]
    fn tokenizes_recurring_duration() {
        assert_eq!(
            kinds("R3/A-0012/P1Y2MT3M"),
            vec![
                Repeat,
                Digits("3"),
                Slash,
                Approximate,
                Minus,
                Digits("0012"),
                Slash,
                Period,
                Digits("1"),
                Year,
                Digits("2"),
                MonthOrMinute,
                Time,
                Digits("3"),
                MonthOrMinute,
            ]
        );
    }

    #[test]
    fn records_spans() {
        let tokens = tokenize("+2000/P10D");
        let spans: Vec<_> = tokens.iter().map(|t| t.1).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 1),
                Span::new(1, 5),
                Span::new(5, 6),
                Span::new(6, 7),
                Span::new(7, 9),
                Span::new(9, 10),
            ]
        );
    }

    #[test]
    fn unknown_characters_become_errors() {
        for src in ["+1999 ", "p1y", "+1999-05-12t10", "+19.9", "\u{2212}1999"] {
            assert!(kinds(src).contains(&Error), "{src} should contain an error token");
        }
    }
}
