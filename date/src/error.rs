// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error and span types shared by every parser and by the date arithmetic.

use std::fmt::{self, Display};
use std::ops::Range;

/// A span representing a byte range in the parsed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end positions
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert to a standard range
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn to(self, other: Span) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The production of the formal grammar that rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ParseErrorKind {
    /// A simple date, `±YYYY[-MM[-DD]][Thh[:mm[:ss]][tz]]`
    #[strum(serialize = "Date")]
    Date,

    /// A duration, `P[nY][nM][nD][T[nH][nM][nS]]`
    #[strum(serialize = "Duration")]
    Duration,

    /// An approximate date, `A` followed by a simple date
    #[strum(serialize = "Approximate Date")]
    Approximate,

    /// A closed or open range
    #[strum(serialize = "Range")]
    Range,

    /// A recurring date
    #[strum(serialize = "Recurring Date")]
    Recurring,
}

/// Malformed formal date input, or date arithmetic that has no valid result.
///
/// The message names the sub-part that failed, e.g. `Malformed Year` or
/// `Years out of order`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: {message}")]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    span: Option<Span>,
}

impl ParseError {
    /// Creates a new error without a source location.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Creates a new error pointing at `span` in the parsed text.
    #[must_use]
    pub fn at(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span: Some(span),
        }
    }

    /// Attach a span if the error does not carry one yet.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// The production that failed.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Human readable description of the failing sub-part.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the failure in the parsed text, if the error came from parsing.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.span
    }
}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_kind_and_message() {
        let err = ParseError::new(ParseErrorKind::Duration, "Years out of order");
        assert_eq!(err.to_string(), "Invalid Duration: Years out of order");

        let err = ParseError::at(ParseErrorKind::Recurring, "Malformed Count", Span::new(1, 3));
        assert_eq!(err.to_string(), "Invalid Recurring Date: Malformed Count");
        assert_eq!(err.span(), Some(Span::new(1, 3)));
    }

    #[test]
    fn keeps_first_span() {
        let err = ParseError::at(ParseErrorKind::Date, "Malformed Year", Span::new(1, 3))
            .or_span(Span::new(0, 10));
        assert_eq!(err.span(), Some(Span::new(1, 3)));

        let err = ParseError::new(ParseErrorKind::Range, "x").or_span(Span::new(0, 10));
        assert_eq!(err.span(), Some(Span::new(0, 10)));
    }

    #[test]
    fn joins_spans() {
        assert_eq!(Span::new(4, 6).to(Span::new(1, 2)), Span::new(1, 6));
        assert_eq!(Span::new(0, 9).into_range(), 0..9);
    }
}
