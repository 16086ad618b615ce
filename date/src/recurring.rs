// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring dates, `R[n]/start/end-or-duration`.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::arithmetic::{add_duration, multiply_duration};
use crate::duration::Duration;
use crate::error::{ParseError, ParseErrorKind, ParseResult, Span};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::options::ParseOptions;
use crate::range::{DateRange, parse_range_parts};
use crate::scanner::{parse_number, split_on_slash};
use crate::simple::SimpleDate;

const KIND: ParseErrorKind = ParseErrorKind::Recurring;

/// A closed range repeated `count` times, or without bound.
///
/// Occurrence `k` starts at `start + k * duration`; occurrence 0 is the start
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurringDate {
    count: Option<u32>,
    range: DateRange,
    start: SimpleDate,
    duration: Duration,
    end: Option<SimpleDate>,
}

impl RecurringDate {
    /// Parse a recurring date with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the count or the range is malformed, or if
    /// the last occurrence falls outside years `-9999..=+9999`.
    pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let tokens = tokenize(src);
        parse_recurring(&tokens, src.len(), options)
    }

    /// Number of repetitions, `None` when unbounded.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    /// The repeated range.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Start of the first occurrence.
    #[must_use]
    pub const fn start(&self) -> &SimpleDate {
        &self.start
    }

    /// Interval between occurrences.
    #[must_use]
    pub const fn duration(&self) -> &Duration {
        &self.duration
    }

    /// Start of the last occurrence, `nth(count)`. `None` when unbounded.
    #[must_use]
    pub const fn end(&self) -> Option<&SimpleDate> {
        self.end.as_ref()
    }

    /// Whether the range was written with a leading `A`.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        self.range.is_approximate()
    }

    /// Start of occurrence `k`, `start + k * duration`.
    ///
    /// # Errors
    ///
    /// Fails if the scaled duration overflows or the result falls outside
    /// years `-9999..=+9999`.
    pub fn nth(&self, k: u32) -> Result<SimpleDate, ParseError> {
        let step = multiply_duration(&self.duration, k)?;
        add_duration(&self.start, &step)
    }

    /// Formal string for this recurring date.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }
}

impl Display for RecurringDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R")?;
        if let Some(count) = self.count {
            write!(f, "{count}")?;
        }
        write!(f, "/{}", self.range)
    }
}

impl FromStr for RecurringDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

/// Format Definition:
///
/// ```txt
/// recurring = "R" [n] "/" range
/// ```
///
/// Both sides of the range are required.
pub(crate) fn parse_recurring(
    tokens: &[SpannedToken<'_>],
    len: usize,
    options: &ParseOptions,
) -> ParseResult<RecurringDate> {
    let parts = split_on_slash(tokens);
    let &[head, opening, closing] = parts.as_slice() else {
        return Err(ParseError::at(
            KIND,
            "Must contain exactly 3 parts separated by /",
            Span::new(0, len),
        ));
    };

    let count = match head {
        [SpannedToken(Token::Repeat, _)] => None,
        [SpannedToken(Token::Repeat, _), SpannedToken(Token::Digits(digits), span)] => {
            let count = parse_number::<u32>(digits)
                .ok_or_else(|| ParseError::at(KIND, "Count out of range", *span))?;
            Some(count)
        }
        [SpannedToken(Token::Repeat, r), ..] => {
            let end = head.last().map_or(r.end, |t| t.1.end);
            return Err(ParseError::at(KIND, "Malformed Count", Span::new(r.end, end)));
        }
        _ => {
            let span = head.first().map_or(Span::new(0, 0), |t| t.1);
            return Err(ParseError::at(KIND, "Must begin with R", span));
        }
    };

    // slashes directly follow the head and the opening side
    let first_slash = tokens.get(head.len()).map_or(Span::new(len, len), |t| t.1);
    let second_slash = tokens
        .get(head.len() + 1 + opening.len())
        .map_or(len, |t| t.1.start);
    if opening.is_empty() || closing.is_empty() {
        return Err(ParseError::at(
            KIND,
            "Must have a start and an end",
            first_slash.to(Span::new(len, len)),
        ));
    }

    let range = parse_range_parts(opening, second_slash, closing, len, options)?;
    let (Some(start), Some(duration)) = (range.start().copied(), range.duration().copied()) else {
        return Err(ParseError::at(
            KIND,
            "Must have a start and an end",
            first_slash.to(Span::new(len, len)),
        ));
    };

    let mut recurring = RecurringDate {
        count,
        range,
        start,
        duration,
        end: None,
    };
    if let Some(count) = count {
        let end = recurring
            .nth(count)
            .map_err(|e| e.or_span(Span::new(0, len)))?;
        recurring.end = Some(end);
    }

    tracing::trace!(recurring = %recurring, "parsed recurring date");
    Ok(recurring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recurring_date() {
        #[rustfmt::skip]
        let success_cases = [
            ("R3/+2000/P1Y",           Some(3), "+2000",       "P1Y",  Some("+2003")),
            ("R/+2000/P1Y",            None,    "+2000",       "P1Y",  None),
            ("R0/+2000/P1Y",           Some(0), "+2000",       "P1Y",  Some("+2000")),
            ("R2/+2000-01-31/P1M",     Some(2), "+2000-01-31", "P1M",  Some("+2000-03-31")),
            ("R4/+1999-05/+1999-06",   Some(4), "+1999-05",    "P1M",  Some("+1999-09")),
            ("R12/A+1999T10Z/PT2H",    Some(12), "+1999T10Z",  "PT2H", Some("+1999-01-02T10Z")),
        ];
        for (src, count, start, duration, end) in success_cases {
            let date: RecurringDate = src.parse().unwrap_or_else(|e| panic!("{src}: {e}"));
            assert_eq!(date.count(), count, "{src}");
            assert_eq!(date.start().to_formal_string(), start, "{src}");
            assert_eq!(date.duration().to_formal_string(), duration, "{src}");
            assert_eq!(date.end().map(SimpleDate::to_formal_string).as_deref(), end, "{src}");
            assert_eq!(date.to_formal_string(), src, "{src}");
        }
    }

    #[test]
    fn computes_occurrences() {
        let date: RecurringDate = "R/+2000-01-31/P1M".parse().unwrap();
        #[rustfmt::skip]
        let cases = [
            (0, "+2000-01-31"),
            (1, "+2000-02-29"),
            (2, "+2000-03-31"),
            (13, "+2001-02-28"),
        ];
        for (k, expected) in cases {
            assert_eq!(date.nth(k).unwrap().to_formal_string(), expected, "nth({k})");
        }

        let err = date.nth(u32::MAX).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Date);
    }

    #[test]
    fn rejects_malformed_recurring_date() {
        #[rustfmt::skip]
        let fail_cases = [
            ("R3/+2000",           ParseErrorKind::Recurring, "Must contain exactly 3 parts separated by /"),
            ("R3/+2000/P1Y/P1Y",   ParseErrorKind::Recurring, "Must contain exactly 3 parts separated by /"),
            ("X3/+2000/P1Y",       ParseErrorKind::Recurring, "Must begin with R"),
            ("/+2000/P1Y",         ParseErrorKind::Recurring, "Must begin with R"),
            ("R3A/+2000/P1Y",      ParseErrorKind::Recurring, "Malformed Count"),
            ("R-3/+2000/P1Y",      ParseErrorKind::Recurring, "Malformed Count"),
            ("R99999999999/+2000/P1Y", ParseErrorKind::Recurring, "Count out of range"),
            ("R3//P1Y",            ParseErrorKind::Recurring, "Must have a start and an end"),
            ("R3/+2000/",          ParseErrorKind::Recurring, "Must have a start and an end"),
            ("R3/A/+2000",         ParseErrorKind::Recurring, "Must have a start and an end"),
            ("R3/+2000/P1Y1M1Y",   ParseErrorKind::Duration,  "Duplicate Years"),
            ("R3/+2001/+2000",     ParseErrorKind::Range,     "Start Date must be less than End Date"),
            ("R9999/+2000/P1Y",    ParseErrorKind::Date,      "Year must be between -9999 and +9999"),
        ];
        for (src, kind, message) in fail_cases {
            let err = src.parse::<RecurringDate>().expect_err(src);
            assert_eq!(err.kind(), kind, "{src}");
            assert_eq!(err.message(), message, "{src}");
            assert!(err.span().is_some(), "{src}");
        }
    }
}
