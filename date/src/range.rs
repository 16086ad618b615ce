// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Ranges, `[A][start]/[end | duration]`.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::arithmetic::{add_duration, duration_between};
use crate::duration::{Duration, parse_duration};
use crate::error::{ParseError, ParseErrorKind, ParseResult, Span};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::options::ParseOptions;
use crate::scanner::{Cursor, split_on_slash};
use crate::simple::{SimpleDate, parse_simple};

const KIND: ParseErrorKind = ParseErrorKind::Range;

/// How the closing side of a range was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Closing {
    Open,
    Date,
    Duration,
}

/// An interval with an optional start and an optional end.
///
/// A closed range carries both its end and its duration. Whichever was not
/// written is derived, and the range renders back the form it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    approximate: bool,
    start: Option<SimpleDate>,
    end: Option<SimpleDate>,
    duration: Option<Duration>,
    closing: Closing,
}

impl DateRange {
    /// Parse a range with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the range or one of its parts is malformed,
    /// or if the end precedes the start.
    pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let tokens = tokenize(src);
        parse_range(&tokens, src.len(), options)
    }

    /// Whether the range was written with a leading `A`.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        self.approximate
    }

    /// Start of the range, absent for `/+2000`.
    #[must_use]
    pub const fn start(&self) -> Option<&SimpleDate> {
        self.start.as_ref()
    }

    /// End of the range, written or derived from the start and the duration.
    #[must_use]
    pub const fn end(&self) -> Option<&SimpleDate> {
        self.end.as_ref()
    }

    /// Duration of the range, written or derived from the start and the end.
    ///
    /// Absent unless the range is closed.
    #[must_use]
    pub const fn duration(&self) -> Option<&Duration> {
        self.duration.as_ref()
    }

    /// Whether the closing side was written as a duration.
    #[must_use]
    pub const fn has_written_duration(&self) -> bool {
        matches!(self.closing, Closing::Duration)
    }

    /// Formal string for this range.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approximate {
            write!(f, "A")?;
        }
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        write!(f, "/")?;
        match (self.closing, &self.end, &self.duration) {
            (Closing::Date, Some(end), _) => write!(f, "{end}"),
            (Closing::Duration, _, Some(duration)) => write!(f, "{duration}"),
            _ => Ok(()),
        }
    }
}

impl FromStr for DateRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

/// Format Definition:
///
/// ```txt
/// range = ["A"] [simple] "/" [ simple / duration ]
/// ```
pub(crate) fn parse_range(
    tokens: &[SpannedToken<'_>],
    len: usize,
    options: &ParseOptions,
) -> ParseResult<DateRange> {
    let parts = split_on_slash(tokens);
    let &[opening, closing] = parts.as_slice() else {
        let message = if parts.len() < 2 {
            "Missing /"
        } else {
            "Must contain exactly one /"
        };
        return Err(ParseError::at(KIND, message, Span::new(0, len)));
    };

    // the slash sits right after the opening part
    let slash = tokens.get(opening.len()).map_or(len, |t| t.1.start);
    parse_range_parts(opening, slash, closing, len, options)
}

/// Parse the two sides of a range, split on its `/`.
///
/// `opening_eof` and `closing_eof` are the offsets reported for errors at the
/// end of each side.
pub(crate) fn parse_range_parts(
    opening: &[SpannedToken<'_>],
    opening_eof: usize,
    closing: &[SpannedToken<'_>],
    closing_eof: usize,
    options: &ParseOptions,
) -> ParseResult<DateRange> {
    let mut cursor = Cursor::new(opening, opening_eof);
    let approximate = cursor.eat(Token::Approximate);
    let start = if cursor.is_eof() {
        None
    } else {
        Some(parse_simple(&mut cursor, options)?)
    };

    let mut cursor = Cursor::new(closing, closing_eof);
    let closing_span = cursor.rest_span();
    let range = match (start, cursor.peek()) {
        (None, None) => {
            return Err(ParseError::at(
                KIND,
                "Must have a start or an end",
                Span::new(opening_eof, closing_eof),
            ));
        }
        (Some(_), None) => DateRange {
            approximate,
            start,
            end: None,
            duration: None,
            closing: Closing::Open,
        },
        (None, Some(Token::Period)) => {
            return Err(ParseError::at(
                KIND,
                "A range with a duration must have a start date",
                closing_span,
            ));
        }
        (Some(start_date), Some(Token::Period)) => {
            let duration = parse_duration(&mut cursor)?;
            let end = add_duration(&start_date, &duration).map_err(|e| e.or_span(closing_span))?;
            DateRange {
                approximate,
                start,
                end: Some(end),
                duration: Some(duration),
                closing: Closing::Duration,
            }
        }
        (_, Some(_)) => {
            let end = parse_simple(&mut cursor, options)?;
            let duration = start
                .map(|start| duration_between(&start, &end))
                .transpose()
                .map_err(|e| e.or_span(closing_span))?;
            DateRange {
                approximate,
                start,
                end: Some(end),
                duration,
                closing: Closing::Date,
            }
        }
    };

    tracing::trace!(range = %range, "parsed range");
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: Option<&SimpleDate>) -> Option<String> {
        v.map(SimpleDate::to_formal_string)
    }

    fn d(v: Option<&Duration>) -> Option<String> {
        v.map(Duration::to_formal_string)
    }

    #[test]
    fn parses_range() {
        #[rustfmt::skip]
        let success_cases = [
            ("+1999/+2000",        false, Some("+1999"),      Some("+2000"),      Some("P1Y")),
            ("+1999/P1Y",          false, Some("+1999"),      Some("+2000"),      Some("P1Y")),
            ("A+1999-05/+1999-07", true,  Some("+1999-05"),   Some("+1999-07"),   Some("P2M")),
            ("+1999-05-12/",       false, Some("+1999-05-12"), None,              None),
            ("/+2000",             false, None,               Some("+2000"),      None),
            ("A/+2000",            true,  None,               Some("+2000"),      None),
            ("+1999-01-31/P1M",    false, Some("+1999-01-31"), Some("+1999-02-28"), Some("P1M")),
            ("+1999T10Z/PT3H",     false, Some("+1999T10Z"),  Some("+1999-01-01T13Z"), Some("PT3H")),
        ];
        for (src, approximate, start, end, duration) in success_cases {
            let range: DateRange = src.parse().unwrap_or_else(|e| panic!("{src}: {e}"));
            assert_eq!(range.is_approximate(), approximate, "{src}");
            assert_eq!(s(range.start()).as_deref(), start, "{src}");
            assert_eq!(s(range.end()).as_deref(), end, "{src}");
            assert_eq!(d(range.duration()).as_deref(), duration, "{src}");
            assert_eq!(range.to_formal_string(), src, "{src}");
        }
    }

    #[test]
    fn rejects_malformed_range() {
        #[rustfmt::skip]
        let fail_cases = [
            ("+1999",             ParseErrorKind::Range,    "Missing /"),
            ("+1999/+2000/+2001", ParseErrorKind::Range,    "Must contain exactly one /"),
            ("/",                 ParseErrorKind::Range,    "Must have a start or an end"),
            ("A/",                ParseErrorKind::Range,    "Must have a start or an end"),
            ("/P1Y",              ParseErrorKind::Range,    "A range with a duration must have a start date"),
            ("+2000/+1999",       ParseErrorKind::Range,    "Start Date must be less than End Date"),
            ("+1999-13/+2000",    ParseErrorKind::Date,     "Month must be between 1 and 12"),
            ("+1999/+2000-02-30", ParseErrorKind::Date,     "Day must be between 1 and 29"),
            ("+1999/P1Y1Y",       ParseErrorKind::Duration, "Duplicate Years"),
            ("+9999/P1Y",         ParseErrorKind::Date,     "Year must be between -9999 and +9999"),
        ];
        for (src, kind, message) in fail_cases {
            let err = src.parse::<DateRange>().expect_err(src);
            assert_eq!(err.kind(), kind, "{src}");
            assert_eq!(err.message(), message, "{src}");
            assert!(err.span().is_some(), "{src}");
        }
    }

    #[test]
    fn derived_members_render_like_written_ones() {
        let by_duration: DateRange = "+1999-05-12/P1M3D".parse().unwrap();
        let by_end: DateRange = "+1999-05-12/+1999-06-15".parse().unwrap();
        assert_eq!(by_duration.end(), by_end.end());
        assert_eq!(by_duration.duration(), by_end.duration());
        assert!(by_duration.has_written_duration());
        assert!(!by_end.has_written_duration());
        assert_eq!(by_duration.to_formal_string(), "+1999-05-12/P1M3D");
        assert_eq!(by_end.to_formal_string(), "+1999-05-12/+1999-06-15");
    }

    #[test]
    fn points_errors_into_closing_side() {
        let err = "+1999/+2000-13".parse::<DateRange>().unwrap_err();
        assert_eq!(err.span(), Some(Span::new(12, 14)));

        let open = "+1999/".parse::<DateRange>().map(|r| r.end().is_none());
        assert_eq!(open, Ok(true));
    }
}
