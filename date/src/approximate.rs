// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Approximate dates, `A` followed by a simple date.

use std::fmt::{self, Display};
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{Token, tokenize};
use crate::options::ParseOptions;
use crate::scanner::Cursor;
use crate::simple::{SimpleDate, parse_simple};

/// A simple date that is not precisely known, e.g. `A+1999-05`.
///
/// Dereferences to the wrapped [`SimpleDate`] for its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApproximateDate {
    date: SimpleDate,
}

impl ApproximateDate {
    /// Mark `date` as approximate.
    #[must_use]
    pub const fn new(date: SimpleDate) -> Self {
        Self { date }
    }

    /// Parse an approximate date with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the leading `A` is missing or the date
    /// after it is malformed.
    pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let tokens = tokenize(src);
        parse_approximate(&mut Cursor::new(&tokens, src.len()), options)
    }

    /// The wrapped date.
    #[must_use]
    pub const fn date(&self) -> &SimpleDate {
        &self.date
    }

    /// Always `true`.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        true
    }

    /// Formal string for this date.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }
}

impl Deref for ApproximateDate {
    type Target = SimpleDate;

    fn deref(&self) -> &Self::Target {
        &self.date
    }
}

impl From<ApproximateDate> for SimpleDate {
    fn from(value: ApproximateDate) -> Self {
        value.date
    }
}

impl Display for ApproximateDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.date)
    }
}

impl FromStr for ApproximateDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

/// Format Definition:
///
/// ```txt
/// approximate = "A" simple
/// ```
pub(crate) fn parse_approximate(
    cursor: &mut Cursor<'_, '_>,
    options: &ParseOptions,
) -> ParseResult<ApproximateDate> {
    if !cursor.eat(Token::Approximate) {
        return Err(ParseError::at(
            ParseErrorKind::Approximate,
            "Must begin with A",
            cursor.span(),
        ));
    }
    parse_simple(cursor, options).map(ApproximateDate::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_approximate_date() {
        let date: ApproximateDate = "A+1999".parse().unwrap();
        assert!(date.is_approximate());
        assert_eq!(date.year(), 1999);
        assert_eq!(date.month(), None);

        let date: ApproximateDate = "A-0044-03-15T12Z".parse().unwrap();
        assert_eq!(date.year(), -44);
        assert_eq!(date.day(), Some(15));
        assert_eq!(date.tz_hours(), Some(0));
        assert_eq!(date.to_formal_string(), "A-0044-03-15T12Z");
    }

    #[test]
    fn rejects_malformed_approximate_date() {
        #[rustfmt::skip]
        let fail_cases = [
            ("+1999",    ParseErrorKind::Approximate, "Must begin with A"),
            ("",         ParseErrorKind::Approximate, "Must begin with A"),
            ("A",        ParseErrorKind::Date,        "Must have at least [+-]YYYY"),
            ("AA+1999",  ParseErrorKind::Date,        "Must begin with + or -"),
            ("A+1999-13", ParseErrorKind::Date,       "Month must be between 1 and 12"),
        ];
        for (src, kind, message) in fail_cases {
            let err = src.parse::<ApproximateDate>().expect_err(src);
            assert_eq!(err.kind(), kind, "{src}");
            assert_eq!(err.message(), message, "{src}");
        }
    }

    #[test]
    fn reports_absolute_spans() {
        let err = "A+1999-13".parse::<ApproximateDate>().unwrap_err();
        assert_eq!(err.span(), Some(crate::error::Span::new(7, 9)));
    }
}
