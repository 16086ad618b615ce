// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Simple dates: a point in time with partial precision.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::calendar::days_in_month;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{Token, tokenize};
use crate::options::ParseOptions;
use crate::scanner::{Cursor, parse_number};

const KIND: ParseErrorKind = ParseErrorKind::Date;

/// Offset from UTC, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    minutes: i16,
}

impl UtcOffset {
    /// Zero offset, written `Z`.
    pub const UTC: Self = Self { minutes: 0 };

    /// Largest offset magnitude, 23:59.
    pub const MAX_MINUTES: i16 = 23 * 60 + 59;

    /// Create an offset from a signed count of minutes.
    ///
    /// Returns `None` beyond ±23:59.
    #[must_use]
    pub const fn from_minutes(minutes: i16) -> Option<Self> {
        if minutes.abs() > Self::MAX_MINUTES {
            None
        } else {
            Some(Self { minutes })
        }
    }

    /// Signed offset in minutes.
    #[must_use]
    pub const fn total_minutes(self) -> i16 {
        self.minutes
    }

    /// Signed hour part, e.g. `-5` for `-05:30`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn hours(self) -> i8 {
        (self.minutes / 60) as i8
    }

    /// Signed minute part, e.g. `-30` for `-05:30`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn minutes(self) -> i8 {
        (self.minutes % 60) as i8
    }

    /// Whether this is the zero offset.
    #[must_use]
    pub const fn is_utc(self) -> bool {
        self.minutes == 0
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_utc() {
            return write!(f, "Z");
        }
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl FromStr for UtcOffset {
    type Err = ParseError;

    /// Parse `Z` or `±HH[:MM]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s);
        let mut cursor = Cursor::new(&tokens, s.len());
        let offset = parse_offset(&mut cursor)?;
        match offset {
            Some(offset) if cursor.is_eof() => Ok(offset),
            _ => Err(ParseError::at(KIND, "Malformed Timezone", cursor.rest_span())),
        }
    }
}

/// A simple date, e.g. `+1999-05-12T10:30:00Z`.
///
/// Every component finer than the year is optional, but a component is only
/// present when the next coarser one of its group is: a day needs a month,
/// minutes need hours and seconds need minutes.
///
/// Two dates are equal when their components and their offsets in effect are.
/// The assumed offset of a date without a time of day plays no part.
#[derive(Debug, Clone, Copy, Eq)]
pub struct SimpleDate {
    pub(crate) year: i16,
    pub(crate) month: Option<u8>,
    pub(crate) day: Option<u8>,
    pub(crate) hours: Option<u8>,
    pub(crate) minutes: Option<u8>,
    pub(crate) seconds: Option<u8>,

    /// Offset as written in the source, rendered back verbatim.
    pub(crate) offset: Option<UtcOffset>,

    /// Offset used when a time of day was written without one.
    pub(crate) assumed_offset: UtcOffset,
}

impl SimpleDate {
    /// Parse a simple date with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the malformed sub-part.
    pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let tokens = tokenize(src);
        let mut cursor = Cursor::new(&tokens, src.len());
        parse_simple(&mut cursor, options)
    }

    /// Signed year, never zero. `-0001` is 1 BCE.
    #[must_use]
    pub fn year(&self) -> i32 {
        i32::from(self.year)
    }

    /// Month, 1-12.
    #[must_use]
    pub const fn month(&self) -> Option<u8> {
        self.month
    }

    /// Day of the month.
    #[must_use]
    pub const fn day(&self) -> Option<u8> {
        self.day
    }

    /// Hours, 0-24.
    #[must_use]
    pub const fn hours(&self) -> Option<u8> {
        self.hours
    }

    /// Minutes, 0-59.
    #[must_use]
    pub const fn minutes(&self) -> Option<u8> {
        self.minutes
    }

    /// Seconds, 0-59.
    #[must_use]
    pub const fn seconds(&self) -> Option<u8> {
        self.seconds
    }

    /// Whether a time of day is present.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        self.hours.is_some()
    }

    /// Offset in effect for the time of day.
    ///
    /// This is the written offset, or the assumed one when the time was written
    /// without an offset. Dates without a time of day have no offset.
    #[must_use]
    pub const fn utc_offset(&self) -> Option<UtcOffset> {
        match (self.hours, self.offset) {
            (None, _) => None,
            (Some(_), Some(offset)) => Some(offset),
            (Some(_), None) => Some(self.assumed_offset),
        }
    }

    /// Offset exactly as written in the source, if any.
    #[must_use]
    pub const fn explicit_offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    /// Signed hour part of the offset in effect.
    #[must_use]
    pub fn tz_hours(&self) -> Option<i8> {
        self.utc_offset().map(UtcOffset::hours)
    }

    /// Signed minute part of the offset in effect.
    #[must_use]
    pub fn tz_minutes(&self) -> Option<i8> {
        self.utc_offset().map(UtcOffset::minutes)
    }

    /// Formal string for this date.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }

    /// Convert to a `jiff::civil::DateTime`, filling missing components with
    /// the start of their unit (January, day 1, midnight).
    ///
    /// `T24:00:00` rolls over to the next day. The offset is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the range `jiff` supports.
    #[cfg(feature = "jiff")]
    pub fn civil_date_time(&self) -> Result<jiff::civil::DateTime, jiff::Error> {
        let instant = crate::arithmetic::Instant::from_start(self);
        let (year, month, day, hour, minute, second) = instant.normalized();
        // out-of-range years are left for jiff to reject
        let year = i16::try_from(year).unwrap_or(i16::MAX);
        #[expect(clippy::cast_possible_wrap)]
        let (month, day, hour, minute, second) = (
            month as i8,
            day as i8,
            hour as i8,
            minute as i8,
            second as i8,
        );
        jiff::civil::DateTime::new(year, month, day, hour, minute, second, 0)
    }
}

type SimpleDateKey = (
    i16,
    Option<u8>,
    Option<u8>,
    Option<u8>,
    Option<u8>,
    Option<u8>,
    Option<UtcOffset>,
    Option<UtcOffset>,
);

impl SimpleDate {
    const fn key(&self) -> SimpleDateKey {
        (
            self.year,
            self.month,
            self.day,
            self.hours,
            self.minutes,
            self.seconds,
            self.offset,
            self.utc_offset(),
        )
    }
}

impl PartialEq for SimpleDate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for SimpleDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for SimpleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year < 0 { '-' } else { '+' };
        write!(f, "{sign}{:04}", self.year.unsigned_abs())?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
            if let Some(day) = self.day {
                write!(f, "-{day:02}")?;
            }
        }
        if let Some(hours) = self.hours {
            write!(f, "T{hours:02}")?;
            if let Some(minutes) = self.minutes {
                write!(f, ":{minutes:02}")?;
                if let Some(seconds) = self.seconds {
                    write!(f, ":{seconds:02}")?;
                }
            }
            if let Some(offset) = self.offset {
                write!(f, "{offset}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for SimpleDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

/// Format Definition:
///
/// ```txt
/// simple = sign 4DIGIT [ "-" 2DIGIT [ "-" 2DIGIT ] ] [ "T" time ]
/// ```
///
/// The whole cursor must be consumed.
pub(crate) fn parse_simple(cursor: &mut Cursor<'_, '_>, options: &ParseOptions) -> ParseResult<SimpleDate> {
    if cursor.is_eof() {
        return Err(ParseError::at(
            KIND,
            "Must have at least [+-]YYYY",
            cursor.span(),
        ));
    }

    let negative = match cursor.peek() {
        Some(Token::Plus) => false,
        Some(Token::Minus) => true,
        _ => {
            return Err(ParseError::at(KIND, "Must begin with + or -", cursor.span()));
        }
    };
    cursor.bump();

    let (digits, span) = cursor.digits(4, KIND, "Malformed Year")?;
    let magnitude: i16 = parse_number(digits)
        .ok_or_else(|| ParseError::at(KIND, "Malformed Year", span))?;
    if magnitude == 0 {
        return Err(ParseError::at(KIND, "Year 0000 does not exist", span));
    }

    let mut date = SimpleDate {
        year: if negative { -magnitude } else { magnitude },
        month: None,
        day: None,
        hours: None,
        minutes: None,
        seconds: None,
        offset: None,
        assumed_offset: options.assumed_offset,
    };

    match cursor.peek() {
        None => return Ok(date),
        Some(Token::Time) => return parse_time(cursor, date),
        Some(Token::Minus) => {
            cursor.bump();
        }
        Some(_) => {
            return Err(ParseError::at(
                KIND,
                "Invalid Year-Month Separator",
                cursor.span(),
            ));
        }
    }

    let (digits, span) = cursor.digits(2, KIND, "Malformed Month")?;
    let month = parse_number::<u8>(digits).unwrap_or(0);
    if !(1..=12).contains(&month) {
        return Err(ParseError::at(KIND, "Month must be between 1 and 12", span));
    }
    date.month = Some(month);

    match cursor.peek() {
        None => return Ok(date),
        Some(Token::Time) => return parse_time(cursor, date),
        Some(Token::Minus) => {
            cursor.bump();
        }
        Some(_) => {
            return Err(ParseError::at(
                KIND,
                "Invalid Month-Day Separator",
                cursor.span(),
            ));
        }
    }

    let (digits, span) = cursor.digits(2, KIND, "Malformed Day")?;
    let day = parse_number::<u8>(digits).unwrap_or(0);
    let last = days_in_month(month, date.year()).unwrap_or(0);
    if !(1..=last).contains(&day) {
        return Err(ParseError::at(
            KIND,
            format!("Day must be between 1 and {last}"),
            span,
        ));
    }
    date.day = Some(day);

    match cursor.peek() {
        None => Ok(date),
        Some(Token::Time) => parse_time(cursor, date),
        Some(_) => Err(ParseError::at(
            KIND,
            "Invalid Date-Time Separator",
            cursor.span(),
        )),
    }
}

/// Format Definition:
///
/// ```txt
/// time = 2DIGIT [ ":" 2DIGIT [ ":" 2DIGIT ] ] [ tz ]
/// ```
fn parse_time(cursor: &mut Cursor<'_, '_>, mut date: SimpleDate) -> ParseResult<SimpleDate> {
    cursor.bump(); // T

    let (digits, hours_span) = cursor.digits(2, KIND, "Malformed Hours")?;
    let hours = parse_number::<u8>(digits).unwrap_or(u8::MAX);
    if hours > 24 {
        return Err(ParseError::at(
            KIND,
            "Hours must be between 0 and 24",
            hours_span,
        ));
    }
    date.hours = Some(hours);

    if cursor.eat(Token::Colon) {
        let (digits, span) = cursor.digits(2, KIND, "Malformed Minutes")?;
        let minutes = parse_number::<u8>(digits).unwrap_or(u8::MAX);
        if minutes > 59 {
            return Err(ParseError::at(
                KIND,
                "Minutes must be between 0 and 59",
                span,
            ));
        }
        date.minutes = Some(minutes);

        if cursor.eat(Token::Colon) {
            let (digits, span) = cursor.digits(2, KIND, "Malformed Seconds")?;
            let seconds = parse_number::<u8>(digits).unwrap_or(u8::MAX);
            if seconds > 59 {
                return Err(ParseError::at(
                    KIND,
                    "Seconds must be between 0 and 59",
                    span,
                ));
            }
            date.seconds = Some(seconds);
        } else if !starts_offset(cursor.peek()) && !cursor.is_eof() {
            return Err(ParseError::at(
                KIND,
                "Invalid Minute-Second Separator",
                cursor.span(),
            ));
        }
    } else if !starts_offset(cursor.peek()) && !cursor.is_eof() {
        return Err(ParseError::at(
            KIND,
            "Invalid Hour-Minute Separator",
            cursor.span(),
        ));
    }

    if hours == 24 && (date.minutes.unwrap_or(0) != 0 || date.seconds.unwrap_or(0) != 0) {
        return Err(ParseError::at(
            KIND,
            "Hours of 24 require zero minutes and seconds",
            hours_span,
        ));
    }

    date.offset = parse_offset(cursor)?;
    if !cursor.is_eof() {
        return Err(ParseError::at(KIND, "Malformed Timezone", cursor.rest_span()));
    }
    Ok(date)
}

const fn starts_offset(token: Option<Token<'_>>) -> bool {
    matches!(token, Some(Token::Zulu | Token::Plus | Token::Minus))
}

/// Format Definition:
///
/// ```txt
/// tz = "Z" / sign 2DIGIT [ ":" 2DIGIT ]
/// ```
///
/// Returns `None` without consuming anything when no offset starts here.
fn parse_offset(cursor: &mut Cursor<'_, '_>) -> ParseResult<Option<UtcOffset>> {
    let negative = match cursor.peek() {
        Some(Token::Zulu) => {
            cursor.bump();
            return Ok(Some(UtcOffset::UTC));
        }
        Some(Token::Plus) => false,
        Some(Token::Minus) => true,
        _ => return Ok(None),
    };
    cursor.bump();

    let (digits, span) = cursor.digits(2, KIND, "Malformed Timezone Hours")?;
    let hours = parse_number::<i16>(digits).unwrap_or(i16::MAX);
    if hours > 23 {
        return Err(ParseError::at(
            KIND,
            "Timezone Hours must be between 0 and 23",
            span,
        ));
    }

    let mut minutes = 0;
    if cursor.eat(Token::Colon) {
        let (digits, span) = cursor.digits(2, KIND, "Malformed Timezone Minutes")?;
        minutes = parse_number::<i16>(digits).unwrap_or(i16::MAX);
        if minutes > 59 {
            return Err(ParseError::at(
                KIND,
                "Timezone Minutes must be between 0 and 59",
                span,
            ));
        }
    }

    let total = hours * 60 + minutes;
    Ok(UtcOffset::from_minutes(if negative { -total } else { total }))
}
