// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Durations, `P[nY][nM][nD][T[nH][nM][nS]]`.
//!
//! Fields must appear in calendar order. The order is enforced by a small
//! automaton whose state is the last accepted designator.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::arithmetic::Unit;
use crate::error::{ParseError, ParseErrorKind, ParseResult, Span};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::scanner::{Cursor, parse_number};

const KIND: ParseErrorKind = ParseErrorKind::Duration;

/// A calendar-aware span of time.
///
/// Each field is independently optional. A field written as `0` is present
/// with value zero, which matters for the precision of arithmetic results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub(crate) years: Option<u32>,
    pub(crate) months: Option<u32>,
    pub(crate) days: Option<u32>,
    pub(crate) hours: Option<u32>,
    pub(crate) minutes: Option<u32>,
    pub(crate) seconds: Option<u32>,
}

impl Duration {
    pub(crate) const EMPTY: Self = Self {
        years: None,
        months: None,
        days: None,
        hours: None,
        minutes: None,
        seconds: None,
    };

    /// Years field.
    #[must_use]
    pub const fn years(&self) -> Option<u32> {
        self.years
    }

    /// Months field.
    #[must_use]
    pub const fn months(&self) -> Option<u32> {
        self.months
    }

    /// Days field.
    #[must_use]
    pub const fn days(&self) -> Option<u32> {
        self.days
    }

    /// Hours field.
    #[must_use]
    pub const fn hours(&self) -> Option<u32> {
        self.hours
    }

    /// Minutes field.
    #[must_use]
    pub const fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    /// Seconds field.
    #[must_use]
    pub const fn seconds(&self) -> Option<u32> {
        self.seconds
    }

    /// Whether any time field (hours, minutes, seconds) is present.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some()
    }

    /// Formal string for this duration.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }

    pub(crate) const fn get(&self, unit: Unit) -> Option<u32> {
        match unit {
            Unit::Year => self.years,
            Unit::Month => self.months,
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
        }
    }

    pub(crate) const fn set(&mut self, unit: Unit, value: u32) {
        let slot = match unit {
            Unit::Year => &mut self.years,
            Unit::Month => &mut self.months,
            Unit::Day => &mut self.days,
            Unit::Hour => &mut self.hours,
            Unit::Minute => &mut self.minutes,
            Unit::Second => &mut self.seconds,
        };
        *slot = Some(value);
    }

    /// Finest unit present, if any.
    pub(crate) fn finest_unit(&self) -> Option<Unit> {
        Unit::ALL.into_iter().rev().find(|&u| self.get(u).is_some())
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P")?;
        if let Some(years) = self.years {
            write!(f, "{years}Y")?;
        }
        if let Some(months) = self.months {
            write!(f, "{months}M")?;
        }
        if let Some(days) = self.days {
            write!(f, "{days}D")?;
        }
        if self.has_time() {
            write!(f, "T")?;
            if let Some(hours) = self.hours {
                write!(f, "{hours}H")?;
            }
            if let Some(minutes) = self.minutes {
                write!(f, "{minutes}M")?;
            }
            if let Some(seconds) = self.seconds {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s);
        parse_duration(&mut Cursor::new(&tokens, s.len()))
    }
}

/// Designators in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
enum Designator {
    #[strum(serialize = "Years")]
    Years,
    #[strum(serialize = "Months")]
    Months,
    #[strum(serialize = "Days")]
    Days,
    #[strum(serialize = "T")]
    Time,
    #[strum(serialize = "Hours")]
    Hours,
    #[strum(serialize = "Minutes")]
    Minutes,
    #[strum(serialize = "Seconds")]
    Seconds,
}

impl Designator {
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    const fn is_time_field(self) -> bool {
        matches!(self, Self::Hours | Self::Minutes | Self::Seconds)
    }

    const fn unit(self) -> Option<Unit> {
        match self {
            Self::Years => Some(Unit::Year),
            Self::Months => Some(Unit::Month),
            Self::Days => Some(Unit::Day),
            Self::Time => None,
            Self::Hours => Some(Unit::Hour),
            Self::Minutes => Some(Unit::Minute),
            Self::Seconds => Some(Unit::Second),
        }
    }
}

/// Automaton state: the last designator accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    After(Designator),
}

impl State {
    /// Designators allowed next from this state.
    const fn permitted(self) -> &'static [Designator] {
        use Designator::{Days, Hours, Minutes, Months, Seconds, Time, Years};
        match self {
            State::Start => &[Years, Months, Days, Time],
            State::After(Years) => &[Months, Days, Time],
            State::After(Months) => &[Days, Time],
            State::After(Days) => &[Time],
            State::After(Time) => &[Hours, Minutes, Seconds],
            State::After(Hours) => &[Minutes, Seconds],
            State::After(Minutes) => &[Seconds],
            State::After(Seconds) => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldOrder {
    state: State,
    seen: u8,
}

impl FieldOrder {
    const fn new() -> Self {
        Self {
            state: State::Start,
            seen: 0,
        }
    }

    const fn has_seen(&self, designator: Designator) -> bool {
        self.seen & designator.bit() != 0
    }

    /// `M` is months before `T` and minutes after it.
    const fn resolve(&self, token: Token<'_>) -> Option<Designator> {
        match token {
            Token::Year => Some(Designator::Years),
            Token::MonthOrMinute if self.has_seen(Designator::Time) => Some(Designator::Minutes),
            Token::MonthOrMinute => Some(Designator::Months),
            Token::Day => Some(Designator::Days),
            Token::Time => Some(Designator::Time),
            Token::Hour => Some(Designator::Hours),
            Token::Second => Some(Designator::Seconds),
            _ => None,
        }
    }

    fn accept(&mut self, designator: Designator) -> Result<(), String> {
        if self.state.permitted().contains(&designator) {
            self.state = State::After(designator);
            self.seen |= designator.bit();
            Ok(())
        } else if self.has_seen(designator) {
            Err(format!("Duplicate {designator}"))
        } else if designator.is_time_field() && !self.has_seen(Designator::Time) {
            Err(format!("Missing T before {designator}"))
        } else {
            Err(format!("{designator} out of order"))
        }
    }
}

/// Format Definition:
///
/// ```txt
/// duration = "P" [n "Y"] [n "M"] [n "D"] [ "T" [n "H"] [n "M"] [n "S"] ]
/// ```
///
/// At least one field must be present, and a `T` must be followed by one.
/// The whole cursor must be consumed.
pub(crate) fn parse_duration(cursor: &mut Cursor<'_, '_>) -> ParseResult<Duration> {
    let start = cursor.span();
    if !cursor.eat(Token::Period) {
        return Err(ParseError::at(KIND, "Must begin with P", start));
    }

    let mut duration = Duration::EMPTY;
    let mut order = FieldOrder::new();
    let mut pending: Option<(&str, Span)> = None;

    while let Some(SpannedToken(token, span)) = cursor.bump() {
        if let Token::Digits(digits) = token {
            pending = Some((digits, span));
            continue;
        }

        let Some(designator) = order.resolve(token) else {
            return Err(ParseError::at(KIND, format!("Invalid character {token}"), span));
        };

        let Some(unit) = designator.unit() else {
            // the T designator carries no value
            if let Some((_, number)) = pending {
                return Err(ParseError::at(KIND, "Missing designator before T", number));
            }
            order
                .accept(designator)
                .map_err(|msg| ParseError::at(KIND, msg, span))?;
            continue;
        };

        let Some((digits, number)) = pending.take() else {
            return Err(ParseError::at(
                KIND,
                format!("Missing value for {designator}"),
                span,
            ));
        };
        order
            .accept(designator)
            .map_err(|msg| ParseError::at(KIND, msg, span))?;
        let value = parse_number::<u32>(digits).ok_or_else(|| {
            ParseError::at(KIND, format!("{designator} out of range"), number.to(span))
        })?;
        duration.set(unit, value);
    }

    if let Some((_, number)) = pending {
        return Err(ParseError::at(
            KIND,
            "Number without a designator",
            number,
        ));
    }
    match order.state {
        State::Start => Err(ParseError::at(
            KIND,
            "Must contain at least one field",
            start.to(cursor.span()),
        )),
        State::After(Designator::Time) => Err(ParseError::at(
            KIND,
            "Missing time fields after T",
            Span::new(cursor.eof_offset(), cursor.eof_offset()),
        )),
        State::After(_) => Ok(duration),
    }
}
