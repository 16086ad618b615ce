// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar arithmetic over simple dates and durations.
//!
//! Years and months are calendar units: adding them moves the month and clamps
//! the day to the length of the target month. Days and finer units are exact.

use crate::calendar::{
    MAX_YEAR, SECONDS_PER_DAY, civil_from_epoch_days, days_in_month_astronomical, epoch_days,
    from_astronomical, to_astronomical,
};
use crate::duration::Duration;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::simple::{SimpleDate, UtcOffset};

/// Calendar units, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    pub(crate) const ALL: [Unit; 6] = [
        Unit::Year,
        Unit::Month,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of units present on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields(u8);

impl Fields {
    fn of(date: &SimpleDate) -> Self {
        let mut fields = Self(Unit::Year.bit());
        for (unit, present) in [
            (Unit::Month, date.month.is_some()),
            (Unit::Day, date.day.is_some()),
            (Unit::Hour, date.hours.is_some()),
            (Unit::Minute, date.minutes.is_some()),
            (Unit::Second, date.seconds.is_some()),
        ] {
            if present {
                fields = fields.with(unit);
            }
        }
        fields
    }

    /// Every unit up to and including `finest`.
    fn through(finest: Unit) -> Self {
        Unit::ALL
            .into_iter()
            .filter(|&u| u <= finest)
            .fold(Self(0), Self::with)
    }

    const fn with(self, unit: Unit) -> Self {
        Self(self.0 | unit.bit())
    }

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    const fn has(self, unit: Unit) -> bool {
        self.0 & unit.bit() != 0
    }

    fn finest(self) -> Unit {
        Unit::ALL
            .into_iter()
            .rev()
            .find(|&u| self.has(u))
            .unwrap_or(Unit::Year)
    }
}

/// Which end of a unit a missing field is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// A fully specified civil date and time on astronomical years.
///
/// `hour` may be 24 until the instant is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instant {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Instant {
    /// Fill every missing field of `date` with the start of its unit.
    pub(crate) fn from_start(date: &SimpleDate) -> Self {
        Self::fill(date, Fields::of(date), Edge::Start)
    }

    /// Fill the fields of `zipped` that `date` lacks from `edge`; everything
    /// else takes the start of its unit.
    fn fill(date: &SimpleDate, zipped: Fields, edge: Edge) -> Self {
        let year = i64::from(to_astronomical(date.year()));
        let end = |unit: Unit| edge == Edge::End && zipped.has(unit);

        let month = date
            .month
            .unwrap_or(if end(Unit::Month) { 12 } else { 1 });
        let day = date.day.unwrap_or_else(|| {
            if end(Unit::Day) {
                days_in_month_astronomical(month, year)
            } else {
                1
            }
        });
        let hour = date.hours.unwrap_or(if end(Unit::Hour) { 23 } else { 0 });
        let minute = date.minutes.unwrap_or(if end(Unit::Minute) { 59 } else { 0 });
        let second = date.seconds.unwrap_or(if end(Unit::Second) { 59 } else { 0 });

        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Seconds since 1970-01-01T00:00:00 in the instant's own offset.
    fn local_seconds(self) -> i64 {
        epoch_days(self.year, self.month, i64::from(self.day)) * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    fn from_local_seconds(seconds: i64) -> Self {
        let (year, month, day) = civil_from_epoch_days(seconds.div_euclid(SECONDS_PER_DAY));
        let rem = seconds.rem_euclid(SECONDS_PER_DAY);
        // rem is within 0..86_400
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (hour, minute, second) = ((rem / 3600) as u8, (rem / 60 % 60) as u8, (rem % 60) as u8);
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Components with `T24:00:00` rolled over to the next day.
    pub(crate) fn normalized(self) -> (i64, u8, u8, u8, u8, u8) {
        let n = Self::from_local_seconds(self.local_seconds());
        (n.year, n.month, n.day, n.hour, n.minute, n.second)
    }

    /// Move by whole months, clamping the day to the target month.
    fn add_months(self, months: i64) -> Self {
        let total = self.year * 12 + i64::from(self.month) - 1 + months;
        let year = total.div_euclid(12);
        // rem_euclid(12) is within 0..12
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month = total.rem_euclid(12) as u8 + 1;
        let day = self.day.min(days_in_month_astronomical(month, year));
        Self {
            year,
            month,
            day,
            ..self
        }
    }

    /// Narrow back to a simple date keeping only the `keep` fields.
    fn into_simple(
        self,
        keep: Fields,
        offset: Option<UtcOffset>,
        assumed_offset: UtcOffset,
    ) -> ParseResult<SimpleDate> {
        let year = from_astronomical(self.year).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::Date,
                format!("Year must be between -{MAX_YEAR:04} and +{MAX_YEAR:04}"),
            )
        })?;
        let pick = |unit: Unit, value: u8| keep.has(unit).then_some(value);
        let hours = pick(Unit::Hour, self.hour);
        Ok(SimpleDate {
            year,
            month: pick(Unit::Month, self.month),
            day: pick(Unit::Day, self.day),
            hours,
            minutes: pick(Unit::Minute, self.minute),
            seconds: pick(Unit::Second, self.second),
            offset: hours.and(offset),
            assumed_offset,
        })
    }
}

fn offset_seconds(offset: UtcOffset) -> i64 {
    i64::from(offset.total_minutes()) * 60
}

/// Add `duration` to `start`.
///
/// Missing fields of `start` take the start of their unit. Years and months
/// move the calendar month and clamp the day; days and finer fields are exact.
/// The result keeps every field `start` has, plus every field down to the
/// finest one in `duration`. Offsets are carried over from `start` unchanged.
///
/// # Errors
///
/// Fails if the result falls outside years `-9999..=+9999`.
pub fn add_duration(start: &SimpleDate, duration: &Duration) -> Result<SimpleDate, ParseError> {
    tracing::trace!(%start, %duration, "add duration");

    let months = i64::from(duration.years.unwrap_or(0)) * 12 + i64::from(duration.months.unwrap_or(0));
    let seconds = i64::from(duration.days.unwrap_or(0)) * SECONDS_PER_DAY
        + i64::from(duration.hours.unwrap_or(0)) * 3600
        + i64::from(duration.minutes.unwrap_or(0)) * 60
        + i64::from(duration.seconds.unwrap_or(0));

    let anchor = Instant::from_local_seconds(Instant::from_start(start).local_seconds());
    let shifted = anchor.add_months(months);
    let result = Instant::from_local_seconds(shifted.local_seconds() + seconds);

    let mut keep = Fields::of(start);
    if let Some(finest) = duration.finest_unit() {
        keep = keep.union(Fields::through(finest));
    }
    result.into_simple(keep, start.offset, start.assumed_offset)
}

/// The duration from `start` to `end`, such that adding it to `start` lands on
/// `end`.
///
/// The two dates are zipped first: a field present on either is present on
/// both. `start` fills it with the start of its unit and `end` with the end
/// (December, the last day of the month, `23:59:59`). When both carry a time
/// of day, `end` is converted into the offset of `start`.
///
/// The result takes as many whole months as fit, then splits the rest into
/// days, hours, minutes and seconds. Zero fields are left out; equal dates
/// give a zero of the finest zipped unit, e.g. `P0Y` or `PT0S`.
///
/// Adding the result back to `start` reaches the same instant as `end`, but an
/// `end` written as `T24` comes back as `T00` of the next day.
///
/// # Errors
///
/// Fails if `end` is before `start`.
pub fn duration_between(start: &SimpleDate, end: &SimpleDate) -> Result<Duration, ParseError> {
    tracing::trace!(%start, %end, "duration between");

    let zipped = Fields::of(start).union(Fields::of(end));
    let from = Instant::fill(start, zipped, Edge::Start).local_seconds();
    let mut to = Instant::fill(end, zipped, Edge::End).local_seconds();
    if let (Some(a), Some(b)) = (start.utc_offset(), end.utc_offset()) {
        to += offset_seconds(a) - offset_seconds(b);
    }

    if to < from {
        return Err(ParseError::new(
            ParseErrorKind::Range,
            "Start Date must be less than End Date",
        ));
    }

    let from = Instant::from_local_seconds(from);
    let to_instant = Instant::from_local_seconds(to);
    let mut months = (to_instant.year * 12 + i64::from(to_instant.month))
        - (from.year * 12 + i64::from(from.month));
    if months > 0 && from.add_months(months).local_seconds() > to {
        months -= 1;
    }
    let rest = to - from.add_months(months).local_seconds();

    let parts = [
        (Unit::Year, months / 12),
        (Unit::Month, months % 12),
        (Unit::Day, rest / SECONDS_PER_DAY),
        (Unit::Hour, rest % SECONDS_PER_DAY / 3600),
        (Unit::Minute, rest % 3600 / 60),
        (Unit::Second, rest % 60),
    ];

    let mut duration = Duration::EMPTY;
    for (unit, value) in parts {
        if value == 0 {
            continue;
        }
        let value = u32::try_from(value).map_err(|_| {
            ParseError::new(ParseErrorKind::Duration, "Duration field out of range")
        })?;
        duration.set(unit, value);
    }
    if duration.finest_unit().is_none() {
        duration.set(zipped.finest(), 0);
    }
    Ok(duration)
}

/// Scale every present field of `duration` by `factor`.
///
/// # Errors
///
/// Fails if a field overflows.
pub fn multiply_duration(duration: &Duration, factor: u32) -> Result<Duration, ParseError> {
    tracing::trace!(%duration, factor, "multiply duration");

    let mut scaled = *duration;
    for unit in Unit::ALL {
        if let Some(value) = duration.get(unit) {
            let value = value.checked_mul(factor).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::Duration,
                    format!("{duration} multiplied by {factor} is out of range"),
                )
            })?;
            scaled.set(unit, value);
        }
    }
    Ok(scaled)
}

impl SimpleDate {
    /// The same moment written at `offset`.
    ///
    /// Dates without a time of day have no offset and are returned unchanged.
    /// The month and day are added when the shift moves the calendar date, and
    /// the minutes when it moves the minute.
    ///
    /// # Errors
    ///
    /// Fails if the shifted date falls outside years `-9999..=+9999`.
    pub fn with_offset(&self, offset: UtcOffset) -> Result<SimpleDate, ParseError> {
        let Some(current) = self.utc_offset() else {
            return Ok(*self);
        };

        let anchor = Instant::from_start(self);
        let shifted = Instant::from_local_seconds(
            anchor.local_seconds() + offset_seconds(offset) - offset_seconds(current),
        );

        let mut keep = Fields::of(self);
        let moved = (shifted.year, shifted.month, shifted.day)
            != (anchor.year, anchor.month, anchor.day);
        if moved {
            keep = keep.with(Unit::Month).with(Unit::Day);
        }
        if shifted.minute != anchor.minute {
            keep = keep.with(Unit::Minute);
        }
        shifted.into_simple(keep, Some(offset), self.assumed_offset)
    }
}
