// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Proleptic Gregorian calendar primitives.
//!
//! Formal years have no year zero: `-0001` is the year before `+0001`.
//! Internally all arithmetic runs on astronomical years, where `-0001` is `0`.

/// Largest year magnitude a formal string can carry.
pub const MAX_YEAR: i32 = 9999;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Whether the formal `year` is a leap year.
///
/// Negative years are mapped onto astronomical years first, so `-0001`
/// (1 BCE) is a leap year.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    is_leap_astronomical(i64::from(to_astronomical(year)))
}

/// Number of days in `month` (1-12) of the formal `year`.
///
/// Returns `None` if `month` is outside `1..=12`.
#[must_use]
pub fn days_in_month(month: u8, year: i32) -> Option<u8> {
    (1..=12)
        .contains(&month)
        .then(|| days_in_month_astronomical(month, i64::from(to_astronomical(year))))
}

/// Convert a formal year to an astronomical year.
pub(crate) const fn to_astronomical(year: i32) -> i32 {
    if year < 0 { year + 1 } else { year }
}

/// Convert an astronomical year back to a formal year, if it has four digits.
pub(crate) fn from_astronomical(year: i64) -> Option<i16> {
    let formal = if year <= 0 { year - 1 } else { year };
    if formal.abs() > i64::from(MAX_YEAR) {
        return None;
    }
    i16::try_from(formal).ok()
}

pub(crate) const fn is_leap_astronomical(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// `month` must already be within `1..=12`.
pub(crate) fn days_in_month_astronomical(month: u8, year: i64) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_astronomical(year) => 29,
        2 => 28,
        _ => panic!("month {month} is outside 1..=12"),
    }
}

/// Days since 1970-01-01 for an astronomical civil date.
///
/// `day` may run past the end of the month; the excess rolls into the
/// following days.
pub(crate) fn epoch_days(year: i64, month: u8, day: i64) -> i64 {
    let month = i64::from(month);
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let month_from_march = (month + 9) % 12;
    let day_of_year = (153 * month_from_march + 2) / 5;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468 + (day - 1)
}

/// Inverse of [`epoch_days`] for in-range days.
pub(crate) fn civil_from_epoch_days(days: i64) -> (i64, u8, u8) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_from_march + 2) / 5 + 1;
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    // month is within 1..=12 and day within 1..=31 by construction
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (month, day) = (month as u8, day as u8);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        #[rustfmt::skip]
        let cases = [
            (1900, false),
            (2000, true),
            (2023, false),
            (2024, true),
            (1600, true),
            (1700, false),
            (-1, true),  // 1 BCE, astronomical 0
            (-5, true),  // astronomical -4
            (-4, false), // astronomical -3
            (-101, false), // astronomical -100
            (-401, true),  // astronomical -400
        ];
        for (year, expected) in cases {
            assert_eq!(is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2, 1900), Some(28));
        assert_eq!(days_in_month(2, 2000), Some(29));
        assert_eq!(days_in_month(2, 2024), Some(29));
        assert_eq!(days_in_month(2, 2023), Some(28));
        assert_eq!(days_in_month(1, 2023), Some(31));
        assert_eq!(days_in_month(4, 2023), Some(30));
        assert_eq!(days_in_month(12, -1), Some(31));
        assert_eq!(days_in_month(2, -1), Some(29));
    }

    #[test]
    fn month_out_of_range_has_no_length() {
        assert_eq!(days_in_month(0, 2000), None);
        assert_eq!(days_in_month(13, 2000), None);
    }

    #[test]
    fn converts_signed_years() {
        assert_eq!(to_astronomical(1999), 1999);
        assert_eq!(to_astronomical(-1), 0);
        assert_eq!(to_astronomical(-2), -1);
        assert_eq!(from_astronomical(0), Some(-1));
        assert_eq!(from_astronomical(1), Some(1));
        assert_eq!(from_astronomical(-9998), Some(-9999));
        assert_eq!(from_astronomical(-9999), None);
        assert_eq!(from_astronomical(10_000), None);
    }

    #[test]
    fn epoch_days_round_trip() {
        assert_eq!(epoch_days(1970, 1, 1), 0);
        assert_eq!(epoch_days(2000, 3, 1), 11_017);
        assert_eq!(epoch_days(1969, 12, 31), -1);
        assert_eq!(epoch_days(2023, 2, 29), epoch_days(2023, 3, 1));

        for days in [-3_652_425, -719_468, -1, 0, 1, 11_016, 2_932_896] {
            let (y, m, d) = civil_from_epoch_days(days);
            assert_eq!(epoch_days(y, m, i64::from(d)), days, "days {days}");
        }
        assert_eq!(civil_from_epoch_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_epoch_days(-719_468), (0, 3, 1));
    }
}
