// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing every variant through the top level entry point.

use gedcomx_date::{DateKind, GedcomxDate, ParseOptions, UtcOffset, parse, parse_with};

#[test]
fn parse_simple_date() {
    let date = parse("+1999-05-12").unwrap();
    let simple = date.as_simple().unwrap();
    assert_eq!(simple.year(), 1999);
    assert_eq!(simple.month(), Some(5));
    assert_eq!(simple.day(), Some(12));
    assert_eq!(simple.hours(), None);
    assert_eq!(simple.utc_offset(), None);
}

#[test]
fn parse_simple_date_with_time() {
    let date = parse("+1999-05-12T10:30:00Z").unwrap();
    let simple = date.as_simple().unwrap();
    assert_eq!(simple.year(), 1999);
    assert_eq!(simple.month(), Some(5));
    assert_eq!(simple.day(), Some(12));
    assert_eq!(simple.hours(), Some(10));
    assert_eq!(simple.minutes(), Some(30));
    assert_eq!(simple.seconds(), Some(0));
    assert_eq!(simple.tz_hours(), Some(0));
    assert_eq!(simple.tz_minutes(), Some(0));
}

#[test]
fn parse_approximate_date() {
    let date = parse("A+1999").unwrap();
    assert_eq!(date.kind(), DateKind::Approximate);
    assert!(date.is_approximate());
    let approximate = date.as_approximate().unwrap();
    assert_eq!(approximate.year(), 1999);
    assert_eq!(approximate.month(), None);
}

#[test]
fn parse_closed_range() {
    let date = parse("+1999/+2000").unwrap();
    let range = date.as_range().unwrap();
    assert_eq!(range.start().unwrap().year(), 1999);
    assert_eq!(range.end().unwrap().year(), 2000);
    assert_eq!(range.duration().unwrap().to_formal_string(), "P1Y");
    assert!(!range.has_written_duration());
}

#[test]
fn parse_range_with_duration() {
    let date = parse("+1999/P1Y").unwrap();
    let range = date.as_range().unwrap();
    assert_eq!(range.start().unwrap().year(), 1999);
    assert_eq!(range.duration().unwrap().years(), Some(1));
    assert_eq!(range.end().unwrap().to_formal_string(), "+2000");
    assert!(range.has_written_duration());
}

#[test]
fn parse_open_ranges() {
    let range = *parse("+1999/").unwrap().as_range().unwrap();
    assert!(range.start().is_some());
    assert!(range.end().is_none());
    assert!(range.duration().is_none());

    let range = *parse("/+1999").unwrap().as_range().unwrap();
    assert!(range.start().is_none());
    assert_eq!(range.end().unwrap().year(), 1999);
    assert!(range.duration().is_none());
}

#[test]
fn parse_recurring_date() {
    let date = parse("R3/+2000/P1Y").unwrap();
    let recurring = date.as_recurring().unwrap();
    assert_eq!(recurring.count(), Some(3));
    assert_eq!(recurring.start().year(), 2000);
    assert_eq!(recurring.nth(3).unwrap().to_formal_string(), "+2003");
    assert_eq!(recurring.end().unwrap().to_formal_string(), "+2003");
}

#[test]
fn parse_unbounded_recurring_date() {
    let date = parse("R/+2000-03-01/+2000-03-08").unwrap();
    let recurring = date.as_recurring().unwrap();
    assert_eq!(recurring.count(), None);
    assert_eq!(recurring.end(), None);
    assert_eq!(recurring.duration().to_formal_string(), "P7D");
    assert_eq!(recurring.nth(4).unwrap().to_formal_string(), "+2000-03-29");
}

#[test]
fn parse_duration() {
    let date = parse("P1Y2M3D").unwrap();
    let duration = date.as_duration().unwrap();
    assert_eq!(duration.years(), Some(1));
    assert_eq!(duration.months(), Some(2));
    assert_eq!(duration.days(), Some(3));
    assert_eq!(duration.hours(), None);
    assert_eq!(duration.minutes(), None);
    assert_eq!(duration.seconds(), None);
}

#[test]
fn parse_duration_minutes_after_time() {
    let duration = *parse("P1MT1M").unwrap().as_duration().unwrap();
    assert_eq!(duration.months(), Some(1));
    assert_eq!(duration.minutes(), Some(1));
}

#[test]
fn parse_with_assumed_offset() {
    let offset: UtcOffset = "-05:00".parse().unwrap();
    let options = ParseOptions::with_offset(offset);

    let date = parse_with("+1999-05-12T10:30", &options).unwrap();
    let simple = date.as_simple().unwrap();
    assert_eq!(simple.tz_hours(), Some(-5));
    assert_eq!(simple.explicit_offset(), None);
    assert_eq!(date.to_formal_string(), "+1999-05-12T10:30");

    // the assumed offset flows through ranges
    let date = parse_with("+1999-05-12T10:30/+1999-05-12T17:00Z", &options).unwrap();
    let range = date.as_range().unwrap();
    assert_eq!(range.start().unwrap().tz_hours(), Some(-5));
    assert_eq!(range.end().unwrap().tz_hours(), Some(0));
    assert_eq!(range.duration().unwrap().to_formal_string(), "PT1H30M");
}

#[test]
fn parse_bce_years() {
    let date = parse("-0044-03-15").unwrap();
    let simple = date.as_simple().unwrap();
    assert_eq!(simple.year(), -44);

    let range = parse("-0001/+0001").unwrap();
    let range = range.as_range().unwrap();
    assert_eq!(range.duration().unwrap().to_formal_string(), "P1Y");
}

#[test]
fn variant_types_parse_on_their_own() {
    use gedcomx_date::{ApproximateDate, DateRange, Duration, RecurringDate, SimpleDate};

    assert!("+1999".parse::<SimpleDate>().is_ok());
    assert!("A+1999".parse::<ApproximateDate>().is_ok());
    assert!("+1999/+2000".parse::<DateRange>().is_ok());
    assert!("R/+1999/P1D".parse::<RecurringDate>().is_ok());
    assert!("PT1S".parse::<Duration>().is_ok());

    // each variant parser accepts only its own production
    assert!("A+1999".parse::<SimpleDate>().is_err());
    assert!("+1999".parse::<ApproximateDate>().is_err());
    assert!("P1D".parse::<SimpleDate>().is_err());
    assert!("+1999".parse::<Duration>().is_err());
}

#[test]
fn parse_matches_from_str() {
    for src in ["+1999", "A+1999", "+1999/P1Y", "R2/+1999/P1D", "P1D"] {
        let via_parse = parse(src).unwrap();
        let via_from_str: GedcomxDate = src.parse().unwrap();
        assert_eq!(via_parse, via_from_str, "{src}");
    }
}
