// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the parser and the formal string renderer.
//!
//! Parsing a canonical formal string and rendering it again must give back the
//! same text, and parsing that text must give back an equal value.

use gedcomx_date::{GedcomxDate, ParseOptions, UtcOffset, parse, parse_with};

const CANONICAL: &[&str] = &[
    // simple
    "+1999",
    "-0001",
    "-9999",
    "+9999-12-31",
    "+1999-05",
    "+1999-05-12",
    "+2000-02-29",
    "+1999-05-12T10",
    "+1999-05-12T10:30",
    "+1999-05-12T10:30:00",
    "+1999-05-12T10:30:00Z",
    "+1999-05-12T10:30:00-05:00",
    "+1999-05-12T24:00:00+14:00",
    "+1999T10Z",
    "+1999-05T10:30-00:30",
    // approximate
    "A+1999",
    "A-0044-03-15",
    "A+1999-05-12T10:30:00Z",
    // ranges
    "+1999/+2000",
    "+1999/P1Y",
    "A+1999/+2000",
    "A+1999/P1Y2M",
    "+1999-05-12/",
    "/+1999-05-12",
    "A/+1999",
    "+1999-05-12T10:00:00Z/PT36H",
    "+1999-01-31/+1999-03-01",
    // recurring
    "R3/+2000/P1Y",
    "R/+2000/P1Y",
    "R0/+2000/+2001",
    "R12/A+1999-05/P1M",
    "R2/+1999-05-12T10:00Z/+1999-05-12T12:00Z",
    // durations
    "P1Y",
    "P1Y2M3D",
    "P1Y2M3DT4H5M6S",
    "PT1M",
    "P1MT1M",
    "P0Y",
    "PT0S",
    "P100D",
];

#[test]
fn round_trip_canonical_strings() {
    for src in CANONICAL {
        let date = parse(src).unwrap_or_else(|e| panic!("Failed to parse {src}: {e}"));
        let rendered = date.to_formal_string();
        assert_eq!(&rendered, src);

        let again = parse(&rendered).unwrap();
        assert_eq!(date, again, "{src}");
    }
}

#[test]
fn round_trip_normalizes_padding_and_zulu() {
    #[rustfmt::skip]
    let cases = [
        ("+1999-05-12T10:30:00+00:00", "+1999-05-12T10:30:00Z"),
        ("+1999-05-12T10-05",          "+1999-05-12T10-05:00"),
        ("P007D",                      "P7D"),
        ("P0010Y",                     "P10Y"),
        ("R003/+2000/P1Y",             "R3/+2000/P1Y"),
    ];
    for (src, canonical) in cases {
        let date = parse(src).unwrap();
        assert_eq!(date.to_formal_string(), canonical, "{src}");
        assert_eq!(parse(canonical).unwrap().to_formal_string(), canonical);
    }
}

#[test]
fn round_trip_ignores_assumed_offset() {
    let options = ParseOptions::with_offset(UtcOffset::from_minutes(9 * 60).unwrap());
    for src in ["+1999-05-12T10:30", "+1999/+1999-05-12T10", "R/+2000T00/PT6H"] {
        let date = parse_with(src, &options).unwrap();
        assert_eq!(date.to_formal_string(), src);
    }
}

#[test]
fn derived_range_members_render_like_written_ones() {
    let by_duration = parse("+1999-05-12/P1Y2M3D").unwrap();
    let by_end = parse("+1999-05-12/+2000-07-15").unwrap();
    let (by_duration, by_end) = (by_duration.as_range().unwrap(), by_end.as_range().unwrap());

    let derived_end = by_duration.end().unwrap().to_formal_string();
    let derived_duration = by_end.duration().unwrap().to_formal_string();
    assert_eq!(derived_end, "+2000-07-15");
    assert_eq!(derived_duration, "P1Y2M3D");

    // writing the derived member back produces the sibling range
    let swapped: GedcomxDate = format!("+1999-05-12/{derived_end}").parse().unwrap();
    assert_eq!(swapped.as_range(), Some(by_end));
    let swapped: GedcomxDate = format!("+1999-05-12/{derived_duration}").parse().unwrap();
    assert_eq!(swapped.as_range(), Some(by_duration));
}

#[cfg(feature = "serde")]
#[test]
fn round_trip_through_serde() {
    for src in CANONICAL {
        let date = parse(src).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, format!("\"{src}\""));
        let back: GedcomxDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }

    let err = serde_json::from_str::<GedcomxDate>("\"+1999-13\"").unwrap_err();
    assert!(err.to_string().contains("Month must be between 1 and 12"));
}
