// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, render and compute with GEDCOM X formal date strings.
//!
//! ```
//! use gedcomx_date::parse;
//!
//! let date = parse("R3/+2000/P1Y").unwrap();
//! let recurring = date.as_recurring().unwrap();
//! assert_eq!(recurring.end().unwrap().to_formal_string(), "+2003");
//! assert_eq!(date.to_formal_string(), "R3/+2000/P1Y");
//! ```
//!
//! Dates are on the proleptic Gregorian calendar with no year zero: `-0001`
//! is the year before `+0001`. A time of day written without an offset is
//! taken to be in UTC unless [`ParseOptions`] say otherwise.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod approximate;
mod arithmetic;
mod calendar;
mod date;
mod duration;
mod error;
mod lexer;
mod options;
mod range;
mod recurring;
mod scanner;
mod simple;

pub use crate::approximate::ApproximateDate;
pub use crate::arithmetic::{add_duration, duration_between, multiply_duration};
pub use crate::calendar::{MAX_YEAR, days_in_month, is_leap_year};
pub use crate::date::{DateKind, GedcomxDate};
pub use crate::duration::Duration;
pub use crate::error::{ParseError, ParseErrorKind, Span};
pub use crate::options::ParseOptions;
pub use crate::range::DateRange;
pub use crate::recurring::RecurringDate;
pub use crate::simple::{SimpleDate, UtcOffset};

/// Parse any formal date string, assuming UTC for times without an offset.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the production and the sub-part that failed.
pub fn parse(src: &str) -> Result<GedcomxDate, ParseError> {
    GedcomxDate::parse_with(src, &ParseOptions::default())
}

/// Parse any formal date string with explicit options.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the production and the sub-part that failed.
pub fn parse_with(src: &str, options: &ParseOptions) -> Result<GedcomxDate, ParseError> {
    GedcomxDate::parse_with(src, options)
}
