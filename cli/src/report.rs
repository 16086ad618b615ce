// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, ops::Range};

use ariadne::{Color, Label, Report, ReportKind, Source};
use gedcomx_date::{ParseError, Span};

/// Write a diagnostic for `err` that points into `src`.
///
/// Errors without a location underline the whole input. Colors follow the
/// same switches as the rest of the output, see [`colored::control`].
pub fn write_report(w: &mut impl io::Write, src: &str, err: &ParseError) -> io::Result<()> {
    let color = colored::control::SHOULD_COLORIZE.should_colorize();
    write_report_with(w, src, err, color)
}

fn write_report_with(
    w: &mut impl io::Write,
    src: &str,
    err: &ParseError,
    color: bool,
) -> io::Result<()> {
    let span: Range<usize> = err.span().map_or(0..src.len(), Span::into_range);
    let config = ariadne::Config::new()
        .with_index_type(ariadne::IndexType::Byte)
        .with_color(color);
    Report::build(ReportKind::Error, span.clone())
        .with_config(config)
        .with_message(err.to_string())
        .with_label(
            Label::new(span)
                .with_message(err.message())
                .with_color(Color::Red),
        )
        .finish()
        .write(Source::from(src), w)
}

/// Parse one command line operand, reporting a failure against its text.
pub fn parse_operand<T>(
    err_out: &mut impl io::Write,
    src: &str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<T, Box<dyn Error>> {
    match parse(src) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::debug!(src, error = %e, "operand rejected");
            write_report(err_out, src, &e)?;
            Err(format!("Failed to parse '{src}'").into())
        }
    }
}
