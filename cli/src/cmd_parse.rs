// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt::Display, io};

use clap::{ArgMatches, Command, arg};
use gedcomx_date::{Duration, GedcomxDate, SimpleDate, parse_with};
use serde::Serialize;

use crate::config::Config;
use crate::report::write_report;
use crate::util::{ArgOutputFormat, write_json, write_table};

#[derive(Debug, Clone)]
pub struct CmdParse {
    pub dates: Vec<String>,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdParse {
    pub const NAME: &str = "parse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Parse formal dates and show their components")
            .arg(ArgOutputFormat::arg())
            .arg(
                arg!(dates: <DATE> "Formal date strings, e.g. +1999-05-12 or R3/+2000/P1Y")
                    .num_args(1..)
                    .allow_hyphen_values(true),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            dates: matches
                .get_many::<String>("dates")
                .map(|a| a.cloned().collect())
                .unwrap_or_default(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        self.write_to(config, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    /// Parse every date, printing reports to `out` and diagnostics to `err_out`.
    pub fn write_to(
        &self,
        config: &Config,
        out: &mut impl io::Write,
        err_out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "parsing dates...");
        let options = config.parse_options();

        let mut reports = Vec::with_capacity(self.dates.len());
        let mut failed = 0;
        for src in &self.dates {
            match parse_with(src, &options) {
                Ok(date) => reports.push(DateReport::new(src, &date)),
                Err(e) => {
                    failed += 1;
                    write_report(err_out, src, &e)?;
                }
            }
        }

        match config.output_format(self.output_format) {
            ArgOutputFormat::Json => write_json(out, &reports)?,
            ArgOutputFormat::Table => {
                for (i, report) in reports.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    write_table(out, &report.rows())?;
                }
            }
        }

        if failed > 0 {
            return Err(format!("{failed} of {} dates failed to parse", self.dates.len()).into());
        }
        Ok(())
    }
}

/// Components of one parsed date.
#[derive(Debug, Serialize)]
pub struct DateReport {
    pub input: String,
    pub kind: String,
    pub formal: String,
    pub approximate: bool,
    #[serde(flatten)]
    pub detail: Detail,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Simple(SimpleFields),
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<SimpleFields>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<SimpleFields>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration: Option<String>,
    },
    Recurring {
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
        start: SimpleFields,
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<SimpleFields>,
        duration: String,
    },
    Duration(DurationFields),
}

impl DateReport {
    pub fn new(src: &str, date: &GedcomxDate) -> Self {
        let detail = match date {
            GedcomxDate::Simple(d) => Detail::Simple(SimpleFields::flat(d)),
            GedcomxDate::Approximate(d) => Detail::Simple(SimpleFields::flat(d.date())),
            GedcomxDate::Range(r) => Detail::Range {
                start: r.start().map(SimpleFields::from),
                end: r.end().map(SimpleFields::from),
                duration: r.duration().map(Duration::to_formal_string),
            },
            GedcomxDate::Recurring(r) => Detail::Recurring {
                count: r.count(),
                start: r.start().into(),
                end: r.end().map(SimpleFields::from),
                duration: r.duration().to_formal_string(),
            },
            GedcomxDate::Duration(d) => Detail::Duration(d.into()),
        };

        Self {
            input: src.to_string(),
            kind: date.kind().to_string(),
            formal: date.to_formal_string(),
            approximate: date.is_approximate(),
            detail,
        }
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("input", self.input.clone()),
            ("kind", self.kind.clone()),
            ("formal", self.formal.clone()),
        ];
        if self.approximate {
            rows.push(("approximate", "yes".to_string()));
        }

        match &self.detail {
            Detail::Simple(fields) => fields.push_rows(&mut rows),
            Detail::Range {
                start,
                end,
                duration,
            } => {
                push(&mut rows, "start", start.as_ref().and_then(|a| a.formal.as_ref()));
                push(&mut rows, "end", end.as_ref().and_then(|a| a.formal.as_ref()));
                push(&mut rows, "duration", duration.as_ref());
            }
            Detail::Recurring {
                count,
                start,
                end,
                duration,
            } => {
                let count = count.map_or_else(|| "unbounded".to_string(), |n| n.to_string());
                rows.push(("count", count));
                push(&mut rows, "start", start.formal.as_ref());
                push(&mut rows, "end", end.as_ref().and_then(|a| a.formal.as_ref()));
                rows.push(("duration", duration.clone()));
            }
            Detail::Duration(fields) => fields.push_rows(&mut rows),
        }
        rows
    }
}

#[derive(Debug, Serialize)]
pub struct SimpleFields {
    /// Left out when flattened into a report that already has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formal: Option<String>,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    /// Set when the time was written without an offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumed_offset: Option<String>,
}

impl SimpleFields {
    fn flat(date: &SimpleDate) -> Self {
        Self {
            formal: None,
            ..Self::from(date)
        }
    }

    fn push_rows(&self, rows: &mut Vec<(&'static str, String)>) {
        rows.push(("year", self.year.to_string()));
        push(rows, "month", self.month);
        push(rows, "day", self.day);
        push(rows, "hours", self.hours);
        push(rows, "minutes", self.minutes);
        push(rows, "seconds", self.seconds);
        push(rows, "offset", self.offset.as_ref());
        push(
            rows,
            "offset",
            self.assumed_offset.as_ref().map(|a| format!("{a} (assumed)")),
        );
    }
}

impl From<&SimpleDate> for SimpleFields {
    fn from(date: &SimpleDate) -> Self {
        let explicit = date.explicit_offset();
        Self {
            formal: Some(date.to_formal_string()),
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hours: date.hours(),
            minutes: date.minutes(),
            seconds: date.seconds(),
            offset: explicit.map(|a| a.to_string()),
            assumed_offset: match explicit {
                Some(_) => None,
                None => date.utc_offset().map(|a| a.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DurationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
}

impl DurationFields {
    fn push_rows(&self, rows: &mut Vec<(&'static str, String)>) {
        push(rows, "years", self.years);
        push(rows, "months", self.months);
        push(rows, "days", self.days);
        push(rows, "hours", self.hours);
        push(rows, "minutes", self.minutes);
        push(rows, "seconds", self.seconds);
    }
}

impl From<&Duration> for DurationFields {
    fn from(d: &Duration) -> Self {
        Self {
            years: d.years(),
            months: d.months(),
            days: d.days(),
            hours: d.hours(),
            minutes: d.minutes(),
            seconds: d.seconds(),
        }
    }
}

fn push(rows: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<impl Display>) {
    if let Some(value) = value {
        rows.push((label, value.to_string()));
    }
}
