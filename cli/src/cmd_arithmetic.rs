// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use gedcomx_date::{
    Duration, RecurringDate, SimpleDate, add_duration, duration_between, multiply_duration,
};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::config::Config;
use crate::report::parse_operand;
use crate::util::{ArgOutputFormat, write_json, write_table};

#[derive(Debug, Clone)]
pub struct CmdAdd {
    pub date: String,
    pub duration: String,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Add a duration to a simple date")
            .arg(ArgOutputFormat::arg())
            .arg(operand(arg!(date: <DATE> "Start date, e.g. +1999-01-31")))
            .arg(operand(arg!(duration: <DURATION> "Duration to add, e.g. P1M")))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: get_operand(matches, "date"),
            duration: get_operand(matches, "duration"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        self.write_to(config, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    pub fn write_to(
        &self,
        config: &Config,
        out: &mut impl io::Write,
        err_out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding duration...");
        let options = config.parse_options();
        let start = parse_operand(err_out, &self.date, |s| SimpleDate::parse_with(s, &options))?;
        let duration = parse_operand(err_out, &self.duration, str::parse::<Duration>)?;

        let result = add_duration(&start, &duration)?;
        Computation {
            operation: Self::NAME,
            operands: vec![
                ("start", start.to_formal_string()),
                ("duration", duration.to_formal_string()),
            ],
            result: result.to_formal_string(),
        }
        .write(out, config.output_format(self.output_format))
    }
}

#[derive(Debug, Clone)]
pub struct CmdBetween {
    pub start: String,
    pub end: String,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdBetween {
    pub const NAME: &str = "between";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Compute the duration between two simple dates")
            .arg(ArgOutputFormat::arg())
            .arg(operand(arg!(start: <START> "Start date")))
            .arg(operand(arg!(end: <END> "End date, not before the start")))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            start: get_operand(matches, "start"),
            end: get_operand(matches, "end"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        self.write_to(config, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    pub fn write_to(
        &self,
        config: &Config,
        out: &mut impl io::Write,
        err_out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing duration...");
        let options = config.parse_options();
        let start = parse_operand(err_out, &self.start, |s| SimpleDate::parse_with(s, &options))?;
        let end = parse_operand(err_out, &self.end, |s| SimpleDate::parse_with(s, &options))?;

        let result = duration_between(&start, &end)?;
        Computation {
            operation: Self::NAME,
            operands: vec![
                ("start", start.to_formal_string()),
                ("end", end.to_formal_string()),
            ],
            result: result.to_formal_string(),
        }
        .write(out, config.output_format(self.output_format))
    }
}

#[derive(Debug, Clone)]
pub struct CmdScale {
    pub duration: String,
    pub factor: u32,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdScale {
    pub const NAME: &str = "scale";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Multiply every field of a duration")
            .arg(ArgOutputFormat::arg())
            .arg(arg!(duration: <DURATION> "Duration to scale"))
            .arg(arg!(factor: <N> "Non-negative factor").value_parser(value_parser!(u32)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            duration: get_operand(matches, "duration"),
            factor: matches.get_one("factor").copied().unwrap_or_default(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        self.write_to(config, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    pub fn write_to(
        &self,
        config: &Config,
        out: &mut impl io::Write,
        err_out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "scaling duration...");
        let duration = parse_operand(err_out, &self.duration, str::parse::<Duration>)?;

        let result = multiply_duration(&duration, self.factor)?;
        Computation {
            operation: Self::NAME,
            operands: vec![
                ("duration", duration.to_formal_string()),
                ("factor", self.factor.to_string()),
            ],
            result: result.to_formal_string(),
        }
        .write(out, config.output_format(self.output_format))
    }
}

#[derive(Debug, Clone)]
pub struct CmdNth {
    pub recurring: String,
    pub index: u32,
    pub output_format: Option<ArgOutputFormat>,
}

impl CmdNth {
    pub const NAME: &str = "nth";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Start of the n-th occurrence of a recurring date, counting from 0")
            .arg(ArgOutputFormat::arg())
            .arg(arg!(recurring: <RECURRING> "Recurring date, e.g. R3/+2000/P1Y"))
            .arg(arg!(index: <N> "Occurrence index").value_parser(value_parser!(u32)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            recurring: get_operand(matches, "recurring"),
            index: matches.get_one("index").copied().unwrap_or_default(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        self.write_to(config, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    pub fn write_to(
        &self,
        config: &Config,
        out: &mut impl io::Write,
        err_out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing occurrence...");
        let options = config.parse_options();
        let recurring = parse_operand(err_out, &self.recurring, |s| {
            RecurringDate::parse_with(s, &options)
        })?;

        if let Some(count) = recurring.count()
            && self.index > count
        {
            tracing::warn!(count, index = self.index, "occurrence is past the last repetition");
        }

        let result = recurring.nth(self.index)?;
        Computation {
            operation: Self::NAME,
            operands: vec![
                ("recurring", recurring.to_formal_string()),
                ("index", self.index.to_string()),
            ],
            result: result.to_formal_string(),
        }
        .write(out, config.output_format(self.output_format))
    }
}

/// Result of one arithmetic command together with its normalized operands.
#[derive(Debug)]
struct Computation {
    operation: &'static str,
    operands: Vec<(&'static str, String)>,
    result: String,
}

impl Computation {
    fn write(&self, out: &mut impl io::Write, format: ArgOutputFormat) -> Result<(), Box<dyn Error>> {
        match format {
            ArgOutputFormat::Json => write_json(out, self),
            ArgOutputFormat::Table => {
                let mut rows = self.operands.clone();
                rows.push(("result", self.result.clone()));
                Ok(write_table(out, &rows)?)
            }
        }
    }
}

impl Serialize for Computation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.operands.len() + 2))?;
        map.serialize_entry("operation", self.operation)?;
        for (label, value) in &self.operands {
            map.serialize_entry(label, value)?;
        }
        map.serialize_entry("result", &self.result)?;
        map.end()
    }
}

/// Operands may start with `-` for years before the common era.
fn operand(arg: Arg) -> Arg {
    arg.allow_hyphen_values(true)
}

fn get_operand(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}
