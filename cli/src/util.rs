// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use colored::Colorize;
use serde::Serialize;

/// The output format for commands
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArgOutputFormat {
    Json,
    #[default]
    Table,
}

impl ArgOutputFormat {
    /// No default value here, so the configuration file can fill it in.
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
    }

    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("output-format").copied()
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show more detailed logs, repeat for more")
        .action(ArgAction::Count)
        .global(true)
}

pub fn get_verbose(matches: &ArgMatches) -> u8 {
    matches.get_count("verbose")
}

/// Write label and value pairs as two aligned columns.
pub fn write_table(w: &mut impl io::Write, rows: &[(&str, String)]) -> io::Result<()> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        let padding = " ".repeat(width - label.len());
        writeln!(w, "{}{padding}  {value}", label.bold())?;
    }
    Ok(())
}

pub fn write_json(w: &mut impl io::Write, value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}
