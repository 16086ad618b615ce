// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode, str::FromStr};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;

use crate::cmd_arithmetic::{CmdAdd, CmdBetween, CmdNth, CmdScale};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_parse::CmdParse;
use crate::config::{AssumedOffset, Config, parse_config};
use crate::logging;
use crate::util::{arg_verbose, get_verbose};

/// Name of the command, also used for the configuration directory.
pub const APP_NAME: &str = "gxdate";

/// Run the gxdate command-line interface.
pub fn run() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.verbose);
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Offset for times written without one, overriding the configuration
    pub offset: Option<AssumedOffset>,

    /// Verbosity level, the number of `-v` flags
    pub verbose: u8,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Parse, render and compute with GEDCOM X formal dates.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $GXDATE_CONFIG, then \
$XDG_CONFIG_HOME/gxdate/config.toml on Linux and MacOS, %APPDATA%/gxdate/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(
                arg!(--offset <OFFSET> "Offset for times written without one")
                    .long_help(
                        "\
Offset for times written without one: Z, +HH:MM, -HH:MM or local. \
Overrides assumed_offset in the configuration file, which defaults to Z.",
                    )
                    .value_parser(AssumedOffset::from_str)
                    .allow_hyphen_values(true)
                    .global(true),
            )
            .arg(arg_verbose())
            .subcommand(CmdParse::command())
            .subcommand(CmdAdd::command())
            .subcommand(CmdBetween::command())
            .subcommand(CmdScale::command())
            .subcommand(CmdNth::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdParse::NAME, matches)) => Parse(CmdParse::from(matches)),
            Some((CmdAdd::NAME, matches)) => Add(CmdAdd::from(matches)),
            Some((CmdBetween::NAME, matches)) => Between(CmdBetween::from(matches)),
            Some((CmdScale::NAME, matches)) => Scale(CmdScale::from(matches)),
            Some((CmdNth::NAME, matches)) => Nth(CmdNth::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
            None => return Err("No command given".into()),
        };

        Ok(Cli {
            config: matches.get_one("config").cloned(),
            offset: matches.get_one("offset").copied(),
            verbose: get_verbose(matches),
            command,
        })
    }

    /// Run the command
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config, self.offset)
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Parse formal dates
    Parse(CmdParse),

    /// Add a duration to a date
    Add(CmdAdd),

    /// Duration between two dates
    Between(CmdBetween),

    /// Multiply a duration
    Scale(CmdScale),

    /// Occurrence of a recurring date
    Nth(CmdNth),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub fn run(self, config: Option<PathBuf>, offset: Option<AssumedOffset>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Parse(a)   => a.run(&Self::load_config(config, offset)?),
            Add(a)     => a.run(&Self::load_config(config, offset)?),
            Between(a) => a.run(&Self::load_config(config, offset)?),
            Scale(a)   => a.run(&Self::load_config(config, offset)?),
            Nth(a)     => a.run(&Self::load_config(config, offset)?),
            GenerateCompletion(a) => a.run(),
        }
    }

    fn load_config(
        path: Option<PathBuf>,
        offset: Option<AssumedOffset>,
    ) -> Result<Config, Box<dyn Error>> {
        tracing::debug!("Parsing configuration...");
        let mut config = parse_config(path)?;
        if let Some(offset) = offset {
            config.assumed_offset = offset;
        }
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use gedcomx_date::UtcOffset;

    #[test]
    fn test_parse_config() {
        let args = ["test", "-c", "/tmp/config.toml", "parse", "+1999"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Parse(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = ["test", "parse", "--config", "/tmp/config.toml", "-vv", "+1999"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_offset() {
        #[rustfmt::skip]
        let cases = [
            ("Z",      AssumedOffset::Fixed(UtcOffset::UTC)),
            ("+05:30", AssumedOffset::Fixed(UtcOffset::from_minutes(330).unwrap())),
            ("-08:00", AssumedOffset::Fixed(UtcOffset::from_minutes(-480).unwrap())),
            ("local",  AssumedOffset::Local),
        ];
        for (offset, expected) in cases {
            let args = ["test", "--offset", offset, "parse", "+1999"];
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.offset, Some(expected), "{offset}");
        }

        let args = ["test", "--offset", "+24:00", "parse", "+1999"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["test", "parse", "+1999"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.offset, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["test"]).is_err());
        assert!(Cli::try_parse_from(["test", "unknown"]).is_err());
    }

    #[test]
    fn test_parse_generate_completion() {
        let args = ["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            _ => panic!("Expected GenerateCompletion command"),
        }
    }

    #[test]
    fn test_offset_overrides_config() {
        let config = Commands::load_config(
            Some(PathBuf::from("/nonexistent/gxdate.toml")),
            Some(AssumedOffset::Local),
        );
        assert!(config.is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, r#"assumed_offset = "+01:00""#).unwrap();

        let offset = "-03:00".parse().unwrap();
        let config = Commands::load_config(Some(path), Some(offset)).unwrap();
        assert_eq!(config.assumed_offset, offset);
    }
}
