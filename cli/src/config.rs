// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt, fs, path::PathBuf, str::FromStr};

use gedcomx_date::{ParseError, ParseOptions, UtcOffset};

use crate::cli::APP_NAME;
use crate::util::ArgOutputFormat;

const GXDATE_CONFIG_ENV: &str = "GXDATE_CONFIG";

/// Load the configuration.
///
/// The file is looked up from `path`, then `GXDATE_CONFIG`, then the user
/// configuration directory. Only the last one may be missing.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(GXDATE_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    tracing::debug!(path = %path.display(), "reading config");
    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e).into())
}

/// Configuration for the gxdate command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Offset for times written without one.
    pub assumed_offset: AssumedOffset,

    /// Output format used when `--output-format` is not given.
    pub output_format: Option<ArgOutputFormat>,
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        self.assumed_offset.parse_options()
    }

    pub fn output_format(&self, flag: Option<ArgOutputFormat>) -> ArgOutputFormat {
        flag.or(self.output_format).unwrap_or_default()
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Either a fixed offset or the offset of the host time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum AssumedOffset {
    Fixed(UtcOffset),
    Local,
}

impl AssumedOffset {
    pub fn parse_options(self) -> ParseOptions {
        match self {
            AssumedOffset::Fixed(offset) => ParseOptions::with_offset(offset),
            AssumedOffset::Local => ParseOptions::local(),
        }
    }
}

impl Default for AssumedOffset {
    fn default() -> Self {
        AssumedOffset::Fixed(UtcOffset::UTC)
    }
}

impl FromStr for AssumedOffset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            Ok(AssumedOffset::Local)
        } else {
            s.parse().map(AssumedOffset::Fixed)
        }
    }
}

impl TryFrom<String> for AssumedOffset {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for AssumedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssumedOffset::Fixed(offset) => write!(f, "{offset}"),
            AssumedOffset::Local => write!(f, "local"),
        }
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
