// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line front end for GEDCOM X formal dates.

mod cli;
mod cmd_arithmetic;
mod cmd_generate_completion;
mod cmd_parse;
mod config;
mod logging;
mod report;
mod util;

pub use crate::cli::{APP_NAME, Cli, Commands, run};
pub use crate::config::{AssumedOffset, Config};
