// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! gxdate - parse, render and compute with GEDCOM X formal dates

use std::process::ExitCode;

fn main() -> ExitCode {
    gedcomx_date_cli::run()
}
