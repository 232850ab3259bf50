// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for the `calyx-ical` pipeline.

mod cli;
mod cmd_fmt;
mod cmd_show;
mod cmd_tokens;
mod config;
mod report;

pub use crate::cli::{APP_NAME, Cli, Commands, run};
pub use crate::config::{Config, ParseOverrides};
