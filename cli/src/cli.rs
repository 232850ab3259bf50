// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf, process::ExitCode};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_fmt::CmdFmt;
use crate::cmd_show::CmdShow;
use crate::cmd_tokens::CmdTokens;
use crate::config::{ParseOverrides, parse_config};
use crate::report::Reported;

/// Name of the executable.
pub const APP_NAME: &str = "calyx";

/// Run the Calyx command-line interface.
pub fn run() -> ExitCode {
    init_tracing();

    let result = Cli::parse().and_then(Cli::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // reports rendered with their source are not repeated
            if !e.is::<Reported>() {
                eprintln!("{} {}", "Error:".red(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Parse options given on the command line
    pub overrides: ParseOverrides,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    #[must_use]
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Tokenize, inspect and re-encode iCalendar files.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Falls back to $CALYX_CONFIG; without either, built-in defaults are used.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(arg!(--strict "Reject lines terminated by a bare LF").global(true))
            .arg(
                arg!(--zone [ZONE] "Time zone applied to every local date-time, e.g. Europe/Berlin")
                    .global(true),
            )
            .arg(
                arg!(--"inclusive-dtend" "Treat DATE-typed DTEND values as the last day of the event")
                    .global(true),
            )
            .subcommand(CmdTokens::command())
            .subcommand(CmdShow::command())
            .subcommand(CmdFmt::command())
    }

    /// Parse the command-line arguments
    ///
    /// # Errors
    /// Never returns an error for bad arguments; clap prints usage and exits.
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    ///
    /// # Errors
    /// Returns an error if the arguments do not match the interface.
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
    ///
    /// # Errors
    /// Returns an error if no known subcommand was matched.
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let command = match matches.subcommand() {
            Some((CmdTokens::NAME, matches)) => Commands::Tokens(CmdTokens::from(matches)),
            Some((CmdShow::NAME, matches)) => Commands::Show(CmdShow::from(matches)),
            Some((CmdFmt::NAME, matches)) => Commands::Fmt(CmdFmt::from(matches)),
            _ => return Err("No command given".into()),
        };

        let overrides = ParseOverrides {
            strict: matches.get_flag("strict"),
            zone: matches.get_one::<String>("zone").cloned(),
            inclusive_dtend: matches.get_flag("inclusive-dtend"),
        };
        let config = matches.get_one("config").cloned();
        Ok(Cli {
            config,
            overrides,
            command,
        })
    }

    /// Run the command
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the command fails.
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("Parsing configuration...");
        let options = parse_config(self.config)?.parse_options(&self.overrides)?;
        self.command.run(&options)
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Print the token stream
    Tokens(CmdTokens),

    /// Print the resolved calendar
    Show(CmdShow),

    /// Re-encode the calendar
    Fmt(CmdFmt),
}

impl Commands {
    /// Run the command with the given parse options
    ///
    /// # Errors
    /// Returns an error if reading, parsing or writing fails.
    pub fn run(self, options: &calyx_ical::ParseOptions) -> Result<(), Box<dyn Error>> {
        match self {
            Commands::Tokens(a) => a.run(options),
            Commands::Show(a) => a.run(options),
            Commands::Fmt(a) => a.run(options),
        }
    }
}
