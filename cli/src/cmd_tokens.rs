// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use calyx_ical::{ParseOptions, TokenKind, Tokenizer};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};

use crate::report;

/// Print the token stream of a file, one token per line.
#[derive(Debug, Clone)]
pub struct CmdTokens {
    pub file: PathBuf,
}

impl CmdTokens {
    pub const NAME: &str = "tokens";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the tokens of an iCalendar file")
            .arg(
                arg!(file: <FILE> "The iCalendar file to read")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<PathBuf>("file") {
            Some(file) => Self { file: file.clone() },
            _ => unreachable!(),
        }
    }

    pub fn run(self, options: &ParseOptions) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "printing tokens...");
        self.write(options, &mut io::stdout().lock())
    }

    fn write(&self, options: &ParseOptions, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
        let file = File::open(&self.file)
            .map_err(|e| format!("Failed to open {}: {}", self.file.display(), e))?;

        for token in Tokenizer::new(BufReader::new(file), options) {
            if token.kind == TokenKind::Error {
                return Err(report::token_error(&self.file, token.offset, &token.text));
            }
            writeln!(out, "{:>8}  {token}", token.offset)?;
        }
        Ok(())
    }
}
