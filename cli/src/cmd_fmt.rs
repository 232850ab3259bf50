// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
};

use calyx_ical::{FormatOptions, ParseOptions, parse_file};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};

use crate::report;

/// Parse a file and write it back with sorted parameters and folded lines.
#[derive(Debug, Clone)]
pub struct CmdFmt {
    pub file: PathBuf,
    pub no_fold: bool,
}

impl CmdFmt {
    pub const NAME: &str = "fmt";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Re-encode an iCalendar file to standard output")
            .arg(
                arg!(file: <FILE> "The iCalendar file to read")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--"no-fold" "Do not fold lines longer than 75 octets"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<PathBuf>("file") {
            Some(file) => Self {
                file: file.clone(),
                no_fold: matches.get_flag("no-fold"),
            },
            _ => unreachable!(),
        }
    }

    pub fn run(self, options: &ParseOptions) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "formatting calendar...");
        let mut stdout = io::stdout().lock();
        self.write(options, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn write(&self, options: &ParseOptions, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
        let calendar =
            parse_file(&self.file, options).map_err(|e| report::parse_error(&self.file, e))?;

        let folding = if self.no_fold { None } else { Some(75) };
        FormatOptions::default()
            .folding(folding)
            .write(&calendar, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fmt(src: &str, no_fold: bool) -> String {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.ics");
        fs::write(&file, src).unwrap();

        let mut out = Vec::new();
        CmdFmt { file, no_fold }
            .write(&ParseOptions::default(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn normalizes_line_breaks_and_parameters() {
        let src = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nX-P;B=2;A=1:v\nEND:VEVENT\nEND:VCALENDAR\n";
        assert_eq!(
            fmt(src, false),
            "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nX-P;A=1;B=2:v\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn folding_can_be_disabled() {
        let value = "x".repeat(90);
        let src = format!("BEGIN:VCALENDAR\r\nX-LONG:{value}\r\nEND:VCALENDAR\r\n");
        assert_eq!(fmt(&src, true), src);
        assert_ne!(fmt(&src, false), src);
    }
}
