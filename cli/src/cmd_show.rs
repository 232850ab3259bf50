// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
};

use calyx_ical::{Alarm, Calendar, Event, ParseOptions, parse_file};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use jiff::Zoned;

use crate::report;

/// Print the fields derived from a calendar file.
#[derive(Debug, Clone)]
pub struct CmdShow {
    pub file: PathBuf,
}

impl CmdShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show calendar, event and alarm fields of an iCalendar file")
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
        tracing::debug!(?self, "showing calendar...");
        self.write(options, &mut io::stdout().lock())
    }

    fn write(&self, options: &ParseOptions, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
        let calendar =
            parse_file(&self.file, options).map_err(|e| report::parse_error(&self.file, e))?;
        write_calendar(out, &calendar)?;
        Ok(())
    }
}

fn write_calendar(out: &mut impl Write, calendar: &Calendar) -> io::Result<()> {
    writeln!(out, "🗓️ {}", "Calendar".bold())?;
    field(out, 1, "version", calendar.version.as_deref())?;
    field(out, 1, "product", calendar.product_id.as_deref())?;
    field(out, 1, "calscale", Some(calendar.calscale.as_str()))?;
    field(out, 1, "method", calendar.method.as_deref())?;

    writeln!(out)?;
    writeln!(out, "{} ({})", "Events".bold(), calendar.events.len())?;
    for event in &calendar.events {
        write_event(out, event)?;
    }

    if !calendar.alarms.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} ({})", "Alarms".bold(), calendar.alarms.len())?;
        for alarm in &calendar.alarms {
            write_alarm(out, 1, alarm)?;
        }
    }
    Ok(())
}

fn write_event(out: &mut impl Write, event: &Event) -> io::Result<()> {
    let summary = event.summary.as_deref().unwrap_or("(no summary)");
    writeln!(out, "  - {}", summary.green())?;
    field(out, 2, "uid", event.uid.as_deref())?;
    time(out, 2, "start", event.start.as_ref())?;
    time(out, 2, "end", event.end.as_ref())?;
    time(out, 2, "stamp", event.timestamp.as_ref())?;
    field(out, 2, "description", event.description.as_deref())?;
    for alarm in &event.alarms {
        write_alarm(out, 2, alarm)?;
    }
    Ok(())
}

fn write_alarm(out: &mut impl Write, depth: usize, alarm: &Alarm) -> io::Result<()> {
    let action = alarm.action.as_deref().unwrap_or("(no action)");
    writeln!(out, "{:indent$}- alarm {}", "", action.yellow(), indent = depth * 2)?;
    field(out, depth + 1, "trigger", alarm.trigger.as_deref())?;
    time(out, depth + 1, "trigger at", alarm.trigger_at.as_ref())
}

fn field(out: &mut impl Write, depth: usize, name: &str, value: Option<&str>) -> io::Result<()> {
    match value {
        Some(value) => writeln!(out, "{:indent$}{name}: {value}", "", indent = depth * 2),
        None => Ok(()),
    }
}

fn time(out: &mut impl Write, depth: usize, name: &str, value: Option<&Zoned>) -> io::Result<()> {
    let value = value.map(ToString::to_string);
    field(out, depth, name, value.as_deref())
}
