// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting for the calendar, event and alarm blocks.

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::formatter::property::write_properties;
use crate::keyword::{KW_BEGIN, KW_END, KW_VALARM, KW_VCALENDAR, KW_VEVENT};
use crate::semantic::{Alarm, Calendar, Event};

/// Format a `Calendar` component.
///
/// Calendar properties come first, then each event, then any alarms
/// attached directly to the calendar.
pub fn write_calendar<W: Write>(f: &mut Formatter<W>, calendar: &Calendar) -> io::Result<()> {
    with_block(f, KW_VCALENDAR, |f| {
        write_properties(f, &calendar.properties)?;

        for event in &calendar.events {
            write_event(f, event)?;
        }

        for alarm in &calendar.alarms {
            write_alarm(f, alarm)?;
        }

        Ok(())
    })
}

fn write_event<W: Write>(f: &mut Formatter<W>, event: &Event) -> io::Result<()> {
    with_block(f, KW_VEVENT, |f| {
        write_properties(f, &event.properties)?;
        for alarm in &event.alarms {
            write_alarm(f, alarm)?;
        }
        Ok(())
    })
}

fn write_alarm<W: Write>(f: &mut Formatter<W>, alarm: &Alarm) -> io::Result<()> {
    with_block(f, KW_VALARM, |f| write_properties(f, &alarm.properties))
}

fn with_block<W: Write, F: FnOnce(&mut Formatter<W>) -> io::Result<()>>(
    f: &mut Formatter<W>,
    name: &str,
    write_content: F,
) -> io::Result<()> {
    write!(f, "{KW_BEGIN}:{name}")?;
    f.writeln()?;

    write_content(f)?;

    write!(f, "{KW_END}:{name}")?;
    f.writeln()
}
