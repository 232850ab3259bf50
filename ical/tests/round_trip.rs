// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the iCalendar parser and formatter.
//!
//! These tests verify that parsing, formatting, and parsing again produces
//! equivalent results.

use calyx_ical::{ParseOptions, format, parse_str};
use jiff::tz::TimeZone;

fn options() -> ParseOptions {
    ParseOptions::default()
        .default_zone(Some(TimeZone::UTC))
        .now("2025-01-10T12:00:00[UTC]".parse().unwrap())
}

fn assert_round_trip(original: &str) {
    let calendar1 = parse_str(original, &options()).unwrap();
    let formatted1 = format(&calendar1).unwrap();

    let calendar2 = parse_str(&formatted1, &options()).unwrap();
    assert_eq!(calendar1, calendar2, "calendars should be equal after round-trip");

    let formatted2 = format(&calendar2).unwrap();
    assert_eq!(formatted1, formatted2, "formatting should be idempotent");
}

#[test]
fn round_trip_simple_calendar() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:12345@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DTEND:20250110T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_is_exact_for_canonical_input() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=Europe/Berlin;VALUE=DATE-TIME:20250110T140000\r\n\
DURATION:PT1H\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER;RELATED=END:-PT5M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let calendar = parse_str(original, &options()).unwrap();
    assert_eq!(format(&calendar).unwrap(), original);
}

#[test]
fn round_trip_reorders_parameters_once() {
    let original = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
ATTENDEE;RSVP=TRUE;CN=\"Doe, Jane\";ROLE=REQ-PARTICIPANT:mailto:j@x.org\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let calendar = parse_str(original, &options()).unwrap();
    let formatted = format(&calendar).unwrap();
    assert!(formatted.contains(
        "ATTENDEE;CN=\"Doe, Jane\";ROLE=REQ-PARTICIPANT;RSVP=TRUE:mailto:j@x.org\r\n"
    ));
    assert_round_trip(original);
}

#[test]
fn round_trip_long_and_multibyte_values() {
    let description = "Ünïcödé – ".repeat(30);
    let original = format!(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDESCRIPTION:{description}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
    );

    let calendar = parse_str(&original, &options()).unwrap();
    assert_eq!(calendar.events[0].description.as_deref(), Some(description.as_str()));
    assert_round_trip(&original);
}

#[test]
fn round_trip_lf_input_and_calendar_alarms() {
    assert_round_trip(
        "BEGIN:VCALENDAR\n\
VERSION:2.0\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250110\n\
COMMENT:\n\
END:VEVENT\n\
BEGIN:VALARM\n\
ACTION:AUDIO\n\
TRIGGER;VALUE=DATE-TIME:20250110T080000Z\n\
END:VALARM\n\
END:VCALENDAR\n",
    );
}
