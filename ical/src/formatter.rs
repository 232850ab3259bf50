// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes a [`Calendar`] back to the RFC 5545 text format,
//! to any `std::io::Write` implementer. Only the raw properties are
//! written; derived fields such as [`Event::start`](crate::Event::start)
//! are ignored.
//!
//! # Example
//!
//! ```
//! use calyx_ical::{ParseOptions, format, parse_str};
//!
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let calendar = parse_str(input, &ParseOptions::default()).unwrap();
//! assert_eq!(format(&calendar).unwrap(), input);
//! ```

mod component;
mod property;

use std::io::{self, Write};

use crate::formatter::component::write_calendar;
use crate::semantic::Calendar;

/// Format a [`Calendar`] to a `String` with default options.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(calendar: &Calendar) -> io::Result<String> {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a [`Calendar`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, calendar: &Calendar, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        write_calendar(&mut formatter, calendar)?;
        formatter.flush()
    }

    /// Write a [`Calendar`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, calendar: &Calendar) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(calendar, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    pub(crate) const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// Get the length of the continuation character after CRLF.
    #[must_use]
    pub(crate) const fn continuation_len() -> usize {
        1 // Both SPACE and TAB are 1 byte
    }
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// Bytes written through its `Write` implementation are folded as they
/// arrive; [`writeln`](Self::writeln) ends the current content line.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current physical line length in bytes, continuation character included.
    line_length: usize,
    /// Length of the current physical line before any content was written.
    line_start: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
            line_start: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a [`Calendar`] to the underlying writer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&mut self, calendar: &Calendar) -> io::Result<()> {
        write_calendar(self, calendar)
    }

    /// Write a CRLF line ending.
    pub(crate) fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        self.line_start = 0;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer.write_all(self.options.folding_style.as_bytes())?;
        self.line_length = FoldingStyle::continuation_len();
        self.line_start = self.line_length;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            self.writer.write_all(buf)?;
            self.line_length += buf.len();
            return Ok(buf.len());
        };

        let mut remaining = buf;
        while !remaining.is_empty() {
            if self.line_length >= max_len {
                self.insert_fold()?;
            }

            let available = max_len.saturating_sub(self.line_length);
            let mut n = find_safe_write_length(remaining, available);
            if n == 0 {
                if self.line_length > self.line_start {
                    // The next character does not fit, move it to a new line
                    self.insert_fold()?;
                    continue;
                }
                // A single character wider than the limit, write it anyway
                n = next_char_boundary(remaining);
            }

            let (head, tail) = remaining.split_at(n);
            self.writer.write_all(head)?;
            self.line_length += n;
            remaining = tail;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

const fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Find the maximum number of bytes we can write without breaking a UTF-8 sequence.
///
/// UTF-8 encoding:
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes (starts with 0b110xxxxx)
/// - 1110xxxx: 3 bytes (starts with 0b1110xxxx)
/// - 11110xxx: 4 bytes (starts with 0b11110xxx)
/// - 10xxxxxx: continuation byte (not a start byte)
fn find_safe_write_length(buf: &[u8], max_bytes: usize) -> usize {
    if max_bytes >= buf.len() {
        return buf.len();
    }

    // Move back while the split would land on a continuation byte
    let mut pos = max_bytes;
    while pos > 0 && buf.get(pos).copied().is_some_and(is_continuation_byte) {
        pos -= 1;
    }
    pos
}

fn next_char_boundary(buf: &[u8]) -> usize {
    (1..buf.len())
        .find(|&i| buf.get(i).copied().is_some_and(|b| !is_continuation_byte(b)))
        .unwrap_or(buf.len())
}
