// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ParseOptions;
use crate::error::{ErrorCause, ParseError};
use crate::lexer::{Token, Tokenizer, spawn};
use crate::semantic::Calendar;
use crate::syntax::Parser;

/// Parse a calendar from any token producer.
///
/// The producer does not have to be this crate's tokenizer; any sequence
/// following the same token grammar is accepted.
///
/// ## Errors
///
/// Returns a [`ParseError`] wrapping the first violated expectation, a
/// tokenizer error, a value that cannot be resolved, or cancellation.
pub fn parse_tokens<I>(tokens: I, options: &ParseOptions) -> Result<Calendar, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    let calendar = Parser::new(tokens.into_iter(), options).parse()?;
    tracing::debug!(
        events = calendar.events.len(),
        alarms = calendar.alarms.len(),
        "parsed calendar"
    );
    Ok(calendar)
}

/// Parse a calendar from a buffered reader, tokenizing on the calling
/// thread.
///
/// ## Errors
///
/// See [`parse_tokens`].
///
/// ## Examples
///
/// ```
/// # use calyx_ical::{ParseOptions, parse};
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendar = parse(src.as_bytes(), &ParseOptions::default()).unwrap();
/// assert_eq!(calendar.events[0].summary.as_deref(), Some("Test Event"));
/// ```
#[tracing::instrument(skip_all)]
pub fn parse<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Calendar, ParseError> {
    parse_tokens(Tokenizer::new(reader, options), options)
}

/// Parse a calendar held in memory.
///
/// ## Errors
///
/// See [`parse_tokens`].
pub fn parse_str(src: &str, options: &ParseOptions) -> Result<Calendar, ParseError> {
    parse(src.as_bytes(), options)
}

/// Parse a calendar file, tokenizing on a background thread while the
/// calling thread parses.
///
/// ## Errors
///
/// Besides the errors of [`parse_tokens`], returns [`ErrorCause::Io`] when
/// the file cannot be opened or the tokenizer thread cannot be started.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<Calendar, ParseError> {
    let io_error = |e| ParseError::new(ErrorCause::Io(e), Calendar::default());

    let file = File::open(path.as_ref()).map_err(io_error)?;
    let tokens = spawn(BufReader::new(file), options).map_err(io_error)?;
    parse_tokens(tokens, options)
}
