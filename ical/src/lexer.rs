// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer turning a folded iCalendar byte stream into content tokens.
//!
//! The tokenizer is a lazy iterator: it reads one logical line at a time,
//! queues the tokens of that line and hands them out in order. The stream
//! always ends with either [`TokenKind::EndOfStream`] or a single
//! [`TokenKind::Error`] token.

mod scanner;
mod unfold;

use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::io::{self, BufRead};
use std::iter::FusedIterator;
use std::sync::mpsc;
use std::thread;

use thiserror::Error;

use crate::cancel::CancellationToken;
use crate::config::ParseOptions;
use crate::lexer::scanner::scan_line;
use crate::lexer::unfold::LineReader;

/// Number of tokens the background tokenizer may run ahead of the parser.
pub const TOKEN_QUEUE_CAPACITY: usize = 256;

/// Kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TokenKind {
    /// `BEGIN:VCALENDAR`
    #[strum(serialize = "calendar-begin")]
    CalendarBegin,
    /// `END:VCALENDAR`
    #[strum(serialize = "calendar-end")]
    CalendarEnd,
    /// `BEGIN:VEVENT`
    #[strum(serialize = "event-begin")]
    EventBegin,
    /// `END:VEVENT`
    #[strum(serialize = "event-end")]
    EventEnd,
    /// `BEGIN:VALARM`
    #[strum(serialize = "alarm-begin")]
    AlarmBegin,
    /// `END:VALARM`
    #[strum(serialize = "alarm-end")]
    AlarmEnd,
    /// Property name
    #[strum(serialize = "property name")]
    Name,
    /// Property value, absent when the value is empty
    #[strum(serialize = "property value")]
    Value,
    /// Parameter name
    #[strum(serialize = "parameter name")]
    ParamName,
    /// One parameter value; quoted values keep their quotes
    #[strum(serialize = "parameter value")]
    ParamValue,
    /// End of input
    #[strum(serialize = "end of stream")]
    EndOfStream,
    /// Terminal error, the text is the message
    #[strum(serialize = "error")]
    Error,
}

/// A token and the byte offset where it starts in the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Unfolded token text.
    pub text: String,
    /// Byte offset of the first character in the raw, folded input.
    pub offset: usize,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    fn error(err: &LexError, fallback_offset: usize) -> Self {
        let offset = err.offset().unwrap_or(fallback_offset);
        Self::new(TokenKind::Error, err.to_string(), offset)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Error => write!(f, "{}", self.text),
            kind => write!(f, "{kind} {:?}", self.text),
        }
    }
}

/// Reasons the tokenizer stops.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexError {
    /// A character not allowed at this position.
    #[error("expected {expected} at pos {offset}, got {found}")]
    Unexpected {
        /// Byte offset in the raw input.
        offset: usize,
        /// What the grammar allows here.
        expected: &'static str,
        /// The offending character.
        found: String,
    },

    /// The line ended inside a name or parameter.
    #[error("unexpected end of line at pos {offset}")]
    UnexpectedEnd {
        /// Byte offset in the raw input.
        offset: usize,
    },

    /// A bare LF in strict mode.
    #[error("missing carriage return (CR) at pos {offset}")]
    MissingCarriageReturn {
        /// Byte offset of the LF.
        offset: usize,
    },

    /// The line is not valid UTF-8.
    #[error("invalid UTF-8 at pos {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte.
        offset: usize,
    },

    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    /// The cancellation token fired.
    #[error("tokenization cancelled")]
    Cancelled,
}

impl LexError {
    /// Byte offset in the raw input, when the error has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            LexError::Unexpected { offset, .. }
            | LexError::UnexpectedEnd { offset }
            | LexError::MissingCarriageReturn { offset }
            | LexError::InvalidUtf8 { offset } => Some(*offset),
            LexError::Io(_) | LexError::Cancelled => None,
        }
    }
}

/// Lazy, single-pass tokenizer over a buffered reader.
#[derive(Debug)]
pub struct Tokenizer<R> {
    lines: LineReader<R>,
    cancellation: Option<CancellationToken>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer honoring the line-break policy and cancellation
    /// token of `options`.
    pub fn new(reader: R, options: &ParseOptions) -> Self {
        Self {
            lines: LineReader::new(reader, options.strict_line_breaks),
            cancellation: options.cancellation.clone(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn fail(&mut self, err: &LexError) -> Token {
        tracing::debug!(%err, "tokenizer stopped");
        self.finished = true;
        Token::error(err, self.lines.position())
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                return Some(self.fail(&LexError::Cancelled));
            }

            match self.lines.next_line() {
                Some(Ok(line)) => {
                    if let Err(err) = scan_line(&line, &mut self.pending) {
                        let token = self.fail(&err);
                        self.pending.push_back(token);
                    }
                }
                Some(Err(err)) => return Some(self.fail(&err)),
                None => {
                    self.finished = true;
                    let offset = self.lines.position();
                    return Some(Token::new(TokenKind::EndOfStream, "", offset));
                }
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Tokenizer<R> {}

/// Tokenize a string with default options.
///
/// # Example
///
/// ```
/// use calyx_ical::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n")
///     .map(|t| t.kind)
///     .collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::CalendarBegin,
///         TokenKind::Name,
///         TokenKind::Value,
///         TokenKind::CalendarEnd,
///         TokenKind::EndOfStream,
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Tokenizer<&[u8]> {
    Tokenizer::new(input.as_bytes(), &ParseOptions::default())
}

/// Run a tokenizer on a background thread.
///
/// Tokens are handed over through a bounded queue of
/// [`TOKEN_QUEUE_CAPACITY`]; the producer blocks while the queue is full
/// and exits on its next send once the returned stream is dropped.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn<R>(reader: R, options: &ParseOptions) -> io::Result<TokenStream>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(TOKEN_QUEUE_CAPACITY);
    let tokenizer = Tokenizer::new(reader, options);

    thread::Builder::new()
        .name("ical-tokenizer".to_owned())
        .spawn(move || {
            let mut sent = 0_usize;
            for token in tokenizer {
                if tx.send(token).is_err() {
                    tracing::debug!(sent, "token consumer hung up");
                    return;
                }
                sent += 1;
            }
            tracing::debug!(sent, "tokenizer finished");
        })?;

    Ok(TokenStream { rx })
}

/// Receiving end of a tokenizer started with [`spawn`].
#[derive(Debug)]
pub struct TokenStream {
    rx: mpsc::Receiver<Token>,
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.rx.recv().ok()
    }
}
