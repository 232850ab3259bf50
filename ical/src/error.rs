// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by the parse entry points.

use std::io;

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::semantic::Calendar;
use crate::value::{DurationError, TimeError};

/// Grammar element being parsed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Context {
    /// `VCALENDAR` component
    Calendar,
    /// `VEVENT` component
    Event,
    /// `VALARM` component
    Alarm,
    /// Content line
    Property,
    /// Property parameter
    Parameter,
}

/// The underlying reason a parse failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorCause {
    /// The tokenizer rejected the input.
    #[error("{message}")]
    Syntax {
        /// Byte offset in the raw input.
        offset: usize,
        /// Message reported by the tokenizer.
        message: String,
    },

    /// A token of the wrong kind appeared.
    #[error("parsing {context}: expected {expected}, got {found}")]
    Unexpected {
        /// Element being parsed.
        context: Context,
        /// Kind the grammar required.
        expected: TokenKind,
        /// Kind actually found.
        found: TokenKind,
        /// Byte offset of the offending token.
        offset: usize,
    },

    /// The token stream ended inside a component.
    #[error("parsing {context}: unexpected end of input")]
    UnexpectedEnd {
        /// Element being parsed.
        context: Context,
    },

    /// A time-valued property could not be resolved.
    #[error("invalid {property} value {value:?}: {source}")]
    Time {
        /// Property name.
        property: String,
        /// Raw property value.
        value: String,
        /// Resolution failure.
        #[source]
        source: TimeError,
    },

    /// A DURATION property could not be resolved.
    #[error("{property}: {source}")]
    Duration {
        /// Property name.
        property: String,
        /// Resolution failure.
        #[source]
        source: DurationError,
    },

    /// The cancellation token fired.
    #[error("parse cancelled")]
    Cancelled,

    /// Reading the input failed before tokenization started.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl ErrorCause {
    /// Byte offset in the raw input, when the cause has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            ErrorCause::Syntax { offset, .. } | ErrorCause::Unexpected { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

/// Error returned by the parse entry points.
///
/// Carries the calendar assembled before the failure so callers can
/// inspect what was read; it must not be treated as a complete result.
#[derive(Debug, Error)]
#[error("parse: {cause}")]
pub struct ParseError {
    #[source]
    cause: ErrorCause,
    partial: Box<Calendar>,
}

impl ParseError {
    pub(crate) fn new(cause: ErrorCause, partial: Calendar) -> Self {
        Self {
            cause,
            partial: Box::new(partial),
        }
    }

    /// The wrapped cause.
    #[must_use]
    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }

    /// Consume the error, returning the wrapped cause.
    #[must_use]
    pub fn into_cause(self) -> ErrorCause {
        self.cause
    }

    /// Whether the parse stopped because of cancellation rather than bad input.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause, ErrorCause::Cancelled)
    }

    /// Byte offset in the raw input, when known.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.cause.offset()
    }

    /// The calendar assembled before the failure.
    #[must_use]
    pub fn partial(&self) -> &Calendar {
        &self.partial
    }

    /// Consume the error, returning the partial calendar.
    #[must_use]
    pub fn into_partial(self) -> Calendar {
        *self.partial
    }
}
