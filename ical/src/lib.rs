// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tokenize, parse and re-encode iCalendar (RFC 5545) data.
//!
//! The pipeline has three stages: a [`Tokenizer`] unfolds physical lines and
//! splits content lines into [`Token`]s, [`parse`] turns the token stream
//! into a [`Calendar`] with resolved event times, and [`format`] writes a
//! calendar back out with sorted parameters and folded lines.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod cancel;
mod config;
mod error;
mod formatter;
pub mod keyword;
mod lexer;
mod parser;
mod semantic;
mod syntax;
mod value;

pub use crate::cancel::CancellationToken;
pub use crate::config::ParseOptions;
pub use crate::error::{Context, ErrorCause, ParseError};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter, format};
pub use crate::lexer::{
    LexError, TOKEN_QUEUE_CAPACITY, Token, TokenKind, TokenStream, Tokenizer, spawn, tokenize,
};
pub use crate::parser::{parse, parse_file, parse_str, parse_tokens};
pub use crate::semantic::{Alarm, Calendar, Event, Parameters, Property};
pub use crate::value::{DurationError, Layout, TimeError, parse_duration};
