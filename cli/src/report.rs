// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Render located errors against the input file.

use std::{error::Error, fmt, fs, path::Path};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use calyx_ical::{ErrorCause, ParseError};

/// Marker error for failures that were already printed with their source.
#[derive(Debug, Clone, Copy)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error reported")
    }
}

impl Error for Reported {}

/// Report a parse error, pointing into `path` when the error has an offset.
pub fn parse_error(path: &Path, err: ParseError) -> Box<dyn Error> {
    let Some(offset) = err.offset() else {
        return err.into();
    };

    let label = match err.cause() {
        ErrorCause::Unexpected { expected, .. } => format!("expected {expected} here"),
        ErrorCause::Syntax { message, .. } => message.clone(),
        cause => cause.to_string(),
    };
    located(path, offset, &err.to_string(), &label).unwrap_or_else(|| err.into())
}

/// Report a tokenizer error message at `offset`.
pub fn token_error(path: &Path, offset: usize, message: &str) -> Box<dyn Error> {
    located(path, offset, message, message).unwrap_or_else(|| message.into())
}

/// Print a report for `path`, returning [`Reported`] on success.
fn located(path: &Path, offset: usize, message: &str, label: &str) -> Option<Box<dyn Error>> {
    let bytes = fs::read(path)
        .inspect_err(|e| tracing::warn!(path = %path.display(), err = %e, "cannot reread input"))
        .ok()?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let start = offset.min(text.len());
    let end = (start + 1).min(text.len());
    Report::build(ReportKind::Error, start..end)
        .with_config(Config::new().with_index_type(IndexType::Byte))
        .with_message(format!("{}: {message}", path.display()))
        .with_label(
            Label::new(start..end)
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .eprint(Source::from(text))
        .ok()?;

    Some(Box::new(Reported))
}
