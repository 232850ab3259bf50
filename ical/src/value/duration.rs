// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Duration values as used by DURATION and relative TRIGGER properties.

use chumsky::prelude::*;
use jiff::SignedDuration;
use thiserror::Error;

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Error returned when a duration value cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {value:?}: {reason}")]
pub struct DurationError {
    /// The raw value that failed to parse.
    pub value: String,
    /// Human readable description of the first problem found.
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    const fn seconds(self) -> i64 {
        match self {
            Unit::Week => 7 * 24 * 60 * 60,
            Unit::Day => 24 * 60 * 60,
            Unit::Hour => 60 * 60,
            Unit::Minute => 60,
            Unit::Second => 1,
        }
    }
}

/// Resolve a duration value into a signed span.
///
/// The accepted notation is a relaxed form of RFC 5545 Section 3.3.6:
///
/// ```txt
/// dur-value = (["+"] / "-") "P" 1*(["T"] 1*DIGIT unit)
/// unit      = "W" / "D" / "H" / "M" / "S"
/// ```
///
/// `M` always means minutes and the `T` separator is optional, so values
/// such as `P8M` or `P2W7D` emitted by lenient producers are accepted.
/// Days and weeks are exact multiples of 24 hours. An empty value resolves
/// to a zero span.
///
/// # Errors
///
/// Returns [`DurationError`] when the value does not follow the notation or
/// the total does not fit in a [`SignedDuration`].
pub fn parse_duration(value: &str) -> Result<SignedDuration, DurationError> {
    if value.is_empty() {
        return Ok(SignedDuration::ZERO);
    }

    value_duration()
        .parse(value)
        .into_result()
        .map_err(|errs| DurationError {
            value: value.to_owned(),
            reason: errs
                .first()
                .map_or_else(|| "malformed duration".to_owned(), ToString::to_string),
        })
}

fn value_duration<'src>() -> impl Parser<'src, &'src str, SignedDuration, Extra<'src>> {
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map(|digits, span| {
            lexical::parse::<u32, _>(&digits)
                .map_err(|_| Rich::custom(span, format!("number {digits} is out of range")))
        });

    let unit = choice((
        just('W').to(Unit::Week),
        just('D').to(Unit::Day),
        just('H').to(Unit::Hour),
        just('M').to(Unit::Minute),
        just('S').to(Unit::Second),
    ));

    let component = just('T').or_not().ignore_then(int).then(unit);

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));

    sign.then_ignore(just('P'))
        .then(component.repeated().at_least(1).collect::<Vec<_>>())
        .then_ignore(end())
        .try_map(|(positive, components), span| {
            let total = components.into_iter().try_fold(0_i64, |acc, (n, unit)| {
                i64::from(n)
                    .checked_mul(unit.seconds())
                    .and_then(|secs| acc.checked_add(secs))
            });
            match total {
                Some(secs) if positive => Ok(SignedDuration::from_secs(secs)),
                Some(secs) => Ok(SignedDuration::from_secs(-secs)),
                None => Err(Rich::custom(span, "duration overflows")),
            }
        })
}
