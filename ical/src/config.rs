// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Options consumed by the tokenizer and the parser.

use jiff::Zoned;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer};

use crate::cancel::CancellationToken;

/// Options controlling how a calendar is tokenized and resolved.
///
/// Every field is optional when deserialized; keys are kebab-case:
///
/// ```toml
/// strict-line-breaks = true
/// default-zone = "Europe/Berlin"
/// inclusive-dtend = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Reject physical lines terminated by a bare LF.
    ///
    /// Default: `false`, bare LF is accepted as a line break.
    pub strict_line_breaks: bool,

    /// Zone applied to every floating or TZID-qualified date-time.
    ///
    /// Values carrying a trailing `Z` are always UTC.
    #[serde(deserialize_with = "deserialize_zone")]
    pub default_zone: Option<TimeZone>,

    /// Treat a DATE-typed DTEND as the last day of the event rather than
    /// the first day after it.
    pub inclusive_dtend: bool,

    /// Cooperative cancellation, checked before each token is pulled.
    #[serde(skip)]
    pub cancellation: Option<CancellationToken>,

    /// Clock used when realigning short time values.
    ///
    /// Default: `None`, read the system clock at parse time.
    #[serde(skip)]
    pub now: Option<Zoned>,
}

impl ParseOptions {
    /// Set the strict line breaks option.
    #[must_use]
    pub const fn strict_line_breaks(mut self, strict: bool) -> Self {
        self.strict_line_breaks = strict;
        self
    }

    /// Set the default zone.
    #[must_use]
    pub fn default_zone(mut self, zone: Option<TimeZone>) -> Self {
        self.default_zone = zone;
        self
    }

    /// Set the inclusive DTEND option.
    #[must_use]
    pub const fn inclusive_dtend(mut self, inclusive: bool) -> Self {
        self.inclusive_dtend = inclusive;
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Pin the clock used during parsing.
    #[must_use]
    pub fn now(mut self, now: Zoned) -> Self {
        self.now = Some(now);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn today(&self) -> Date {
        match &self.now {
            Some(now) => now.date(),
            None => Zoned::now().date(),
        }
    }
}

fn deserialize_zone<'de, D>(deserializer: D) -> Result<Option<TimeZone>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(name) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    TimeZone::get(&name)
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("unknown time zone {name:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ParseOptions::default();
        assert!(!options.strict_line_breaks);
        assert!(!options.inclusive_dtend);
        assert!(options.default_zone.is_none());
        assert!(!options.is_cancelled());
    }

    #[test]
    fn deserializes_kebab_case_keys() {
        let options: ParseOptions = toml::from_str(
            r#"
strict-line-breaks = true
default-zone = "Europe/Berlin"
inclusive-dtend = true
"#,
        )
        .unwrap();

        assert!(options.strict_line_breaks);
        assert!(options.inclusive_dtend);
        assert_eq!(
            options.default_zone.as_ref().and_then(TimeZone::iana_name),
            Some("Europe/Berlin")
        );
    }

    #[test]
    fn rejects_unknown_zone() {
        let result: Result<ParseOptions, _> = toml::from_str(r#"default-zone = "Mars/Olympus""#);
        assert!(result.is_err());
    }

    #[test]
    fn cancellation_is_observed() {
        let token = CancellationToken::new();
        let options = ParseOptions::default().cancellation(token.clone());
        assert!(!options.is_cancelled());
        token.cancel();
        assert!(options.is_cancelled());
    }
}
