// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Resolution of DATE and DATE-TIME values into absolute instants.

use std::borrow::Cow;
use std::sync::OnceLock;

use chumsky::prelude::*;
use jiff::Zoned;
use jiff::civil::{self, Date, DateTime, Time};
use jiff::tz::TimeZone;
use regex::Regex;
use thiserror::Error;

use crate::keyword::{KW_DATETIME, KW_TZID, KW_VALUE};
use crate::semantic::Parameters;

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Error returned when a time-valued property cannot be resolved.
#[derive(Debug, Clone, Error)]
pub enum TimeError {
    /// The value length matches none of the known layouts.
    #[error("no date or date-time layout matches a value of length {0}")]
    Layout(usize),

    /// The value does not follow the selected layout.
    #[error("{0}")]
    Syntax(String),

    /// The civil time does not exist in the selected zone.
    #[error(transparent)]
    Zone(#[from] jiff::Error),
}

/// Textual layout of a date or date-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `YYYYMMDD`
    Date,
    /// `YYYYMMDDTHHMMSS`, floating or TZID-qualified
    DateTime,
    /// `YYYYMMDDTHHMMSSZ`
    DateTimeUtc,
}

impl Layout {
    const fn len(self) -> usize {
        match self {
            Layout::Date => 8,
            Layout::DateTime => 15,
            Layout::DateTimeUtc => 16,
        }
    }

    const fn from_len(len: usize) -> Option<Self> {
        match len {
            8 => Some(Layout::Date),
            15 => Some(Layout::DateTime),
            16 => Some(Layout::DateTimeUtc),
            _ => None,
        }
    }

    /// Layout announced by the `VALUE` parameter, corrected by the length of
    /// the literal when the two disagree.
    fn select(params: &Parameters, value: &str) -> Option<Self> {
        let declared = params
            .get(KW_VALUE)
            .and_then(<[String]>::last)
            .map(|kind| match kind.as_str() {
                KW_DATETIME => Layout::DateTime,
                _ => Layout::Date,
            });

        match declared {
            Some(layout) if layout.len() == value.len() => Some(layout),
            _ => Layout::from_len(value.len()).or(declared),
        }
    }
}

/// Resolves time-valued properties for one parse.
#[derive(Debug, Clone)]
pub(crate) struct TimeResolver<'a> {
    default_zone: Option<&'a TimeZone>,
    today: Date,
}

impl<'a> TimeResolver<'a> {
    pub(crate) fn new(default_zone: Option<&'a TimeZone>, today: Date) -> Self {
        Self {
            default_zone,
            today,
        }
    }

    /// Resolve a value together with the layout it was read with.
    pub(crate) fn resolve(
        &self,
        params: &Parameters,
        value: &str,
    ) -> Result<(Zoned, Layout), TimeError> {
        let value = normalize_date_time_value(value, self.today);
        let value = value.as_ref();

        let (layout, zone) = if value.ends_with('Z') {
            (Layout::DateTimeUtc, TimeZone::UTC)
        } else {
            let layout = Layout::select(params, value).ok_or(TimeError::Layout(value.len()))?;
            let layout = match layout {
                Layout::Date if value.len() != Layout::Date.len() => Layout::DateTime,
                layout => layout,
            };
            (layout, self.zone(params))
        };

        let civil = parse_layout(layout, value)?;
        let zoned = civil.to_zoned(zone)?;
        Ok((zoned, layout))
    }

    fn zone(&self, params: &Parameters) -> TimeZone {
        if let Some(zone) = self.default_zone {
            return zone.clone();
        }

        if let Some(ids) = params.get(KW_TZID) {
            for id in ids {
                let name = id.trim_matches('"');
                match TimeZone::get(name) {
                    Ok(zone) => return zone,
                    Err(err) => tracing::warn!(tzid = name, %err, "cannot load time zone"),
                }
            }
            tracing::warn!("no TZID could be loaded, falling back to the system zone");
        }

        TimeZone::system()
    }
}

fn parse_layout(layout: Layout, value: &str) -> Result<DateTime, TimeError> {
    let result = match layout {
        Layout::Date => value_date()
            .map(|date| date.to_datetime(Time::midnight()))
            .parse(value)
            .into_result(),
        Layout::DateTime => value_date_time().parse(value).into_result(),
        Layout::DateTimeUtc => value_date_time()
            .then_ignore(just('Z'))
            .parse(value)
            .into_result(),
    };

    result.map_err(|errs| {
        let reason = errs
            .first()
            .map_or_else(|| "malformed value".to_owned(), ToString::to_string);
        TimeError::Syntax(reason)
    })
}

fn number<'src>(digits: usize) -> impl Parser<'src, &'src str, i16, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .exactly(digits)
        .collect::<String>()
        .try_map(|s, span| {
            lexical::parse::<i16, _>(&s).map_err(|_| Rich::custom(span, "expected digits"))
        })
}

/// ```txt
/// date-value = date-fullyear date-month date-mday
/// ```
fn value_date<'src>() -> impl Parser<'src, &'src str, Date, Extra<'src>> + Clone {
    number(4)
        .then(number(2))
        .then(number(2))
        .try_map(|((year, month), day), span| {
            let month = i8::try_from(month).map_err(|e| Rich::custom(span, e))?;
            let day = i8::try_from(day).map_err(|e| Rich::custom(span, e))?;
            Date::new(year, month, day).map_err(|e| Rich::custom(span, e))
        })
}

/// ```txt
/// time = time-hour time-minute time-second
/// ```
fn value_time<'src>() -> impl Parser<'src, &'src str, Time, Extra<'src>> + Clone {
    number(2)
        .then(number(2))
        .then(number(2))
        .try_map(|((hour, minute), second), span| {
            let hour = i8::try_from(hour).map_err(|e| Rich::custom(span, e))?;
            let minute = i8::try_from(minute).map_err(|e| Rich::custom(span, e))?;
            // NOTE: leap second 60 is contracted to 59
            let second = i8::try_from(second.min(59)).map_err(|e| Rich::custom(span, e))?;
            Time::new(hour, minute, second, 0).map_err(|e| Rich::custom(span, e))
        })
}

/// ```txt
/// date-time = date "T" time
/// ```
fn value_date_time<'src>() -> impl Parser<'src, &'src str, DateTime, Extra<'src>> + Clone {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| date.to_datetime(time))
}

/// Realign date-time values whose clock part has 3 to 5 digits.
///
/// Digits are consumed left to right: a unit takes two digits when they
/// form a valid hour, minute or second and more two-digit units are still
/// owed, otherwise it takes one. `20200101T1030` becomes
/// `20200101T100300`. Values that are already canonical are borrowed.
pub(crate) fn normalize_date_time_value(value: &str, today: Date) -> Cow<'_, str> {
    const RE: &str = r"([0-9]+T)([0-9]{3,5})(Z?)$";
    static SHORT_TIME: OnceLock<Regex> = OnceLock::new();
    let re = SHORT_TIME.get_or_init(|| Regex::new(RE).unwrap());

    let Some(caps) = re.captures(value) else {
        return Cow::Borrowed(value);
    };
    let (Some(all), Some(date), Some(time), Some(utc)) = (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
    else {
        return Cow::Borrowed(value);
    };
    let Some(time) = realign_short_time(time.as_str(), today) else {
        return Cow::Borrowed(value);
    };

    let prefix = value.get(..all.start()).unwrap_or_default();
    Cow::Owned(format!("{prefix}{}{time}{}", date.as_str(), utc.as_str()))
}

fn realign_short_time(digits: &str, today: Date) -> Option<String> {
    const LIMITS: [u8; 3] = [24, 60, 60];

    let digits: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    let owed = digits.len().checked_sub(3)?;

    let mut units = [0_u8; 3];
    let mut offset = 0;
    let mut found = 0;
    for (unit, limit) in units.iter_mut().zip(LIMITS) {
        if found < owed {
            if let Some(&[a, b]) = digits.get(offset..offset + 2) {
                let two = a * 10 + b;
                if two < limit {
                    *unit = two;
                    offset += 2;
                    found += 1;
                    continue;
                }
            }
        }
        *unit = *digits.get(offset)?;
        offset += 1;
    }

    let [hour, minute, second] = units.map(i8::try_from);
    let time = civil::Time::new(hour.ok()?, minute.ok()?, second.ok()?, 0).ok()?;
    Some(today.to_datetime(time).strftime("%H%M%S").to_string())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn today() -> Date {
        date(2024, 6, 1)
    }

    #[test]
    fn normalizes_short_times() {
        let cases = [
            ("20200101T103020", "20200101T103020"),
            ("20200101T103020Z", "20200101T103020Z"),
            ("20200101T123", "20200101T010203"),
            ("20200101T1030", "20200101T100300"),
            ("20200101T1030Z", "20200101T100300Z"),
            ("20200101T3030", "20200101T030300"),
            ("20200101T10305", "20200101T103005"),
            ("20200101T12345", "20200101T123405"),
            ("20200101T99999", "20200101T090909"),
            ("20200101", "20200101"),
        ];
        for (src, expected) in cases {
            assert_eq!(normalize_date_time_value(src, today()), expected, "{src}");
        }
    }

    #[test]
    fn borrows_canonical_values() {
        assert!(matches!(
            normalize_date_time_value("20200101T103020", today()),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn selects_layout() {
        let none = Parameters::new();
        let date = Parameters::from_iter([("VALUE".to_owned(), vec!["DATE".to_owned()])]);
        let datetime = Parameters::from_iter([("VALUE".to_owned(), vec!["DATE-TIME".to_owned()])]);

        assert_eq!(Layout::select(&none, "20200101"), Some(Layout::Date));
        assert_eq!(Layout::select(&none, "20200101T103020"), Some(Layout::DateTime));
        assert_eq!(Layout::select(&none, "2020"), None);
        assert_eq!(Layout::select(&date, "20200101"), Some(Layout::Date));
        assert_eq!(Layout::select(&date, "20200101T103020"), Some(Layout::DateTime));
        assert_eq!(Layout::select(&datetime, "20200101"), Some(Layout::Date));
        assert_eq!(Layout::select(&datetime, "2020"), Some(Layout::DateTime));
    }

    #[test]
    fn resolves_with_default_zone() {
        let zone = TimeZone::fixed(jiff::tz::offset(2));
        let resolver = TimeResolver::new(Some(&zone), today());
        let tzid = Parameters::from_iter([("TZID".to_owned(), vec!["America/New_York".to_owned()])]);

        let (zoned, layout) = resolver.resolve(&tzid, "20200101T103020").unwrap();
        assert_eq!(layout, Layout::DateTime);
        assert_eq!(zoned.datetime(), date(2020, 1, 1).at(10, 30, 20, 0));
        assert_eq!(zoned.offset(), jiff::tz::offset(2));
    }

    #[test]
    fn trailing_z_forces_utc() {
        let zone = TimeZone::fixed(jiff::tz::offset(2));
        let resolver = TimeResolver::new(Some(&zone), today());

        let (zoned, layout) = resolver.resolve(&Parameters::new(), "20200101T103020Z").unwrap();
        assert_eq!(layout, Layout::DateTimeUtc);
        assert_eq!(zoned.offset(), jiff::tz::Offset::UTC);
        assert_eq!(zoned.datetime(), date(2020, 1, 1).at(10, 30, 20, 0));
    }

    #[test]
    fn resolves_tzid() {
        let resolver = TimeResolver::new(None, today());
        let params = Parameters::from_iter([(
            "TZID".to_owned(),
            vec!["Nowhere/Invalid".to_owned(), "\"Europe/Berlin\"".to_owned()],
        )]);

        let (zoned, _) = resolver.resolve(&params, "20200701T120000").unwrap();
        assert_eq!(zoned.time_zone().iana_name(), Some("Europe/Berlin"));
        assert_eq!(zoned.offset(), jiff::tz::offset(2));
    }

    #[test]
    fn rejects_invalid_values() {
        let utc = TimeZone::UTC;
        let resolver = TimeResolver::new(Some(&utc), today());
        let none = Parameters::new();

        assert!(matches!(
            resolver.resolve(&none, "2020"),
            Err(TimeError::Layout(4))
        ));
        assert!(matches!(
            resolver.resolve(&none, "20201301"),
            Err(TimeError::Syntax(_))
        ));
        assert!(matches!(
            resolver.resolve(&none, "20200101X103020"),
            Err(TimeError::Syntax(_))
        ));
    }
}
