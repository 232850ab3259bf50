// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! The `VEVENT` component and its end-time policy.

use jiff::{ToSpan, Zoned};

use crate::error::ErrorCause;
use crate::keyword::{
    KW_DATE, KW_DATETIME, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION,
    KW_SUMMARY, KW_UID, KW_VALUE,
};
use crate::semantic::{Alarm, Property, last_property, resolve_time, time_error};
use crate::value::{Layout, TimeResolver, parse_duration};

/// A parsed `VEVENT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Event properties in document order.
    pub properties: Vec<Property>,

    /// Value of the last `UID`.
    pub uid: Option<String>,

    /// Value of the last `SUMMARY`.
    pub summary: Option<String>,

    /// Value of the last `DESCRIPTION`.
    pub description: Option<String>,

    /// Resolved `DTSTAMP`.
    pub timestamp: Option<Zoned>,

    /// Resolved `DTSTART`.
    pub start: Option<Zoned>,

    /// Resolved end, explicit or implied by the start.
    pub end: Option<Zoned>,

    /// Alarms nested in this event.
    pub alarms: Vec<Alarm>,
}

#[derive(Debug, Clone, Copy)]
enum EventField {
    Uid,
    Summary,
    Description,
    Timestamp,
    Start,
    End,
}

impl EventField {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            KW_UID => Some(Self::Uid),
            KW_SUMMARY => Some(Self::Summary),
            KW_DESCRIPTION => Some(Self::Description),
            KW_DTSTAMP => Some(Self::Timestamp),
            KW_DTSTART => Some(Self::Start),
            KW_DTEND => Some(Self::End),
            _ => None,
        }
    }
}

impl Event {
    /// The last property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        last_property(&self.properties, name)
    }

    /// Fill the derived fields from the properties.
    ///
    /// On failure the derived fields stay unset and only the raw
    /// properties and alarms remain.
    pub(crate) fn derive_fields(
        &mut self,
        resolver: &TimeResolver<'_>,
        inclusive_dtend: bool,
    ) -> Result<(), ErrorCause> {
        let result = self.resolve_fields(resolver, inclusive_dtend);
        if result.is_err() {
            self.uid = None;
            self.summary = None;
            self.description = None;
            self.timestamp = None;
            self.start = None;
            self.end = None;
        }
        result
    }

    fn resolve_fields(
        &mut self,
        resolver: &TimeResolver<'_>,
        inclusive_dtend: bool,
    ) -> Result<(), ErrorCause> {
        let mut explicit_end = None;
        for prop in &self.properties {
            let Some(field) = EventField::from_name(&prop.name) else {
                continue;
            };

            match field {
                EventField::Uid => self.uid = Some(prop.value.clone()),
                EventField::Summary => self.summary = Some(prop.value.clone()),
                EventField::Description => self.description = Some(prop.value.clone()),
                EventField::Timestamp => self.timestamp = Some(resolve_time(resolver, prop)?.0),
                EventField::Start => self.start = Some(resolve_time(resolver, prop)?.0),
                EventField::End => {
                    let end = match resolve_time(resolver, prop)? {
                        // RFC 5545 DATE ends are exclusive; an inclusive producer
                        // names the last day instead
                        (end, Layout::Date) if inclusive_dtend => end
                            .checked_add(1.day())
                            .map_err(|e| time_error(prop, e))?,
                        (end, _) => end,
                    };
                    explicit_end = Some(end);
                }
            }
        }

        self.end = match explicit_end {
            Some(end) => Some(end),
            None => self.implicit_end()?,
        };
        Ok(())
    }

    /// End implied by DURATION, or by the value type of DTSTART.
    fn implicit_end(&self) -> Result<Option<Zoned>, ErrorCause> {
        let (Some(start), Some(dtstart)) = (&self.start, self.property(KW_DTSTART)) else {
            return Ok(None);
        };

        if let Some(prop) = self.property(KW_DURATION) {
            let duration = parse_duration(&prop.value).map_err(|source| ErrorCause::Duration {
                property: prop.name.clone(),
                source,
            })?;
            let end = start
                .checked_add(duration)
                .map_err(|e| time_error(prop, e))?;
            return Ok(Some(end));
        }

        let end = match dtstart.params.get(KW_VALUE) {
            // a whole day
            None => start.checked_add(1.day()),
            Some(kinds) if kinds.iter().any(|k| k == KW_DATE) => start.checked_add(1.day()),
            // until the end of the start day
            Some(kinds) if kinds.iter().any(|k| k == KW_DATETIME) => start
                .date()
                .tomorrow()
                .and_then(|day| day.to_zoned(start.time_zone().clone())),
            Some(_) => return Ok(None),
        };
        end.map(Some).map_err(|e| time_error(dtstart, e))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn derive(properties: Vec<Property>, inclusive: bool) -> Result<Event, ErrorCause> {
        let zone = TimeZone::UTC;
        let resolver = TimeResolver::new(Some(&zone), date(2024, 1, 1));
        let mut event = Event {
            properties,
            ..Event::default()
        };
        event.derive_fields(&resolver, inclusive)?;
        Ok(event)
    }

    fn utc(y: i16, m: i8, d: i8, h: i8, min: i8, s: i8) -> Zoned {
        date(y, m, d).at(h, min, s, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    #[test]
    fn derives_text_fields() {
        let event = derive(
            vec![
                Property::new("UID", "1@example.com"),
                Property::new("SUMMARY", "first"),
                Property::new("SUMMARY", "second"),
                Property::new("DESCRIPTION", ""),
            ],
            false,
        )
        .unwrap();

        assert_eq!(event.uid.as_deref(), Some("1@example.com"));
        assert_eq!(event.summary.as_deref(), Some("second"));
        assert_eq!(event.description.as_deref(), Some(""));
        assert_eq!(event.start, None);
        assert_eq!(event.end, None);
    }

    #[test]
    fn explicit_end_wins() {
        let event = derive(
            vec![
                Property::new("DTSTART", "20200101T100000"),
                Property::new("DURATION", "PT1H"),
                Property::new("DTEND", "20200101T120000"),
            ],
            false,
        )
        .unwrap();
        assert_eq!(event.end, Some(utc(2020, 1, 1, 12, 0, 0)));
    }

    #[test]
    fn inclusive_dtend_only_moves_dates() {
        let props = vec![
            Property::new("DTSTART", "20200101").with_param("VALUE", ["DATE"]),
            Property::new("DTEND", "20200103").with_param("VALUE", ["DATE"]),
        ];
        assert_eq!(derive(props.clone(), false).unwrap().end, Some(utc(2020, 1, 3, 0, 0, 0)));
        assert_eq!(derive(props, true).unwrap().end, Some(utc(2020, 1, 4, 0, 0, 0)));

        let props = vec![
            Property::new("DTSTART", "20200101T100000"),
            Property::new("DTEND", "20200103T100000"),
        ];
        assert_eq!(derive(props, true).unwrap().end, Some(utc(2020, 1, 3, 10, 0, 0)));
    }

    #[test]
    fn duration_extends_start() {
        let event = derive(
            vec![
                Property::new("DTSTART", "20200101T100000"),
                Property::new("DURATION", "P1DT2H"),
            ],
            false,
        )
        .unwrap();
        assert_eq!(event.end, Some(utc(2020, 1, 2, 12, 0, 0)));
    }

    #[test]
    fn empty_duration_is_zero() {
        let event = derive(
            vec![
                Property::new("DTSTART", "20200101T100000"),
                Property::new("DURATION", ""),
            ],
            false,
        )
        .unwrap();
        assert_eq!(event.end, event.start);
    }

    #[test]
    fn implicit_ends() {
        let whole_day = derive(
            vec![Property::new("DTSTART", "20200101").with_param("VALUE", ["DATE"])],
            false,
        )
        .unwrap();
        assert_eq!(whole_day.end, Some(utc(2020, 1, 2, 0, 0, 0)));

        let untyped = derive(vec![Property::new("DTSTART", "20200101T103020")], false).unwrap();
        assert_eq!(untyped.end, Some(utc(2020, 1, 2, 10, 30, 20)));

        let end_of_day = derive(
            vec![Property::new("DTSTART", "20200101T103020").with_param("VALUE", ["DATE-TIME"])],
            false,
        )
        .unwrap();
        assert_eq!(end_of_day.end, Some(utc(2020, 1, 2, 0, 0, 0)));

        let other = derive(
            vec![Property::new("DTSTART", "20200101T103020").with_param("VALUE", ["PERIOD"])],
            false,
        )
        .unwrap();
        assert_eq!(other.end, None);
    }

    #[test]
    fn reports_bad_values() {
        let err = derive(vec![Property::new("DTSTART", "not-a-date")], false).unwrap_err();
        assert!(matches!(err, ErrorCause::Time { ref property, .. } if property == "DTSTART"));

        let err = derive(
            vec![
                Property::new("DTSTART", "20200101T100000"),
                Property::new("DURATION", "P1X"),
            ],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ErrorCause::Duration { ref property, .. } if property == "DURATION"));
    }

    #[test]
    fn failed_derivation_keeps_raw_properties() {
        let utc = TimeZone::UTC;
        let resolver = TimeResolver::new(Some(&utc), date(2024, 1, 1));
        let properties = vec![
            Property::new("UID", "kept"),
            Property::new("DTSTART", "20200101T100000"),
            Property::new("DURATION", "P1X"),
        ];
        let mut event = Event {
            properties: properties.clone(),
            ..Event::default()
        };

        assert!(event.derive_fields(&resolver, false).is_err());
        assert_eq!(event.properties, properties);
        assert_eq!(event.uid, None);
        assert_eq!(event.start, None);
    }
}
