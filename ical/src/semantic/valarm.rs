// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! The `VALARM` component.

use jiff::Zoned;

use crate::error::ErrorCause;
use crate::keyword::{KW_ACTION, KW_DATETIME, KW_TRIGGER, KW_VALUE};
use crate::semantic::{Property, last_property, resolve_time};
use crate::value::TimeResolver;

/// A parsed `VALARM`, either nested in an event or placed in the calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alarm {
    /// Alarm properties in document order.
    pub properties: Vec<Property>,

    /// Value of the last `ACTION`.
    pub action: Option<String>,

    /// Raw value of the last `TRIGGER`.
    pub trigger: Option<String>,

    /// Absolute trigger time, set only for `VALUE=DATE-TIME` triggers.
    pub trigger_at: Option<Zoned>,
}

#[derive(Debug, Clone, Copy)]
enum AlarmField {
    Action,
    Trigger,
}

impl AlarmField {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            KW_ACTION => Some(Self::Action),
            KW_TRIGGER => Some(Self::Trigger),
            _ => None,
        }
    }
}

impl Alarm {
    /// The last property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        last_property(&self.properties, name)
    }

    /// Fill the derived fields from the properties.
    ///
    /// On failure the derived fields stay unset and only the raw
    /// properties remain.
    pub(crate) fn derive_fields(&mut self, resolver: &TimeResolver<'_>) -> Result<(), ErrorCause> {
        let result = self.resolve_fields(resolver);
        if result.is_err() {
            self.action = None;
            self.trigger = None;
            self.trigger_at = None;
        }
        result
    }

    fn resolve_fields(&mut self, resolver: &TimeResolver<'_>) -> Result<(), ErrorCause> {
        for prop in &self.properties {
            match AlarmField::from_name(&prop.name) {
                Some(AlarmField::Action) => self.action = Some(prop.value.clone()),
                Some(AlarmField::Trigger) => {
                    self.trigger = Some(prop.value.clone());
                    self.trigger_at = if prop.params.contains(KW_VALUE, KW_DATETIME) {
                        Some(resolve_time(resolver, prop)?.0)
                    } else {
                        None
                    };
                }
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn derive(properties: Vec<Property>, resolver: &TimeResolver<'_>) -> Alarm {
        let mut alarm = Alarm {
            properties,
            ..Alarm::default()
        };
        alarm.derive_fields(resolver).unwrap();
        alarm
    }

    #[test]
    fn keeps_relative_trigger_raw() {
        let utc = TimeZone::UTC;
        let resolver = TimeResolver::new(Some(&utc), date(2024, 1, 1));
        let alarm = derive(
            vec![
                Property::new("ACTION", "DISPLAY"),
                Property::new("TRIGGER", "-PT15M"),
            ],
            &resolver,
        );

        assert_eq!(alarm.action.as_deref(), Some("DISPLAY"));
        assert_eq!(alarm.trigger.as_deref(), Some("-PT15M"));
        assert_eq!(alarm.trigger_at, None);
    }

    #[test]
    fn resolves_absolute_trigger() {
        let resolver = TimeResolver::new(None, date(2024, 1, 1));
        let alarm = derive(
            vec![Property::new("TRIGGER", "19980101T050000Z").with_param("VALUE", ["DATE-TIME"])],
            &resolver,
        );

        let expected = date(1998, 1, 1).at(5, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
        assert_eq!(alarm.trigger_at, Some(expected));
        assert_eq!(alarm.trigger.as_deref(), Some("19980101T050000Z"));
    }
}
