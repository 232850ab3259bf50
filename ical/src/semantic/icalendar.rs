// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! The `VCALENDAR` component.

use crate::keyword::{KW_CALSCALE, KW_CALSCALE_GREGORIAN, KW_METHOD, KW_PRODID, KW_VERSION};
use crate::semantic::{Alarm, Event, Property, last_property};

/// A parsed `VCALENDAR` object.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    /// Calendar-level properties in document order.
    pub properties: Vec<Property>,

    /// Value of the last `PRODID`.
    pub product_id: Option<String>,

    /// Value of the last `VERSION`.
    pub version: Option<String>,

    /// Value of the last `CALSCALE`, `GREGORIAN` when absent.
    pub calscale: String,

    /// Value of the last `METHOD`.
    pub method: Option<String>,

    /// Events in document order.
    pub events: Vec<Event>,

    /// Alarms placed directly inside the calendar.
    pub alarms: Vec<Alarm>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            product_id: None,
            version: None,
            calscale: KW_CALSCALE_GREGORIAN.to_owned(),
            method: None,
            events: Vec::new(),
            alarms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CalendarField {
    ProductId,
    Version,
    Calscale,
    Method,
}

impl CalendarField {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            KW_PRODID => Some(Self::ProductId),
            KW_VERSION => Some(Self::Version),
            KW_CALSCALE => Some(Self::Calscale),
            KW_METHOD => Some(Self::Method),
            _ => None,
        }
    }
}

impl Calendar {
    /// The last calendar-level property called `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        last_property(&self.properties, name)
    }

    pub(crate) fn derive_fields(&mut self) {
        for prop in &self.properties {
            let Some(field) = CalendarField::from_name(&prop.name) else {
                continue;
            };

            let value = Some(prop.value.clone());
            match field {
                CalendarField::ProductId => self.product_id = value,
                CalendarField::Version => self.version = value,
                CalendarField::Calscale => self.calscale.clone_from(&prop.value),
                CalendarField::Method => self.method = value,
            }
        }
    }
}
