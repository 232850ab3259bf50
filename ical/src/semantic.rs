// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Document tree produced by the parser.
//!
//! Every component keeps its raw properties in document order, which is
//! what the formatter writes back. The typed fields are conveniences
//! derived from those properties once a component is complete.

mod icalendar;
mod property;
mod valarm;
mod vevent;

pub use icalendar::Calendar;
pub(crate) use property::last_property;
pub use property::{Parameters, Property};
pub use valarm::Alarm;
pub use vevent::Event;

use jiff::Zoned;

use crate::error::ErrorCause;
use crate::value::{Layout, TimeError, TimeResolver};

fn resolve_time(
    resolver: &TimeResolver<'_>,
    prop: &Property,
) -> Result<(Zoned, Layout), ErrorCause> {
    resolver
        .resolve(&prop.params, &prop.value)
        .map_err(|source| time_error(prop, source))
}

fn time_error(prop: &Property, source: impl Into<TimeError>) -> ErrorCause {
    ErrorCause::Time {
        property: prop.name.clone(),
        value: prop.value.clone(),
        source: source.into(),
    }
}
