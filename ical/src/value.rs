// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Value resolution for time-valued and duration-valued properties.

mod datetime;
mod duration;

pub(crate) use datetime::TimeResolver;
pub use datetime::{Layout, TimeError};
pub use duration::{DurationError, parse_duration};
