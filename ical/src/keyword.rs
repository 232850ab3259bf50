// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VALARM: &str = "VALARM";

// Structural content lines, matched verbatim by the tokenizer
pub const KW_BEGIN_VCALENDAR: &str = "BEGIN:VCALENDAR";
pub const KW_END_VCALENDAR: &str = "END:VCALENDAR";
pub const KW_BEGIN_VEVENT: &str = "BEGIN:VEVENT";
pub const KW_END_VEVENT: &str = "END:VEVENT";
pub const KW_BEGIN_VALARM: &str = "BEGIN:VALARM";
pub const KW_END_VALARM: &str = "END:VALARM";

// Section 3.2 - Property Parameters
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";

// Section 3.3 - Property Value Data Types
pub const KW_DATE: &str = "DATE";
pub const KW_DATETIME: &str = "DATE-TIME";

// Section 3.7 - Calendar Properties
pub const KW_CALSCALE: &str = "CALSCALE";
pub const KW_CALSCALE_GREGORIAN: &str = "GREGORIAN";
pub const KW_METHOD: &str = "METHOD";
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION: &str = "VERSION";

// Section 3.8 - Component Properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DURATION: &str = "DURATION";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_TRIGGER: &str = "TRIGGER";
pub const KW_UID: &str = "UID";
