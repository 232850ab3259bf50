// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting.

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::semantic::{Parameters, Property};

pub fn write_properties<W: Write>(f: &mut Formatter<W>, properties: &[Property]) -> io::Result<()> {
    properties.iter().try_for_each(|prop| write_property(f, prop))
}

/// Format a single content line: `NAME;PARAM=v1,v2:value`.
///
/// Parameter and property values are written verbatim.
pub fn write_property<W: Write>(f: &mut Formatter<W>, property: &Property) -> io::Result<()> {
    write!(f, "{}", property.name)?;
    write_parameters(f, &property.params)?;
    write!(f, ":{}", property.value)?;
    f.writeln()
}

fn write_parameters<W: Write>(f: &mut Formatter<W>, params: &Parameters) -> io::Result<()> {
    // Parameters keeps its keys ordered, so output is sorted by name
    for (name, values) in params {
        write!(f, ";{name}=")?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
    }
    Ok(())
}
