// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf, str::FromStr};

use calyx_ical::ParseOptions;
use jiff::tz::TimeZone;

const CALYX_CONFIG_ENV: &str = "CALYX_CONFIG";

/// Load the configuration from `path`, or from `$CALYX_CONFIG` when no path
/// is given. Without either, the defaults are used.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = match path {
        Some(path) => path,
        None => match std::env::var_os(CALYX_CONFIG_ENV) {
            Some(env_path) => PathBuf::from(env_path),
            None => {
                tracing::debug!("no configuration file given, using defaults");
                return Ok(Config::default());
            }
        },
    };

    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the Calyx command-line interface.
///
/// ```toml
/// [parse]
/// strict-line-breaks = false
/// default-zone = "Europe/Berlin"
/// inclusive-dtend = true
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options handed to the parser.
    pub parse: ParseOptions,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl Config {
    /// Apply command-line overrides on top of the configured parse options.
    ///
    /// # Errors
    /// Returns an error if the override zone is unknown.
    pub fn parse_options(self, overrides: &ParseOverrides) -> Result<ParseOptions, Box<dyn Error>> {
        let mut options = self.parse;
        if overrides.strict {
            options = options.strict_line_breaks(true);
        }
        if let Some(zone) = &overrides.zone {
            let zone = TimeZone::get(zone).map_err(|e| format!("Unknown time zone {zone:?}: {e}"))?;
            options = options.default_zone(Some(zone));
        }
        if overrides.inclusive_dtend {
            options = options.inclusive_dtend(true);
        }
        Ok(options)
    }
}

/// Parse options given as command-line flags; set flags win over the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct ParseOverrides {
    /// `--strict`
    pub strict: bool,
    /// `--zone`
    pub zone: Option<String>,
    /// `--inclusive-dtend`
    pub inclusive_dtend: bool,
}
