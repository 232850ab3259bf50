// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Raw content lines as captured by the parser.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Parameters of a property, keyed by parameter name.
///
/// Keys are unique and iterate in lexicographic order; the values of one
/// parameter keep their original order and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, Vec<String>>);

impl Parameters {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of the parameter `name`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(values) => Some(values),
            None => self
                .0
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, values)| values.as_slice()),
        }
    }

    /// Whether the parameter `name` carries `value` among its values.
    #[must_use]
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.get(name)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Append values to the parameter `name`, creating it if absent.
    pub fn append(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = String>) {
        self.0.entry(name.into()).or_default().extend(values);
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, Vec<String>)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, values) in iter {
            params.append(name, values);
        }
        params
    }
}

/// A single content line: name, parameters and the unfolded value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Property name as written in the source.
    pub name: String,
    /// Property parameters.
    pub params: Parameters,
    /// Raw value; empty when the line had nothing after the colon.
    pub value: String,
}

impl Property {
    /// Create a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Add parameter values, keeping any already present under `name`.
    #[must_use]
    pub fn with_param<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.params.append(name, values.into_iter().map(Into::into));
        self
    }
}

/// The last property called `name`, matched case-insensitively.
pub(crate) fn last_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties
        .iter()
        .rev()
        .find(|prop| prop.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_repeated_parameters() {
        let prop = Property::new("ATTENDEE", "mailto:a@example.com")
            .with_param("ROLE", ["CHAIR"])
            .with_param("MEMBER", ["a", "b"])
            .with_param("MEMBER", ["a"]);

        assert_eq!(prop.params.len(), 2);
        assert_eq!(
            prop.params.get("MEMBER"),
            Some(["a".to_owned(), "b".to_owned(), "a".to_owned()].as_slice())
        );
    }

    #[test]
    fn lookups_ignore_case() {
        let params: Parameters = [("Value".to_owned(), vec!["DATE".to_owned()])]
            .into_iter()
            .collect();

        assert!(params.contains("VALUE", "DATE"));
        assert!(!params.contains("VALUE", "date"));
        assert!(params.get("tzid").is_none());
    }

    #[test]
    fn iterates_in_name_order() {
        let params: Parameters = [
            ("TZID".to_owned(), vec!["UTC".to_owned()]),
            ("CN".to_owned(), vec!["x".to_owned()]),
            ("VALUE".to_owned(), vec!["DATE".to_owned()]),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = params.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["CN", "TZID", "VALUE"]);
    }

    #[test]
    fn last_property_wins() {
        let props = [
            Property::new("SUMMARY", "first"),
            Property::new("summary", "second"),
            Property::new("UID", "x"),
        ];
        assert_eq!(last_property(&props, "SUMMARY").map(|p| p.value.as_str()), Some("second"));
        assert!(last_property(&props, "DTSTART").is_none());
    }
}
