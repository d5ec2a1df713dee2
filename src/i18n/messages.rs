// SPDX-License-Identifier: MPL-2.0
//! Flat message mappings for a single locale.

use crate::error::{BundleError, Result};
use crate::i18n::Locale;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Translation keys mapped to Fluent pattern text.
///
/// Cloning is cheap; clones share the same underlying map. A mapping is
/// replaced wholesale on locale change, never merged.
#[derive(Debug, Clone, Default)]
pub struct Messages(Arc<BTreeMap<String, String>>);

impl Messages {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self(Arc::new(entries))
    }

    /// Parses a bundle file: a flat TOML table of string values.
    pub fn from_toml_str(locale: Locale, source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source).map_err(|err| BundleError::Parse {
            locale,
            message: err.to_string(),
        })?;

        let mut entries = BTreeMap::new();
        for (key, value) in table {
            match value {
                toml::Value::String(template) => {
                    entries.insert(key, template);
                }
                _ => return Err(BundleError::NotAString { locale, key }.into()),
            }
        }
        Ok(Self::new(entries))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when both handles point at the same loaded mapping.
    pub fn ptr_eq(&self, other: &Messages) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Messages {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Messages {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Messages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
