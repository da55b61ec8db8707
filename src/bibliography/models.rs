// src/bibliography/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ADDRESS_FIELD: &str = "address";
pub const BOOKTITLE_FIELD: &str = "booktitle";

/// One bibliography record as handed over by the BibTeX layer.
///
/// Example:
/// ```json
/// {
///   "key": "DBLP:conf/soda/2012",
///   "type": "inproceedings",
///   "fields": { "booktitle": "..., {SODA} 2012, Kyoto, Japan, January 17-19, 2012" },
///   "persons": { "author": ["Jane Doe"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub persons: BTreeMap<String, Vec<String>>,
}

impl BibEntry {
    #[cfg(test)]
    pub fn new(key: &str, entry_type: &str) -> Self {
        Self {
            key: key.to_string(),
            entry_type: entry_type.to_string(),
            fields: BTreeMap::new(),
            persons: BTreeMap::new(),
        }
    }

    /// Builder-style field setter for fixtures.
    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// True when the field exists and is not just whitespace.
    pub fn has_nonempty(&self, name: &str) -> bool {
        self.field(name).is_some_and(|value| !value.trim().is_empty())
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// BibTeX entry types are case-insensitive (`@InProceedings` == `@inproceedings`).
    pub fn is_type(&self, entry_type: &str) -> bool {
        self.entry_type.eq_ignore_ascii_case(entry_type)
    }
}

/// Ordered collection of entries, serialized as `{ "entries": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bibliography {
    pub entries: Vec<BibEntry>,
}

impl Bibliography {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
