//! Web-facing key name lookup table.
//!
//! The browser reports keys by name (e.g. `KeyA`, `ShiftLeft`).  The web
//! layer looks that name up in this mapping to find the numeric code to send
//! downstream.
//!
//! The serialized form is a JSON object with keys sorted ascending, so the
//! generated file diffs cleanly when a single row of the table changes:
//!
//! ```json
//! {
//!   "KeyA": 1,
//!   "KeyB": 2
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::KeyTable;

/// `web_key_name -> code` projection of a [`KeyTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WebMapping {
    // BTreeMap iterates (and therefore serializes) in ascending key order.
    entries: BTreeMap<String, u32>,
}

impl WebMapping {
    /// Builds the mapping with one entry per table row.
    pub fn project(table: &KeyTable) -> Self {
        let entries = table
            .entries()
            .map(|entry| (entry.web_key_name.clone(), entry.code))
            .collect();
        Self { entries }
    }

    /// Code for `name`, if the table defines it.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    /// Entries in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, code)| (name.as_str(), *code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the artifact text: pretty-printed JSON plus a trailing newline.
    ///
    /// # Errors
    ///
    /// Propagates [`serde_json::Error`]; a map of strings to integers cannot
    /// realistically fail to serialize.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}
