//! The key mapping data model.
//!
//! A [`KeyTable`] is the in-memory form of `keymap.in`: an ordered list of
//! [`KeyEntry`] records, each remembering the source line it came from.
//!
//! # Why can't I build a `KeyTable` directly? (for beginners)
//!
//! The two projections rely on two invariants: every `code` is unique and
//! every `web_key_name` is unique.  If callers could push arbitrary entries
//! into a table, every projection would have to re-check those rules.
//! Instead, the only way to obtain a `KeyTable` is [`loader::parse_table`],
//! which rejects duplicates.  Holding a `KeyTable` therefore *proves* the
//! invariants hold.

pub mod loader;

/// One row of the key mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEntry {
    /// Canonical numeric key identifier used by the firmware.  Unique per table.
    pub code: u32,
    /// Firmware keycode constant name, e.g. `KEY_A`.  May alias another row.
    pub firmware_symbol: String,
    /// Identifier used by the web input layer, e.g. `KeyA`.  Unique per table.
    pub web_key_name: String,
}

/// A [`KeyEntry`] together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: usize,
    pub entry: KeyEntry,
}

/// Validated, non-empty set of key entries in source order.
///
/// Codes and web key names are unique across the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    rows: Vec<TableRow>,
}

impl KeyTable {
    /// Wraps rows that the loader has already validated.
    pub(crate) fn from_validated_rows(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Iterates over the entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = &KeyEntry> {
        self.rows.iter().map(|row| &row.entry)
    }

    /// Iterates over the entries with their source line numbers.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of entries in the table.  Never zero.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false` for a loaded table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the entry with the given `code`.
    pub fn by_code(&self, code: u32) -> Option<&KeyEntry> {
        self.entries().find(|entry| entry.code == code)
    }

    /// Looks up the entry with the given web key name.
    pub fn by_web_name(&self, name: &str) -> Option<&KeyEntry> {
        self.entries().find(|entry| entry.web_key_name == name)
    }
}
