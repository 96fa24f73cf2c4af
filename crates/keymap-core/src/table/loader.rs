//! Parser for the line-oriented key mapping table.
//!
//! # Input format
//!
//! ```text
//! # Lines starting with '#' are comments; blank lines are ignored.
//! # code  firmware_symbol  web_key_name
//! 1       KEY_A            KeyA
//! 2       KEY_B            KeyB
//! ```
//!
//! Fields are separated by any amount of whitespace.  There is no quoting and
//! no escaping, so none of the three fields may contain whitespace.
//!
//! # Error reporting
//!
//! Every error names the 1-based line it was found on.  Uniqueness errors
//! name *both* lines so the author can decide which row is wrong.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::{KeyEntry, KeyTable, TableRow};

/// Marker that starts a comment line (after optional leading whitespace).
pub const COMMENT_MARKER: char = '#';

/// Error type for table loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A data line could not be split into a valid record.
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: MalformedReason },

    /// Two rows share the same numeric code.
    #[error("line {line}: duplicate code {code} (first defined on line {first_line})")]
    DuplicateCode {
        code: u32,
        first_line: usize,
        line: usize,
    },

    /// Two rows share the same web key name.
    #[error("line {line}: duplicate web key name '{name}' (first defined on line {first_line})")]
    DuplicateWebName {
        name: String,
        first_line: usize,
        line: usize,
    },

    /// The input contained no data lines at all.
    #[error("key table is empty: no entries after skipping comments and blank lines")]
    EmptyTable,
}

impl LoadError {
    /// The 1-based line the error was detected on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::MalformedLine { line, .. }
            | LoadError::DuplicateCode { line, .. }
            | LoadError::DuplicateWebName { line, .. } => Some(*line),
            LoadError::EmptyTable => None,
        }
    }
}

/// Why a data line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("expected 3 fields (code firmware_symbol web_key_name), found {found}")]
    FieldCount { found: usize },

    #[error("code '{value}' is not a non-negative integer")]
    InvalidCode { value: String },
}

/// Parses the full text of a key mapping table.
///
/// Rows are returned in source order.  Parsing stops at the first error.
///
/// # Errors
///
/// - [`LoadError::MalformedLine`] for a wrong field count or a non-integer code.
/// - [`LoadError::DuplicateCode`] / [`LoadError::DuplicateWebName`] when a
///   uniqueness invariant is violated.
/// - [`LoadError::EmptyTable`] when no data lines remain.
///
/// # Examples
///
/// ```rust
/// use keymap_core::parse_table;
///
/// let table = parse_table("# comment\n10 KEY_A a\n11 KEY_B b\n").unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub fn parse_table(text: &str) -> Result<KeyTable, LoadError> {
    let mut rows = Vec::new();
    let mut code_lines: HashMap<u32, usize> = HashMap::new();
    let mut name_lines: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            skipped += 1;
            continue;
        }

        let (code, firmware_symbol, web_key_name) = split_fields(trimmed, line)?;

        if let Some(&first_line) = code_lines.get(&code) {
            return Err(LoadError::DuplicateCode {
                code,
                first_line,
                line,
            });
        }
        if let Some(&first_line) = name_lines.get(web_key_name) {
            return Err(LoadError::DuplicateWebName {
                name: web_key_name.to_string(),
                first_line,
                line,
            });
        }
        code_lines.insert(code, line);
        name_lines.insert(web_key_name, line);

        rows.push(TableRow {
            line,
            entry: KeyEntry {
                code,
                firmware_symbol: firmware_symbol.to_string(),
                web_key_name: web_key_name.to_string(),
            },
        });
    }

    if rows.is_empty() {
        return Err(LoadError::EmptyTable);
    }

    debug!(entries = rows.len(), skipped, "key table loaded");
    Ok(KeyTable::from_validated_rows(rows))
}

/// Splits a trimmed data line into its three typed fields.
fn split_fields(trimmed: &str, line: usize) -> Result<(u32, &str, &str), LoadError> {
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let [code, firmware_symbol, web_key_name] = fields.as_slice() else {
        return Err(LoadError::MalformedLine {
            line,
            reason: MalformedReason::FieldCount {
                found: fields.len(),
            },
        });
    };

    let code = code.parse::<u32>().map_err(|_| LoadError::MalformedLine {
        line,
        reason: MalformedReason::InvalidCode {
            value: (*code).to_string(),
        },
    })?;

    Ok((code, *firmware_symbol, *web_key_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
