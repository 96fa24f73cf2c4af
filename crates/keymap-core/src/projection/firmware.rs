//! Firmware-facing keycode dispatch function.
//!
//! The firmware receives numeric key codes and must turn each one into the
//! keycode constant of its HID library.  This projection renders that lookup
//! as a C `switch` statement:
//!
//! ```c
//! #include <HID-Project.h>
//! #include <HID-Settings.h>
//!
//! KeyboardKeycode keymap(uint8_t code) {
//! 	switch (code) {
//! 		case 1: return KEY_A;
//! 		case 2: return KEY_B;
//! 		default: return 0;
//! 	}
//! }
//! ```
//!
//! # Why a `default` branch? (for beginners)
//!
//! The generated function must be *total*: every possible input returns
//! something.  Codes that are not in the table fall through to `default` and
//! return `0`, which the firmware treats as "no key".  [`FirmwareDispatch::resolve`]
//! implements exactly the same function on the Rust side so tests can check
//! the behaviour without compiling C.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::KeyTable;

/// Value returned by the generated function for codes absent from the table.
pub const DEFAULT_RETURN: &str = "0";

/// Shape of the generated C function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchOptions {
    /// Include targets, one `#include` line each, e.g. `<HID-Project.h>`.
    pub includes: Vec<String>,
    pub function_name: String,
    /// Return type of the generated function.
    pub return_type: String,
    /// Type of the `code` parameter.
    pub code_type: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            includes: vec!["<HID-Project.h>".to_string(), "<HID-Settings.h>".to_string()],
            function_name: "keymap".to_string(),
            return_type: "KeyboardKeycode".to_string(),
            code_type: "uint8_t".to_string(),
        }
    }
}

/// One `case <code>: return <symbol>;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub code: u32,
    pub symbol: String,
}

/// `code -> firmware_symbol` projection of a [`KeyTable`].
///
/// Renders through [`fmt::Display`]; call `to_string()` for the artifact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareDispatch {
    options: DispatchOptions,
    branches: Vec<Branch>,
}

impl FirmwareDispatch {
    /// Builds one branch per table row, sorted by ascending code.
    pub fn project(table: &KeyTable, options: DispatchOptions) -> Self {
        let mut branches: Vec<Branch> = table
            .entries()
            .map(|entry| Branch {
                code: entry.code,
                symbol: entry.firmware_symbol.clone(),
            })
            .collect();
        // Codes are unique in a KeyTable, so an unstable sort is deterministic.
        branches.sort_unstable_by_key(|branch| branch.code);
        Self { options, branches }
    }

    /// Evaluates the dispatch function for `code`.
    ///
    /// Returns [`DEFAULT_RETURN`] for codes without a branch.
    pub fn resolve(&self, code: u32) -> &str {
        self.branches
            .binary_search_by_key(&code, |branch| branch.code)
            .ok()
            .and_then(|index| self.branches.get(index))
            .map_or(DEFAULT_RETURN, |branch| branch.symbol.as_str())
    }

    /// Branches in emission order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Branches whose code does not fit in the `code` parameter type.
    ///
    /// The generated `switch` can never receive these codes, while the web
    /// mapping still advertises them.  Empty when the parameter type is not
    /// one of the fixed-width integer types listed in [`max_code_for`].
    pub fn unreachable_branches(&self) -> &[Branch] {
        let Some(max) = max_code_for(&self.options.code_type) else {
            return &[];
        };
        let first_out_of_range = self.branches.partition_point(|branch| branch.code <= max);
        &self.branches[first_out_of_range..]
    }
}

/// Largest value a C integer parameter type can hold, for the types the
/// firmware uses.  `None` for anything else.
pub fn max_code_for(code_type: &str) -> Option<u32> {
    match code_type.trim() {
        "uint8_t" | "byte" | "unsigned char" => Some(u32::from(u8::MAX)),
        "int8_t" | "signed char" => Some(u32::from(i8::MAX.unsigned_abs())),
        "uint16_t" | "word" | "unsigned short" => Some(u32::from(u16::MAX)),
        "int16_t" | "short" => Some(u32::from(i16::MAX.unsigned_abs())),
        "uint32_t" => Some(u32::MAX),
        _ => None,
    }
}

impl fmt::Display for FirmwareDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DispatchOptions {
            includes,
            function_name,
            return_type,
            code_type,
        } = &self.options;

        if !includes.is_empty() {
            for include in includes {
                writeln!(f, "#include {include}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{return_type} {function_name}({code_type} code) {{")?;
        writeln!(f, "\tswitch (code) {{")?;
        for Branch { code, symbol } in &self.branches {
            writeln!(f, "\t\tcase {code}: return {symbol};")?;
        }
        writeln!(f, "\t\tdefault: return {DEFAULT_RETURN};")?;
        writeln!(f, "\t}}")?;
        writeln!(f, "}}")
    }
}
