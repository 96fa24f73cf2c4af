//! # keymap-core
//!
//! Shared library for the keymap compiler containing the key mapping data
//! model, the table loader, and the two projections generated from it.
//!
//! This crate performs no file-system I/O.  It turns text into typed records
//! and typed records into artifact text; reading and writing files is the job
//! of the `keymap-compiler` crate.
//!
//! # Architecture overview (for beginners)
//!
//! A single source-of-truth table (`keymap.in`) lists every key the system
//! knows about.  Each row links three identifiers for the same physical key:
//!
//! ```text
//! # code  firmware_symbol  web_key_name
//! 1       KEY_A            KeyA
//! 2       KEY_B            KeyB
//! ```
//!
//! Two downstream systems need that table in different shapes:
//!
//! - **The web layer** receives key names from the browser and needs to know
//!   which numeric code to send.  It wants `web_key_name -> code`.
//! - **The firmware** receives numeric codes and needs the keycode constant to
//!   press.  It wants `code -> firmware_symbol`.
//!
//! This crate defines:
//!
//! - **`table`** – The [`KeyEntry`] record, the validated [`KeyTable`], and the
//!   loader that parses text into a table while enforcing uniqueness.
//!
//! - **`projection`** – The [`WebMapping`] and [`FirmwareDispatch`] views.
//!   Both are built from the *same* `KeyTable` value, so they can never
//!   disagree about a mapping.

pub mod projection;
pub mod table;

// Re-export the most-used types at the crate root so callers can write
// `keymap_core::KeyTable` instead of `keymap_core::table::KeyTable`.
pub use projection::firmware::{max_code_for, DispatchOptions, FirmwareDispatch, DEFAULT_RETURN};
pub use projection::web::WebMapping;
pub use table::loader::{parse_table, LoadError, MalformedReason};
pub use table::{KeyEntry, KeyTable, TableRow};
