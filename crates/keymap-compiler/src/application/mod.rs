//! Application layer use cases for the keymap compiler.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the core library (pure parsing and
//! projection rules in `keymap-core`) and the infrastructure (file system).
//! Use cases here orchestrate the two to fulfil one user goal and contain no
//! parsing or formatting logic of their own.
//!
//! # Sub-modules
//!
//! - **`compile`** – Loads the table once, renders both artifacts from the
//!   same in-memory table, and writes them as one batch.  Also provides the
//!   read-only `check_keymap` used by CI to detect stale generated files.

pub mod compile;
