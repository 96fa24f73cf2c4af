//! Storage infrastructure: configuration and artifact persistence.
//!
//! This module is the thin adapter between the compiler and the file system.
//!
//! - `config` reads the TOML configuration file, falling back to defaults
//!   when it does not exist.
//! - `artifacts` reads the input table and writes generated files so that a
//!   failed run never leaves a truncated or half-updated artifact behind.

pub mod artifacts;
pub mod config;
