//! Infrastructure layer: everything that touches the file system.
//!
//! - **`storage::config`** – Loads the optional `keymap.toml`.
//! - **`storage::artifacts`** – Reads the key table and existing artifacts,
//!   and writes new artifacts through a staged, commit-together batch.

pub mod storage;
