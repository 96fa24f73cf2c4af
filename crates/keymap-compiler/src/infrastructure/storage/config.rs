//! TOML-based configuration for the keymap compiler.
//!
//! The compiler works with no configuration at all: it reads `keymap.in` from
//! the working directory and writes two fixed relative paths.  A `keymap.toml`
//! next to the table can override any of those defaults:
//!
//! ```toml
//! [paths]
//! input = "keymap.in"
//! web_mapping = "data/keymap.json"
//! firmware_dispatch = "hid/src/keymap.h"
//!
//! [firmware]
//! includes = ["<HID-Project.h>", "<HID-Settings.h>"]
//! function_name = "keymap"
//! return_type = "KeyboardKeycode"
//! code_type = "uint8_t"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Every field carries a `#[serde(default ...)]` annotation, so a config file
//! may set a single key and inherit everything else.  A missing file behaves
//! exactly like an empty one.

use std::path::{Path, PathBuf};

use keymap_core::DispatchOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "keymap.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error other than "not found" occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level compiler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompilerConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    /// Shape of the generated firmware function.
    #[serde(default)]
    pub firmware: DispatchOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input table and output artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// The source-of-truth key table.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Web-facing `web_key_name -> code` JSON document.
    #[serde(default = "default_web_mapping")]
    pub web_mapping: PathBuf,
    /// Firmware-facing `code -> symbol` dispatch source.
    #[serde(default = "default_firmware_dispatch")]
    pub firmware_dispatch: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_input() -> PathBuf {
    PathBuf::from("keymap.in")
}
fn default_web_mapping() -> PathBuf {
    PathBuf::from("data/keymap.json")
}
fn default_firmware_dispatch() -> PathBuf {
    PathBuf::from("hid/src/keymap.h")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            web_mapping: default_web_mapping(),
            firmware_dispatch: default_firmware_dispatch(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PathsConfig {
    /// Resolves every relative path against `base`.  Absolute paths are kept.
    pub fn resolve_against(&self, base: &Path) -> Self {
        Self {
            input: base.join(&self.input),
            web_mapping: base.join(&self.web_mapping),
            firmware_dispatch: base.join(&self.firmware_dispatch),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `CompilerConfig` from `path`, returning `CompilerConfig::default()`
/// if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<CompilerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CompilerConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses config TOML text.
pub fn parse_config(content: &str) -> Result<CompilerConfig, toml::de::Error> {
    toml::from_str(content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
