//! Keymap compiler — entry point.
//!
//! Reads the source-of-truth key table and regenerates the two artifacts
//! derived from it: the web-facing key name mapping and the firmware keycode
//! dispatcher.
//!
//! # Usage
//!
//! ```text
//! keymap-compiler [OPTIONS]
//!
//! Options:
//!   --config <PATH>  Optional TOML config file [default: keymap.toml]
//!   --check          Verify the artifacts are up to date without writing
//! ```
//!
//! With no options it reads `keymap.in` from the working directory and writes
//! `data/keymap.json` and `hid/src/keymap.h`.
//!
//! # Exit codes
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Artifacts written (or, with `--check`, already up to date) |
//! | 1    | Load, config or write failure; or stale artifacts with `--check` |
//!
//! # Environment variable overrides
//!
//! | Variable         | Default        | Description                        |
//! |------------------|----------------|------------------------------------|
//! | `KEYMAP_CONFIG`  | `keymap.toml`  | Config file path                   |
//! | `RUST_LOG`       | config `level` | `tracing` filter, overrides config |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use keymap_compiler::application::compile::{check_keymap, compile_keymap, ArtifactStatus};
use keymap_compiler::infrastructure::storage::config::{load_config, DEFAULT_CONFIG_FILE};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Keymap compiler.
///
/// Generates the web key mapping and the firmware keycode dispatcher from a
/// single key table.
#[derive(Debug, Parser)]
#[command(
    name = "keymap-compiler",
    about = "Generates the web key mapping and firmware keycode dispatcher from keymap.in",
    version
)]
struct Cli {
    /// Optional TOML config file.  A missing file means "use all defaults".
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "KEYMAP_CONFIG")]
    config: PathBuf,

    /// Compare the generated artifacts with the files on disk and exit
    /// non-zero if any is stale or missing.  Nothing is written.
    #[arg(long)]
    check: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    // `RUST_LOG` wins; otherwise the configured level.  Logs go to stderr so
    // nothing is mixed into redirected stdout.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    config.paths = config.paths.resolve_against(&cwd);

    if cli.check {
        let report = check_keymap(&config).context("keymap check failed")?;
        if report.is_up_to_date() {
            info!(entries = report.entries, "generated artifacts are up to date");
            return Ok(ExitCode::SUCCESS);
        }
        for artifact in &report.artifacts {
            if artifact.status != ArtifactStatus::UpToDate {
                error!(
                    kind = %artifact.kind,
                    path = %artifact.path.display(),
                    status = ?artifact.status,
                    "regenerate with `keymap-compiler`"
                );
            }
        }
        return Ok(ExitCode::FAILURE);
    }

    compile_keymap(&config).context("keymap compilation failed")?;
    Ok(ExitCode::SUCCESS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
