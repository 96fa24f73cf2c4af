//! CompileKeymap use case: one table in, two consistent artifacts out.
//!
//! The main entry point is [`compile_keymap`]:
//!
//! ```text
//! keymap.in ──read──▶ KeyTable ─┬─▶ WebMapping       ─▶ data/keymap.json
//!                               └─▶ FirmwareDispatch ─▶ hid/src/keymap.h
//! ```
//!
//! Both artifacts are rendered in memory from the *same* `KeyTable` before any
//! file is written, then committed through one [`ArtifactBatch`].  A load or
//! render error therefore aborts before either artifact is modified.
//!
//! [`check_keymap`] runs the same pipeline but only compares the rendered text
//! with what is on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use keymap_core::{parse_table, FirmwareDispatch, LoadError, WebMapping};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::storage::artifacts::{
    read_existing, read_text, ArtifactBatch, StorageError,
};
use crate::infrastructure::storage::config::CompilerConfig;

/// Error type for the compile and check use cases.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The input table was unreadable or an artifact could not be written.
    #[error(transparent)]
    Io(#[from] StorageError),

    /// The input table was read but violates the table format or invariants.
    #[error("{path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The web mapping could not be serialized.
    #[error("failed to render web mapping: {0}")]
    Render(#[from] serde_json::Error),
}

/// The two generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    WebMapping,
    FirmwareDispatch,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::WebMapping => "web mapping",
            ArtifactKind::FirmwareDispatch => "firmware dispatch",
        })
    }
}

/// Artifact text rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Result of rendering both artifacts from one table load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Number of table entries both artifacts were built from.
    pub entries: usize,
    pub artifacts: Vec<RenderedArtifact>,
}

/// Outcome of a successful [`compile_keymap`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub entries: usize,
    pub written: Vec<WrittenArtifact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// `false` when the file already held byte-identical content.
    pub changed: bool,
}

impl CompileReport {
    /// `true` if at least one artifact's content differs from the previous run.
    pub fn any_changed(&self) -> bool {
        self.written.iter().any(|artifact| artifact.changed)
    }
}

/// Freshness of an artifact on disk compared with the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Outcome of a [`check_keymap`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub entries: usize,
    pub artifacts: Vec<CheckedArtifact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

impl CheckReport {
    /// `true` if every artifact matches what the table would generate.
    pub fn is_up_to_date(&self) -> bool {
        self.artifacts
            .iter()
            .all(|artifact| artifact.status == ArtifactStatus::UpToDate)
    }
}

// ── Use cases ─────────────────────────────────────────────────────────────────

/// Loads the table once and renders both artifacts in memory.
///
/// # Errors
///
/// - [`CompileError::Io`] if the input cannot be read.
/// - [`CompileError::Load`] if the table is malformed or has duplicates.
/// - [`CompileError::Render`] if JSON serialization fails.
pub fn render_artifacts(config: &CompilerConfig) -> Result<Rendered, CompileError> {
    let paths = &config.paths;
    let text = read_text(&paths.input)?;
    let table = parse_table(&text).map_err(|source| CompileError::Load {
        path: paths.input.clone(),
        source,
    })?;
    debug!(input = %paths.input.display(), entries = table.len(), "key table parsed");

    let web = WebMapping::project(&table).to_json()?;
    let dispatch = FirmwareDispatch::project(&table, config.firmware.clone());
    for branch in dispatch.unreachable_branches() {
        warn!(
            code = branch.code,
            symbol = %branch.symbol,
            code_type = %config.firmware.code_type,
            "code does not fit the dispatch parameter type; the firmware can never receive it"
        );
    }
    let firmware = dispatch.to_string();

    Ok(Rendered {
        entries: table.len(),
        artifacts: vec![
            RenderedArtifact {
                kind: ArtifactKind::WebMapping,
                path: paths.web_mapping.clone(),
                contents: web,
            },
            RenderedArtifact {
                kind: ArtifactKind::FirmwareDispatch,
                path: paths.firmware_dispatch.clone(),
                contents: firmware,
            },
        ],
    })
}

/// Regenerates both artifacts from the input table.
///
/// Either both artifacts are replaced or neither is: nothing is written until
/// the table has loaded and both artifacts have rendered, and the writes go
/// through a staged [`ArtifactBatch`].
///
/// # Errors
///
/// Any [`CompileError`]; existing artifacts are left untouched.
pub fn compile_keymap(config: &CompilerConfig) -> Result<CompileReport, CompileError> {
    let rendered = render_artifacts(config)?;

    let mut batch = ArtifactBatch::new();
    let mut written = Vec::with_capacity(rendered.artifacts.len());
    for artifact in &rendered.artifacts {
        let existing = read_existing(&artifact.path)?;
        let changed = existing.as_deref() != Some(artifact.contents.as_bytes());
        batch.stage(&artifact.path, &artifact.contents)?;
        written.push(WrittenArtifact {
            kind: artifact.kind,
            path: artifact.path.clone(),
            changed,
        });
    }
    batch.commit()?;

    for artifact in &written {
        info!(
            kind = %artifact.kind,
            path = %artifact.path.display(),
            changed = artifact.changed,
            "artifact written"
        );
    }
    info!(entries = rendered.entries, "keymap compiled");

    Ok(CompileReport {
        entries: rendered.entries,
        written,
    })
}

/// Compares freshly rendered artifacts with the files on disk.  Never writes.
///
/// # Errors
///
/// Any [`CompileError`] from loading or rendering, or an unreadable artifact.
pub fn check_keymap(config: &CompilerConfig) -> Result<CheckReport, CompileError> {
    let rendered = render_artifacts(config)?;

    let mut artifacts = Vec::with_capacity(rendered.artifacts.len());
    for artifact in rendered.artifacts {
        let status = status_of(&artifact.path, &artifact.contents)?;
        match status {
            ArtifactStatus::UpToDate => {
                debug!(kind = %artifact.kind, path = %artifact.path.display(), "artifact up to date")
            }
            ArtifactStatus::Stale => {
                warn!(kind = %artifact.kind, path = %artifact.path.display(), "artifact is stale")
            }
            ArtifactStatus::Missing => {
                warn!(kind = %artifact.kind, path = %artifact.path.display(), "artifact is missing")
            }
        }
        artifacts.push(CheckedArtifact {
            kind: artifact.kind,
            path: artifact.path,
            status,
        });
    }

    Ok(CheckReport {
        entries: rendered.entries,
        artifacts,
    })
}

fn status_of(path: &Path, expected: &str) -> Result<ArtifactStatus, CompileError> {
    Ok(match read_existing(path)? {
        None => ArtifactStatus::Missing,
        Some(current) if current == expected.as_bytes() => ArtifactStatus::UpToDate,
        Some(_) => ArtifactStatus::Stale,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
