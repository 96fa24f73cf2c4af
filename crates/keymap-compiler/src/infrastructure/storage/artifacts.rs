//! Reading the key table and writing generated artifacts.
//!
//! # Staged writes (for beginners)
//!
//! Writing a file in place is not atomic: if the process dies halfway, the
//! file is left truncated.  Writing *two* files in place is worse, because a
//! crash between them leaves one artifact describing the new table and the
//! other describing the old one.
//!
//! [`ArtifactBatch`] avoids both problems:
//!
//! 1. `stage()` writes each artifact to a temporary file in the **same
//!    directory** as its target (so the later rename never crosses a file
//!    system) and syncs it to disk.
//! 2. `commit()` renames every staged file onto its target.  A rename within
//!    one directory replaces the target in a single step.
//!
//! If anything fails before `commit()`, the batch is dropped and `tempfile`
//! deletes every staged file, leaving existing artifacts untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Error type for artifact storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred on `path`.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
        move |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the file is missing or unreadable.
pub fn read_text(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(StorageError::io(path))
}

/// Reads the raw bytes of an artifact if it exists.
///
/// Returns `Ok(None)` when the file is absent, so callers can tell "missing"
/// apart from "unreadable".  The contents are not decoded: a corrupt or
/// non-UTF-8 artifact still compares as different and gets regenerated.
pub fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Staged writes ─────────────────────────────────────────────────────────────

/// A set of artifacts written to temporary files and committed together.
#[derive(Debug, Default)]
pub struct ArtifactBatch {
    staged: Vec<StagedArtifact>,
}

#[derive(Debug)]
struct StagedArtifact {
    target: PathBuf,
    file: NamedTempFile,
}

impl ArtifactBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of staged, not yet committed artifacts.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Writes `contents` to a temporary sibling of `target`.
    ///
    /// Creates the target directory if needed.  The target itself is not
    /// touched until [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] naming the directory or target that failed.
    pub fn stage(&mut self, target: &Path, contents: &str) -> Result<(), StorageError> {
        let dir = target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(dir).map_err(StorageError::io(dir))?;

        let mut file = NamedTempFile::new_in(dir).map_err(StorageError::io(dir))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .and_then(|()| inherit_permissions(target, &file))
            .map_err(StorageError::io(target))?;

        debug!(path = %target.display(), staged = %file.path().display(), "artifact staged");
        self.staged.push(StagedArtifact {
            target: target.to_path_buf(),
            file,
        });
        Ok(())
    }

    /// Renames every staged file onto its target, in staging order.
    ///
    /// Returns the committed target paths.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for the first rename that fails.  Staged
    /// files that were not yet renamed are deleted.
    pub fn commit(self) -> Result<Vec<PathBuf>, StorageError> {
        let mut committed = Vec::with_capacity(self.staged.len());
        for StagedArtifact { target, file } in self.staged {
            file.persist(&target).map_err(|e| StorageError::Io {
                path: target.clone(),
                source: e.error,
            })?;
            debug!(path = %target.display(), "artifact committed");
            committed.push(target);
        }
        Ok(committed)
    }
}

/// Gives the staged file the permissions of the artifact it will replace.
///
/// `tempfile` creates files readable by the owner only; a new artifact gets
/// the usual `0644` instead.
fn inherit_permissions(target: &Path, staged: &NamedTempFile) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(staged.path(), meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_permissions(staged.path()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
