//! Scaffold content collection for newly created branches.
//!
//! Walks a local directory tree and turns every regular file into a
//! base64-encoded "add" change, so the whole tree can land on a branch as a
//! single commit push.

use crate::error::ScaffoldError;
use crate::models::CommitChange;
use base64::{prelude::BASE64_STANDARD, Engine};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Commit message used for every scaffold push.
pub const SCAFFOLD_COMMIT_MESSAGE: &str = "Scaffolding content";

/// Collects every regular file under `content_root` as an add change.
///
/// Each file's destination path is its path relative to `content_root`,
/// prefixed with `root_path` when that is non-empty. Directories are skipped;
/// entries are visited in file-name order so the resulting commit is
/// deterministic.
pub fn collect_changes(
    content_root: &Path,
    root_path: &str,
) -> Result<Vec<CommitChange>, ScaffoldError> {
    if !content_root.is_dir() {
        return Err(ScaffoldError::NotADirectory {
            path: content_root.to_path_buf(),
        });
    }

    let mut changes = Vec::new();
    for entry in WalkDir::new(content_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| content_root.to_path_buf());
            match e.into_io_error() {
                Some(source) => ScaffoldError::Read { path, source },
                None => ScaffoldError::OutsideRoot { path },
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(content_root)
            .map_err(|_| ScaffoldError::OutsideRoot {
                path: entry.path().to_path_buf(),
            })?;
        let bytes = fs::read(entry.path()).map_err(|source| ScaffoldError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;

        changes.push(CommitChange {
            path: destination_path(root_path, relative),
            content_base64: BASE64_STANDARD.encode(bytes),
        });
    }

    Ok(changes)
}

/// Joins the destination prefix and a relative file path with `/` separators.
fn destination_path(root_path: &str, relative: &Path) -> String {
    let rel = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let prefix = root_path.trim_matches('/');
    if prefix.is_empty() {
        rel
    } else {
        format!("{}/{}", prefix, rel)
    }
}
