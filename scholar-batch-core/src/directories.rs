//! Item directory discovery: every visible subdirectory directly under the
//! batch root is one item.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::error::{FormatError, Result};

/// Lists the immediate, non-hidden subdirectories of `root` as absolute paths,
/// sorted by name. Files and dot-directories are skipped.
pub fn list_item_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let absolute_root = fs::canonicalize(root).map_err(|e| {
        error!(error = ?e, path = %root.display(), "[DIRS] Failed to resolve batch root");
        FormatError::from_io(root, e)
    })?;
    if !absolute_root.is_dir() {
        error!(path = %absolute_root.display(), "[DIRS] Batch root is not a directory");
        return Err(FormatError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut directories = Vec::new();
    let entries = fs::read_dir(&absolute_root).map_err(|e| FormatError::from_io(&absolute_root, e))?;
    for entry_res in entries {
        let entry = entry_res.map_err(|e| FormatError::from_io(&absolute_root, e))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            debug!(name = ?name, "[DIRS] Skipping hidden entry");
            continue;
        }
        let path = absolute_root.join(&name);
        if path.is_dir() {
            directories.push(path);
        }
    }
    directories.sort();

    info!(
        root = %absolute_root.display(),
        count = directories.len(),
        "[DIRS] Discovered item directories"
    );
    Ok(directories)
}
