use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::model::directory::DirectoryEntry;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An immediate subdirectory of the source root.
#[derive(Debug, Clone, PartialEq)]
pub struct Subdirectory {
    pub path: PathBuf,
    pub name: String,
}

/// List the immediate subdirectories of `root`. Files and symlinks are
/// skipped; there is no recursion. Order is whatever the OS returns.
pub fn list_subdirectories(root: &Path) -> Result<Vec<Subdirectory>, ScanError> {
    let unreadable = |source| ScanError::Unreadable {
        path: root.display().to_string(),
        source,
    };

    let mut result = Vec::new();
    for entry in std::fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let file_type = entry.file_type().map_err(unreadable)?;
        if !file_type.is_dir() {
            continue;
        }
        result.push(Subdirectory {
            path: entry.path(),
            name: entry.file_name().to_string_lossy().to_string(),
        });
    }
    Ok(result)
}

/// Merge the current subdirectories of `root` with previously stored entries.
///
/// Entries whose path still exists are kept as they were (enabled flag and
/// profile assignments included); new subdirectories come in disabled with
/// no profiles; entries that vanished from disk are dropped. The result is
/// sorted by name, byte-wise.
pub fn reconcile(root: &Path, prior: &[DirectoryEntry]) -> Result<Vec<DirectoryEntry>, ScanError> {
    let found = list_subdirectories(root)?;

    let by_path: HashMap<&Path, &DirectoryEntry> =
        prior.iter().map(|d| (d.path.as_path(), d)).collect();

    let mut result: Vec<DirectoryEntry> = found
        .into_iter()
        .map(|sub| match by_path.get(sub.path.as_path()) {
            Some(existing) => (*existing).clone(),
            None => DirectoryEntry::discovered(sub.path, sub.name),
        })
        .collect();

    result.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::info!(
        root = %root.display(),
        total = result.len(),
        kept = result.iter().filter(|d| by_path.contains_key(d.path.as_path())).count(),
        "reconciled directories"
    );
    Ok(result)
}
