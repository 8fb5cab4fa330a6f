use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::profile::ProfileId;

/// A catalogued project directory under the source root.
///
/// `path` is the unique key. `profile_ids` may hold IDs of profiles that no
/// longer exist; those are skipped wherever labels or commands are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(default)]
    pub path: PathBuf,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, alias = "profileIds", deserialize_with = "super::null_as_default")]
    pub profile_ids: Vec<ProfileId>,
}

impl DirectoryEntry {
    /// A freshly discovered directory: disabled, no profiles.
    pub fn discovered(path: PathBuf, name: String) -> Self {
        DirectoryEntry {
            path,
            name,
            enabled: false,
            profile_ids: Vec::new(),
        }
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }
}
