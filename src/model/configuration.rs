use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::directory::DirectoryEntry;
use super::profile::{Profile, ProfileId};

/// The persisted root aggregate. Exactly one instance exists per run; it is
/// owned by the app controller and lent to whichever screen is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "src_dir", alias = "sourceRoot")]
    pub source_root: PathBuf,
    #[serde(deserialize_with = "super::null_as_default")]
    pub profiles: Vec<Profile>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub directories: Vec<DirectoryEntry>,
    /// Preferred terminal emulator; `None` means auto-detect at launch time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
}

impl Configuration {
    /// Built-in configuration used when no document exists yet.
    pub fn with_defaults(home: Option<&Path>) -> Self {
        Configuration {
            source_root: home.map(|h| h.join("src")).unwrap_or_default(),
            profiles: vec![
                Profile::new("Claude", "claude --continue"),
                Profile::new(
                    "Claude YOLO",
                    "claude --continue --dangerously-skip-permissions",
                ),
                Profile::new("VS Code", "code ."),
                Profile::new("IntelliJ", "idea ."),
            ],
            directories: Vec::new(),
            terminal: None,
        }
    }

    pub fn has_source_root(&self) -> bool {
        !self.source_root.as_os_str().is_empty()
    }

    pub fn find_profile(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn find_directory_mut(&mut self, path: &Path) -> Option<&mut DirectoryEntry> {
        self.directories.iter_mut().find(|d| d.path == path)
    }

    /// Labels of the entry's profiles, in the entry's order. Dangling IDs
    /// resolve to nothing.
    pub fn resolve_labels(&self, entry: &DirectoryEntry) -> Vec<&str> {
        entry
            .profile_ids
            .iter()
            .filter_map(|id| self.find_profile(id))
            .map(|p| p.label.as_str())
            .collect()
    }

    pub fn add_profile(&mut self, label: &str, cmd: &str) -> ProfileId {
        let mut profile = Profile::new(label, cmd);
        while self.find_profile(&profile.id).is_some() {
            profile.id = ProfileId::generate();
        }
        let id = profile.id.clone();
        self.profiles.push(profile);
        id
    }

    /// Overwrite label and command in place. Returns false if the ID is unknown.
    pub fn update_profile(&mut self, id: &ProfileId, label: &str, cmd: &str) -> bool {
        match self.profiles.iter_mut().find(|p| &p.id == id) {
            Some(p) => {
                p.label = label.to_string();
                p.cmd = cmd.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a profile. Directory references to it are left in place.
    pub fn remove_profile(&mut self, id: &ProfileId) -> Option<Profile> {
        let idx = self.profiles.iter().position(|p| &p.id == id)?;
        Some(self.profiles.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Configuration {
        Configuration {
            source_root: PathBuf::from("/tmp/src"),
            profiles: vec![
                Profile {
                    id: "p1".into(),
                    label: "Claude".into(),
                    cmd: "claude --continue".into(),
                },
                Profile {
                    id: "p2".into(),
                    label: "Code".into(),
                    cmd: "code .".into(),
                },
            ],
            directories: vec![
                DirectoryEntry {
                    path: PathBuf::from("/tmp/src/alpha"),
                    name: "alpha".into(),
                    enabled: true,
                    profile_ids: vec!["p2".into(), "gone".into(), "p1".into()],
                },
                DirectoryEntry::discovered(PathBuf::from("/tmp/src/beta"), "beta".into()),
            ],
            terminal: None,
        }
    }

    #[test]
    fn defaults_have_complete_profiles_and_src_under_home() {
        let cfg = Configuration::with_defaults(Some(Path::new("/home/me")));
        assert_eq!(cfg.source_root, PathBuf::from("/home/me/src"));
        assert!(!cfg.profiles.is_empty());
        for p in &cfg.profiles {
            assert!(!p.id.as_str().is_empty());
            assert!(!p.label.is_empty());
            assert!(!p.cmd.is_empty());
        }
        assert!(Configuration::with_defaults(None).source_root.as_os_str().is_empty());
    }

    #[test]
    fn find_profile_and_directory() {
        let mut cfg = sample();
        assert_eq!(cfg.find_profile(&"p2".into()).map(|p| p.label.as_str()), Some("Code"));
        assert!(cfg.find_profile(&"missing".into()).is_none());
        assert_eq!(
            cfg.find_directory_mut(Path::new("/tmp/src/beta")).map(|d| d.name.clone()),
            Some("beta".to_string())
        );
        assert!(cfg.find_directory_mut(Path::new("/nope")).is_none());
    }

    #[test]
    fn resolve_labels_keeps_entry_order_and_skips_dangling() {
        let cfg = sample();
        assert_eq!(cfg.resolve_labels(&cfg.directories[0]), vec!["Code", "Claude"]);
        assert!(cfg.resolve_labels(&cfg.directories[1]).is_empty());
    }

    #[test]
    fn profile_crud() {
        let mut cfg = sample();
        let id = cfg.add_profile("Shell", "bash");
        assert_eq!(cfg.profiles.len(), 3);
        assert_eq!(cfg.profiles[2].id, id);

        assert!(cfg.update_profile(&id, "Zsh", "zsh"));
        assert_eq!(cfg.profiles[2].label, "Zsh");
        assert_eq!(cfg.profiles[2].id, id);
        assert!(!cfg.update_profile(&"missing".into(), "x", "y"));

        let removed = cfg.remove_profile(&"p1".into()).unwrap();
        assert_eq!(removed.label, "Claude");
        // Reference held by alpha survives as a dangling ID.
        assert!(cfg.directories[0].profile_ids.contains(&"p1".into()));
        assert_eq!(cfg.resolve_labels(&cfg.directories[0]), vec!["Code"]);
    }

    #[test]
    fn document_round_trips_with_original_keys() {
        let cfg = sample();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"src_dir\""));
        assert!(json.contains("\"profile_ids\""));
        assert!(!json.contains("\"terminal\""));
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_fields_default_and_aliases_are_accepted() {
        let cfg: Configuration = serde_json::from_str(
            r#"{"sourceRoot":"/x","directories":[{"path":"/x/a","name":"a","profileIds":["p9"]}],"extra":1}"#,
        )
        .unwrap();
        assert_eq!(cfg.source_root, PathBuf::from("/x"));
        assert!(cfg.profiles.is_empty());
        assert!(!cfg.directories[0].enabled);
        assert_eq!(cfg.directories[0].profile_ids, vec![ProfileId::from("p9")]);
        assert_eq!(cfg.terminal, None);
    }

    #[test]
    fn entries_with_missing_fields_load_as_empty() {
        let cfg: Configuration = serde_json::from_str(
            r#"{"directories":[{"path":"/x/a"},{"name":"b"}],"profiles":[{"id":"p","label":"L"},{"cmd":"ls"}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.directories[0].path, PathBuf::from("/x/a"));
        assert_eq!(cfg.directories[0].name, "");
        assert!(cfg.directories[0].profile_ids.is_empty());
        assert_eq!(cfg.directories[1].path, PathBuf::new());
        assert_eq!(cfg.directories[1].name, "b");
        assert_eq!(cfg.profiles[0].cmd, "");
        assert_eq!(cfg.profiles[1].id.as_str(), "");
        assert_eq!(cfg.profiles[1].label, "");
        assert_eq!(cfg.profiles[1].cmd, "ls");
    }

    #[test]
    fn null_lists_load_as_empty() {
        let cfg: Configuration = serde_json::from_str(
            r#"{"src_dir":"/x","profiles":null,"directories":null,"terminal":null}"#,
        )
        .unwrap();
        assert_eq!(cfg.source_root, PathBuf::from("/x"));
        assert!(cfg.profiles.is_empty());
        assert!(cfg.directories.is_empty());
        assert_eq!(cfg.terminal, None);

        let cfg: Configuration = serde_json::from_str(
            r#"{
  "src_dir": "/x",
  "profiles": [{"id": "p1", "label": "Code", "cmd": "code ."}],
  "directories": [{"path": "/x/a", "name": "a", "enabled": false, "profile_ids": null}]
}"#,
        )
        .unwrap();
        assert!(cfg.directories[0].profile_ids.is_empty());
        assert_eq!(cfg.profiles[0].label, "Code");
    }
}
