use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a launch profile.
///
/// Directories reference profiles by this ID; an ID is generated once when
/// the profile is created and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Generate a fresh 16-hex-character ID.
    pub fn generate() -> Self {
        let mut raw = uuid::Uuid::new_v4().simple().to_string();
        raw.truncate(16);
        ProfileId(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        ProfileId(value.to_string())
    }
}

impl From<String> for ProfileId {
    fn from(value: String) -> Self {
        ProfileId(value)
    }
}

/// A reusable launch profile: a display label plus a shell command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: ProfileId,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "command")]
    pub cmd: String,
}

impl Profile {
    pub fn new(label: impl Into<String>, cmd: impl Into<String>) -> Self {
        Profile {
            id: ProfileId::generate(),
            label: label.into(),
            cmd: cmd.into(),
        }
    }
}
