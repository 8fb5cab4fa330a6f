use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::configuration::Configuration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode configuration: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not determine a per-user config directory")]
    NoConfigDir,
}

/// Load/save contract for the configuration document.
///
/// `load` returns `Ok(None)` when no document exists yet; the caller decides
/// what to substitute. `save` always rewrites the whole document.
pub trait ConfigStore {
    fn load(&self) -> Result<Option<Configuration>, StoreError>;
    fn save(&self, config: &Configuration) -> Result<(), StoreError>;
}

/// Pretty-printed JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Option<Configuration>, StoreError> {
        let display = self.path.display().to_string();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: display,
                    source,
                })
            }
        };
        let config = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: display,
            source,
        })?;
        Ok(Some(config))
    }

    fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let mut body = serde_json::to_string_pretty(config).map_err(StoreError::Encode)?;
        body.push('\n');
        atomic_write_file(&self.path, body.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

/// Load the document, substituting the built-in defaults when none exists.
pub fn load_or_default(store: &dyn ConfigStore) -> Result<Configuration, StoreError> {
    match store.load()? {
        Some(config) => Ok(config),
        None => {
            tracing::info!("no configuration found, using defaults");
            Ok(Configuration::with_defaults(dirs::home_dir().as_deref()))
        }
    }
}

fn atomic_write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("config"),
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    let tmp_path = parent.join(tmp_name);

    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}
