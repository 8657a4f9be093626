//! Durable local store: one JSON file holding the current snapshot, read on
//! startup and rewritten after every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::SnapshotError;
use crate::snapshot::PersistedSnapshot;

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: PathBuf) -> Self {
        Storage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default store location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cntab")
            .join("tableData.json")
    }

    /// Read the stored snapshot. `Ok(None)` means no snapshot has ever been
    /// written; `Err` means one exists but could not be read or parsed.
    pub fn load(&self) -> Result<Option<PersistedSnapshot>, SnapshotError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot = serde_json::from_str(&text)?;
        Ok(Some(snapshot))
    }

    pub fn save(&self, snapshot: &PersistedSnapshot) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        log::debug!("wrote snapshot to {}", self.path.display());
        Ok(())
    }
}
