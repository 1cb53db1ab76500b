use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::storage_traits::{HistoryStore, StorageResult};
use crate::vehicle::Vehicle;

/// JSON-file-backed history store.
///
/// The whole list lives in one file. Writes go to a temp file in the same
/// directory and are renamed over the target, so readers see either the old
/// list or the new one.
#[derive(Debug, Clone)]
pub struct FsHistoryStore {
    path: PathBuf,
}

impl FsHistoryStore {
    /// Store at `path`. Parent directories are created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl HistoryStore for FsHistoryStore {
    fn save(&self, vehicles: &[Vehicle]) -> StorageResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_vec_pretty(vehicles)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), entries = vehicles.len(), "history saved");
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<Vehicle>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
