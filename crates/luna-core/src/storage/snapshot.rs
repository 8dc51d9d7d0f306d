//! Full-snapshot persistence for the cycle store.
//!
//! Every save rewrites both the cycle list and the log map together. Reads
//! never fail: a missing file is a fresh install, a corrupt one is logged and
//! treated the same way.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cycle::Snapshot;
use crate::error::StorageError;

use super::data_dir;

const SNAPSHOT_FILE: &str = "luna.json";

/// Where the tracker's state lives between sessions.
pub trait SnapshotStore {
    /// Load the last saved snapshot, or an empty one.
    fn load(&self) -> Snapshot;

    /// Overwrite the saved snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// JSON file store at `<data_dir>/luna.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store inside the default data directory.
    pub fn open() -> Result<Self, crate::error::ConfigError> {
        Ok(Self::new_with_path(data_dir()?.join(SNAPSHOT_FILE)))
    }

    /// Store at a specific path (for testing).
    pub fn new_with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SNAPSHOT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Snapshot {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Snapshot::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable snapshot; starting empty");
                return Snapshot::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt snapshot; starting empty");
                Snapshot::default()
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.temp_path();
        let write_failed = |source: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        std::fs::write(&tmp, data).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(write_failed)?;

        tracing::debug!(
            path = %self.path.display(),
            cycles = snapshot.cycles.len(),
            logs = snapshot.logs.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

/// In-memory store. Keeps the last saved snapshot and counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<(Snapshot, usize)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new((snapshot, 0)),
        }
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|g| g.1).unwrap_or(0)
    }

    pub fn saved(&self) -> Snapshot {
        self.inner.lock().map(|g| g.0.clone()).unwrap_or_default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Snapshot {
        self.saved()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.0 = snapshot.clone();
        guard.1 += 1;
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self) -> Snapshot {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}
