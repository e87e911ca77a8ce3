//! I/O boundary traits for testability
//!
//! The snapshot store abstracts the durable key-value slots trees are
//! persisted to, allowing the application layer to be tested against an
//! in-memory implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::infrastructure::error::{InfraError, InfraResult};

/// Durable key-value slots for serialized tree snapshots.
///
/// Keys are fixed, distinct strings (one per tree instance), so the two
/// trees never collide.
pub trait SnapshotStore: Send + Sync {
    /// Read the payload stored under `key`, `None` if the slot is empty.
    fn load(&self, key: &str) -> InfraResult<Option<String>>;

    /// Replace the payload stored under `key` atomically.
    fn save(&self, key: &str, payload: &str) -> InfraResult<()>;
}

/// Snapshot store backed by one file per key in a single directory.
#[derive(Debug)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    #[instrument(level = "debug", skip(self))]
    fn load(&self, key: &str) -> InfraResult<Option<String>> {
        let path = self.slot_path(key);
        if !path.is_file() {
            debug!("no snapshot at {}", path.display());
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| InfraError::Io { path, source })
    }

    #[instrument(level = "debug", skip(self, payload))]
    fn save(&self, key: &str, payload: &str) -> InfraResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| InfraError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.slot_path(key);
        // Write to a temp file in the same directory, then rename over
        // the slot so readers never observe a partial snapshot.
        let tmp = NamedTempFile::new_in(&self.dir).map_err(|source| InfraError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(tmp.path(), payload).map_err(|source| InfraError::Io {
            path: tmp.path().to_path_buf(),
            source,
        })?;
        tmp.persist(&path)
            .map_err(|e| InfraError::Io {
                path,
                source: e.error,
            })
            .map(|_| ())
    }
}

/// In-memory snapshot store for tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing the application layer.
    pub fn seed(&self, key: &str, payload: &str) {
        self.slots
            .lock()
            .expect("snapshot store mutex poisoned")
            .insert(key.to_string(), payload.to_string());
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> InfraResult<Option<String>> {
        Ok(self
            .slots
            .lock()
            .expect("snapshot store mutex poisoned")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, payload: &str) -> InfraResult<()> {
        self.slots
            .lock()
            .expect("snapshot store mutex poisoned")
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Default snapshot directory for the current platform
/// (e.g. `~/.local/share/kintree` on Linux).
pub fn default_snapshot_dir() -> InfraResult<PathBuf> {
    directories::ProjectDirs::from("", "", "kintree")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(InfraError::NoDataDir)
}

/// Resolve the snapshot directory: explicit override wins, otherwise the
/// platform default.
pub fn resolve_snapshot_dir(override_dir: Option<&Path>) -> InfraResult<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default_snapshot_dir(),
    }
}
