//! Durable snapshot storage for the store.
//!
//! The store persists itself as one named record holding the complete
//! serialized state - written whole after every mutation, read once at
//! startup. Backends implement [`SnapshotStore`] so the transition rules
//! in [`StoreState`] stay testable with no storage dependency.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::StoreState;

/// Errors from snapshot backends.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The snapshot payload could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A durable home for the complete store snapshot.
pub trait SnapshotStore {
    /// Read the persisted snapshot; `None` if no snapshot exists yet.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if a snapshot exists but cannot be read
    /// or decoded. The store treats that the same as no prior state.
    fn load(&self) -> Result<Option<StoreState>, SnapshotError>;

    /// Replace the persisted snapshot with the given state.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the snapshot cannot be written.
    fn save(&self, state: &StoreState) -> Result<(), SnapshotError>;
}

/// Snapshot storage in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a backend reading and writing the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this backend reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<StoreState>, SnapshotError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, state: &StoreState) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename keeps a crash mid-write from truncating the
        // record.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process snapshot storage for tests and ephemeral sessions.
///
/// Clones share the same snapshot slot, so a test can keep a handle and
/// observe what the store saved. Single-threaded by design, matching the
/// store's execution model.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshot: Rc<RefCell<Option<StoreState>>>,
}

impl MemorySnapshotStore {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with an existing snapshot.
    #[must_use]
    pub fn with_snapshot(state: StoreState) -> Self {
        Self {
            snapshot: Rc::new(RefCell::new(Some(state))),
        }
    }

    /// The most recently saved snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<StoreState> {
        self.snapshot.borrow().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<StoreState>, SnapshotError> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, state: &StoreState) -> Result<(), SnapshotError> {
        *self.snapshot.borrow_mut() = Some(state.clone());
        Ok(())
    }
}
