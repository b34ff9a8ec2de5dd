//! Durable blobs for world and player snapshots.
//!
//! A [`Storage`] holds exactly one blob and overwrites it wholesale on
//! every save. There is no log and no versioning: the latest snapshot is
//! the whole truth.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ProtocolError;

/// A single overwrite-in-place blob.
pub trait Storage: Send + 'static {
    /// Reads the blob. `Ok(None)` means nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<u8>>, ProtocolError>;

    /// Replaces the blob.
    fn save(&mut self, bytes: &[u8]) -> Result<(), ProtocolError>;

    /// Where the blob lives, for log lines.
    fn location(&self) -> String;
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// Stores the blob in a file.
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the target the snapshot is staged in before the rename.
    fn tmp_path(&self) -> io::Result<PathBuf> {
        let Some(file_name) = self.path.file_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' does not name a file", self.path.display()),
            ));
        };
        let mut name = file_name.to_os_string();
        name.push(".tmp");
        Ok(self.path.with_file_name(name))
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, ProtocolError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let tmp = self.tmp_path()?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), len = bytes.len(), "snapshot written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryInner {
    blob: Option<Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

/// Keeps the blob in memory. Clones share the same blob, so a test can
/// hand one clone to a store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `bytes` already saved.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        storage.lock().blob = Some(bytes.into());
        storage
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The current blob, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock().blob.clone()
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    /// Makes every following `save` fail until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, ProtocolError> {
        Ok(self.lock().blob.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(io::Error::other("memory storage is read-only").into());
        }
        inner.blob = Some(bytes.to_vec());
        inner.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
