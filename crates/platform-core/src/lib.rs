//! Landon platform core contracts.
//!
//! Export destinations chosen by the user are persisted as opaque bookmark
//! bytes and re-resolved on every capture. This crate holds the contracts
//! for creating/resolving bookmarks, for bracketing use of a user-granted
//! location with scoped access, and for persisting the bookmark itself,
//! without coupling to a concrete OS backend.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A bookmark re-resolved into a filesystem location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBookmark {
    /// The directory the bookmark currently points at.
    pub path: PathBuf,
    /// The location changed since the bookmark was created. A stale
    /// bookmark must be re-created before it can be trusted.
    pub is_stale: bool,
}

/// Errors from bookmark creation and resolution.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("location does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("location is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("malformed bookmark data: {message}")]
    Malformed { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Platform facility for durable, possibly security-scoped, location references.
pub trait Bookmarker: Send + Sync {
    /// Convert a location into opaque bookmark bytes.
    fn create_bookmark(&self, location: &Path) -> Result<Vec<u8>, BookmarkError>;

    /// Re-derive a location from bookmark bytes.
    fn resolve_bookmark(&self, bookmark: &[u8]) -> Result<ResolvedBookmark, BookmarkError>;

    /// Begin using a user-granted location. Returns false if access is refused.
    fn start_accessing(&self, location: &Path) -> bool;

    /// Stop using a location previously granted by `start_accessing`.
    fn stop_accessing(&self, location: &Path);
}

/// Scoped access to a location, released when dropped.
pub struct ScopedAccess<'a> {
    bookmarker: &'a dyn Bookmarker,
    path: PathBuf,
}

impl<'a> ScopedAccess<'a> {
    /// Start accessing `path`. Returns `None` if access was refused, in which
    /// case nothing needs releasing.
    pub fn acquire(bookmarker: &'a dyn Bookmarker, path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if bookmarker.start_accessing(&path) {
            tracing::trace!(path = %path.display(), "Scoped access acquired");
            Some(Self { bookmarker, path })
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedAccess<'_> {
    fn drop(&mut self) {
        self.bookmarker.stop_accessing(&self.path);
        tracing::trace!(path = %self.path.display(), "Scoped access released");
    }
}

/// Persistent storage for the export destination bookmark.
pub trait ReferenceStore: Send + Sync {
    fn get(&self) -> Option<Vec<u8>>;

    fn set(&self, value: Option<Vec<u8>>) -> std::io::Result<()>;
}

/// In-process reference store. Does not survive restarts.
#[derive(Debug, Default)]
pub struct MemoryReferenceStore {
    value: RwLock<Option<Vec<u8>>>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn get(&self) -> Option<Vec<u8>> {
        self.value.read().ok().and_then(|v| v.clone())
    }

    fn set(&self, value: Option<Vec<u8>>) -> std::io::Result<()> {
        let mut guard = self
            .value
            .write()
            .map_err(|_| std::io::Error::other("reference store lock poisoned"))?;
        *guard = value;
        Ok(())
    }
}
