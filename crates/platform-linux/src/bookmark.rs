//! Filesystem bookmarks.
//!
//! A bookmark records the canonical path of a directory together with its
//! device and inode numbers. Resolution fails when the path is gone and
//! reports staleness when a different directory now lives at that path.

use std::path::{Path, PathBuf};

use landon_platform_core::{BookmarkError, Bookmarker, ResolvedBookmark};
use serde::{Deserialize, Serialize};

const BOOKMARK_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct BookmarkRecord {
    version: u32,
    path: PathBuf,
    device: u64,
    inode: u64,
}

/// [`Bookmarker`] backed by plain filesystem metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBookmarker;

impl FsBookmarker {
    pub fn new() -> Self {
        Self
    }
}

impl Bookmarker for FsBookmarker {
    fn create_bookmark(&self, location: &Path) -> Result<Vec<u8>, BookmarkError> {
        let path = location
            .canonicalize()
            .map_err(|e| io_error(location, e))?;
        let metadata = std::fs::metadata(&path).map_err(|e| io_error(&path, e))?;
        if !metadata.is_dir() {
            return Err(BookmarkError::NotADirectory { path });
        }

        let (device, inode) = file_identity(&metadata);
        let record = BookmarkRecord {
            version: BOOKMARK_VERSION,
            path,
            device,
            inode,
        };
        serde_json::to_vec(&record).map_err(|e| BookmarkError::Malformed {
            message: e.to_string(),
        })
    }

    fn resolve_bookmark(&self, bookmark: &[u8]) -> Result<ResolvedBookmark, BookmarkError> {
        let record: BookmarkRecord =
            serde_json::from_slice(bookmark).map_err(|e| BookmarkError::Malformed {
                message: e.to_string(),
            })?;
        if record.version != BOOKMARK_VERSION {
            return Err(BookmarkError::Malformed {
                message: format!("unsupported bookmark version {}", record.version),
            });
        }

        let metadata = std::fs::metadata(&record.path).map_err(|e| io_error(&record.path, e))?;
        if !metadata.is_dir() {
            return Err(BookmarkError::NotADirectory { path: record.path });
        }

        let is_stale = file_identity(&metadata) != (record.device, record.inode);
        if is_stale {
            tracing::debug!(path = %record.path.display(), "Bookmarked directory was replaced");
        }

        Ok(ResolvedBookmark {
            path: record.path,
            is_stale,
        })
    }

    fn start_accessing(&self, location: &Path) -> bool {
        let granted = can_read_write(location);
        if !granted {
            tracing::debug!(path = %location.display(), "Directory access refused");
        }
        granted
    }

    fn stop_accessing(&self, _location: &Path) {
        // access(2) hands out no handle; nothing to release.
    }
}

fn io_error(path: &Path, source: std::io::Error) -> BookmarkError {
    if source.kind() == std::io::ErrorKind::NotFound {
        BookmarkError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        BookmarkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(unix)]
fn file_identity(metadata: &std::fs::Metadata) -> (u64, u64) {
    use std::os::unix::fs::MetadataExt;
    (metadata.dev(), metadata.ino())
}

#[cfg(not(unix))]
fn file_identity(_metadata: &std::fs::Metadata) -> (u64, u64) {
    (0, 0)
}

/// Whether the current process may list, read, and create entries in `path`.
#[cfg(unix)]
pub fn can_read_write(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK | libc::X_OK) == 0 }
}

#[cfg(not(unix))]
pub fn can_read_write(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}
