//! Persisted user preferences.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use landon_platform_core::ReferenceStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    /// Bookmark of the user-selected export directory.
    #[serde(default)]
    export_directory: Option<Vec<u8>>,
}

/// [`ReferenceStore`] persisted as a JSON file so the selected destination
/// survives restarts.
#[derive(Debug)]
pub struct FileReferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileReferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse preferences at {:?}: {}", self.path, e);
                Preferences::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read preferences at {:?}: {}", self.path, e);
                Preferences::default()
            }
        }
    }
}

impl ReferenceStore for FileReferenceStore {
    fn get(&self) -> Option<Vec<u8>> {
        self.read().export_directory
    }

    fn set(&self, value: Option<Vec<u8>>) -> std::io::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| std::io::Error::other("preferences lock poisoned"))?;

        let mut preferences = self.read();
        preferences.export_directory = value;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&preferences).map_err(std::io::Error::other)?;
        replace_file(&self.path, json.as_bytes())
    }
}

/// Write `bytes` to a hidden sibling, then rename it over `path`. The old
/// contents stay intact if any step fails.
fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("preferences path has no file name"))?;
    let mut partial_name = std::ffi::OsString::from(".");
    partial_name.push(file_name);
    partial_name.push(".partial");
    let partial = path.with_file_name(partial_name);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&partial)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        std::fs::rename(&partial, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&partial);
    }
    result
}
