//! Session snapshots.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::anchor::{Anchor, AnchorKind};

/// Every anchor the tracking session knew about at one instant.
///
/// Snapshots are taken by value so the tracking session can keep advancing
/// while a capture is being encoded and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// When the snapshot was taken.
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,

    /// Anchors in tracking-session iteration order. Entries of any other
    /// anchor type are dropped on load.
    #[serde(default, deserialize_with = "known_anchors")]
    pub anchors: Vec<Anchor>,
}

impl SessionSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self {
            captured_at: Utc::now(),
            anchors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Anchor> {
        self.anchors.iter()
    }

    /// Number of anchors of the given kind.
    pub fn count_of(&self, kind: AnchorKind) -> usize {
        self.anchors.iter().filter(|a| a.kind() == kind).count()
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a snapshot saved as a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| SnapshotError::IoError {
            path: path.clone(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| SnapshotError::ParseError { path, source: e })
    }

    /// Save the snapshot as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref().to_path_buf();
        let json = serde_json::to_string_pretty(self).map_err(|e| SnapshotError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| SnapshotError::IoError { path, source: e })
    }
}

fn known_anchors<'de, D>(deserializer: D) -> Result<Vec<Anchor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .filter(|value| {
            value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .is_some_and(|tag| matches!(tag, "mesh" | "plane" | "face"))
        })
        .map(|value| serde_json::from_value(value).map_err(D::Error::custom))
        .collect()
}

impl<'a> IntoIterator for &'a SessionSnapshot {
    type Item = &'a Anchor;
    type IntoIter = std::slice::Iter<'a, Anchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.anchors.iter()
    }
}

/// Errors that can occur when loading or saving snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
