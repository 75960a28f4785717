//! Error types shared across Landon crates.

use std::path::PathBuf;

/// Top-level error type for Landon operations.
#[derive(Debug, thiserror::Error)]
pub enum LandonError {
    #[error("Destination error: {message}")]
    Destination { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Scoped access denied: {path}")]
    ScopedAccessDenied { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using LandonError.
pub type LandonResult<T> = Result<T, LandonError>;

impl LandonError {
    pub fn destination(msg: impl Into<String>) -> Self {
        Self::Destination {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn scoped_access_denied(path: impl Into<PathBuf>) -> Self {
        Self::ScopedAccessDenied { path: path.into() }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_part() {
        assert_eq!(
            LandonError::destination("no bookmark").to_string(),
            "Destination error: no bookmark"
        );
        assert_eq!(
            LandonError::scoped_access_denied("/mnt/scans").to_string(),
            "Scoped access denied: /mnt/scans"
        );
    }

    #[test]
    fn test_io_errors_convert() {
        let err: LandonError = std::io::Error::other("disk full").into();
        assert!(matches!(err, LandonError::Io(_)));
        assert_eq!(err.to_string(), "disk full");
    }
}
