//! Persisting encoded payloads to the export destination.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use landon_common::{LandonError, LandonResult};
use landon_platform_core::ScopedAccess;

use crate::destination::DestinationResolver;
use crate::format::ExportFormat;

/// Writes payloads as `{base}.{extension}` into the resolved destination,
/// or into the default directory when nothing usable is selected.
///
/// Files are written to a hidden temporary sibling first and renamed into
/// place, so a reader never sees a half-written export. An existing file
/// with the same name is replaced.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    resolver: Arc<DestinationResolver>,
    default_dir: PathBuf,
}

impl ExportWriter {
    /// Create a writer, creating `default_dir` if it does not exist.
    pub fn new(resolver: Arc<DestinationResolver>, default_dir: impl Into<PathBuf>) -> LandonResult<Self> {
        let default_dir = default_dir.into();
        fs::create_dir_all(&default_dir).map_err(|e| {
            LandonError::destination(format!(
                "cannot create default export directory {}: {e}",
                default_dir.display()
            ))
        })?;

        Ok(Self {
            resolver,
            default_dir,
        })
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    pub fn resolver(&self) -> &DestinationResolver {
        &self.resolver
    }

    pub fn file_name(base: &str, format: ExportFormat) -> String {
        format!("{base}.{}", format.extension())
    }

    /// Resolve the directory writes should land in right now.
    pub fn resolve_target(&self) -> ExportTarget {
        match self.resolver.resolve() {
            Some(dir) => ExportTarget::Selected(dir),
            None => ExportTarget::Default(self.default_dir.clone()),
        }
    }

    /// Write `bytes` into `target`, returning the final path.
    ///
    /// A selected destination is written under scoped access.
    pub fn write(
        &self,
        target: &ExportTarget,
        bytes: &[u8],
        base: &str,
        format: ExportFormat,
    ) -> LandonResult<PathBuf> {
        let name = Self::file_name(base, format);
        let _span = tracing::debug_span!("write_export", file = %name, bytes = bytes.len()).entered();

        match target {
            ExportTarget::Selected(dir) => {
                let _access = ScopedAccess::acquire(self.resolver.bookmarker(), dir)
                    .ok_or_else(|| LandonError::scoped_access_denied(dir))?;
                write_atomic(dir, &name, bytes)
            }
            ExportTarget::Default(dir) => write_atomic(dir, &name, bytes),
        }
    }
}

/// Directory a capture run writes into, fixed when the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// The user-selected destination.
    Selected(PathBuf),
    /// The application's default exports directory.
    Default(PathBuf),
}

impl ExportTarget {
    pub fn dir(&self) -> &Path {
        match self {
            ExportTarget::Selected(dir) | ExportTarget::Default(dir) => dir,
        }
    }
}

fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> LandonResult<PathBuf> {
    let target = dir.join(name);
    let partial = dir.join(format!(".{name}.partial"));

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&partial)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&partial, &target)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(target)
}
