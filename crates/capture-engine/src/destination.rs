//! Export destination resolution from a persisted bookmark.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use landon_common::{LandonError, LandonResult};
use landon_platform_core::{Bookmarker, ReferenceStore, ScopedAccess};

/// Resolves the user-selected export directory.
///
/// The selection is stored as opaque bookmark bytes and re-resolved on
/// every call to [`resolve`](Self::resolve). Any problem with the stored
/// bookmark reads as "no selection"; callers fall back to their default
/// directory and the user re-selects when they want to.
#[derive(Clone)]
pub struct DestinationResolver {
    store: Arc<dyn ReferenceStore>,
    bookmarker: Arc<dyn Bookmarker>,
}

impl DestinationResolver {
    pub fn new(store: Arc<dyn ReferenceStore>, bookmarker: Arc<dyn Bookmarker>) -> Self {
        Self { store, bookmarker }
    }

    pub fn bookmarker(&self) -> &dyn Bookmarker {
        self.bookmarker.as_ref()
    }

    /// The selected directory, or `None` if nothing usable is selected.
    ///
    /// A stale bookmark is not repaired here.
    pub fn resolve(&self) -> Option<PathBuf> {
        let bookmark = self.store.get()?;

        let resolved = match self.bookmarker.resolve_bookmark(&bookmark) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(error = %e, "Stored destination did not resolve");
                return None;
            }
        };

        if resolved.is_stale {
            tracing::debug!(
                path = %resolved.path.display(),
                "Stored destination is stale"
            );
            return None;
        }

        // Access must still be grantable; the guard is released right away.
        let access = ScopedAccess::acquire(self.bookmarker.as_ref(), &resolved.path);
        if access.is_none() {
            tracing::debug!(
                path = %resolved.path.display(),
                "Stored destination is no longer accessible"
            );
            return None;
        }

        Some(resolved.path)
    }

    /// Replace the stored destination with `location`.
    ///
    /// Scoped access to `location` is held while the bookmark is created.
    /// On any failure the previous selection is left untouched.
    pub fn select(&self, location: &Path) -> LandonResult<()> {
        let bookmark = {
            let _access = ScopedAccess::acquire(self.bookmarker.as_ref(), location)
                .ok_or_else(|| LandonError::scoped_access_denied(location))?;

            self.bookmarker.create_bookmark(location).map_err(|e| {
                LandonError::destination(format!(
                    "cannot create bookmark for {}: {e}",
                    location.display()
                ))
            })?
        };

        self.store.set(Some(bookmark))?;
        tracing::info!(path = %location.display(), "Export destination selected");
        Ok(())
    }

    /// Forget the stored destination.
    pub fn clear(&self) -> LandonResult<()> {
        self.store.set(None)?;
        tracing::info!("Export destination cleared");
        Ok(())
    }

    /// Whether a bookmark is stored, usable or not.
    pub fn has_selection(&self) -> bool {
        self.store.get().is_some()
    }
}

impl std::fmt::Debug for DestinationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationResolver")
            .field("has_selection", &self.has_selection())
            .finish_non_exhaustive()
    }
}
