//! Supported export formats and the active-format selection.

use std::str::FromStr;
use std::sync::RwLock;

use landon_common::error::LandonError;
use serde::{Deserialize, Serialize};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Compressed binary geometry.
    #[serde(rename = "drc")]
    Draco,
    /// Plain-text Wavefront mesh.
    #[serde(rename = "obj")]
    Obj,
}

impl ExportFormat {
    /// Every supported format, in rotation order.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Draco, ExportFormat::Obj];

    /// Canonical filename extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Draco => "drc",
            ExportFormat::Obj => "obj",
        }
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Draco => "Draco",
            ExportFormat::Obj => "OBJ",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = LandonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == lower || f.label().to_ascii_lowercase() == lower)
            .ok_or_else(|| {
                LandonError::unsupported(format!("Unknown format: {s}. Use: drc, obj"))
            })
    }
}

/// Called with the new active format after every change.
pub type FormatObserver = Box<dyn Fn(ExportFormat) + Send + Sync>;

/// The ordered set of formats plus the currently active one.
///
/// Starts at the first format. Selection is shared between the caller's
/// thread (user actions) and the capture worker (reads at the start of each
/// capture), so both the index and the observer list sit behind locks.
pub struct FormatRegistry {
    formats: Vec<ExportFormat>,
    active: RwLock<usize>,
    observers: RwLock<Vec<FormatObserver>>,
}

impl FormatRegistry {
    /// Registry over every supported format.
    pub fn new() -> Self {
        Self {
            formats: ExportFormat::ALL.to_vec(),
            active: RwLock::new(0),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Registry over a custom ordering. Fails on an empty list.
    pub fn with_formats(formats: Vec<ExportFormat>) -> Result<Self, LandonError> {
        if formats.is_empty() {
            return Err(LandonError::config("format registry needs at least one format"));
        }
        Ok(Self {
            formats,
            active: RwLock::new(0),
            observers: RwLock::new(Vec::new()),
        })
    }

    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    pub fn active(&self) -> ExportFormat {
        let index = *self.active.read().unwrap_or_else(|e| e.into_inner());
        self.formats[index]
    }

    /// Advance to the next format, wrapping around, and notify observers.
    pub fn rotate(&self) -> ExportFormat {
        let format = {
            let mut index = self.active.write().unwrap_or_else(|e| e.into_inner());
            *index = (*index + 1) % self.formats.len();
            self.formats[*index]
        };
        tracing::debug!(%format, "Export format rotated");
        self.notify(format);
        format
    }

    /// Make `format` active. Returns false if the registry doesn't offer it.
    pub fn activate(&self, format: ExportFormat) -> bool {
        let Some(position) = self.formats.iter().position(|f| *f == format) else {
            return false;
        };
        {
            let mut index = self.active.write().unwrap_or_else(|e| e.into_inner());
            if *index == position {
                return true;
            }
            *index = position;
        }
        self.notify(format);
        true
    }

    /// Register a callback fired whenever the active format changes.
    pub fn observe(&self, observer: impl Fn(ExportFormat) + Send + Sync + 'static) {
        self.observers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(observer));
    }

    fn notify(&self, format: ExportFormat) {
        for observer in self.observers.read().unwrap_or_else(|e| e.into_inner()).iter() {
            observer(format);
        }
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats)
            .field("active", &self.active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_starts_at_first_format() {
        assert_eq!(FormatRegistry::new().active(), ExportFormat::Draco);
    }

    #[test]
    fn test_rotation_wraps_around() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.rotate(), ExportFormat::Obj);
        assert_eq!(registry.rotate(), ExportFormat::Draco);
    }

    #[test]
    fn test_observers_see_every_change() {
        let registry = FormatRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        registry.observe(move |f| sink.lock().unwrap().push(f));

        registry.rotate();
        registry.activate(ExportFormat::Obj);
        registry.activate(ExportFormat::Draco);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ExportFormat::Obj, ExportFormat::Draco]
        );
    }

    #[test]
    fn test_activate_unknown_format() {
        let registry = FormatRegistry::with_formats(vec![ExportFormat::Obj]).unwrap();
        assert!(!registry.activate(ExportFormat::Draco));
        assert_eq!(registry.active(), ExportFormat::Obj);
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        assert!(FormatRegistry::with_formats(vec![]).is_err());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("drc".parse::<ExportFormat>().unwrap(), ExportFormat::Draco);
        assert_eq!("OBJ".parse::<ExportFormat>().unwrap(), ExportFormat::Obj);
        assert_eq!("draco".parse::<ExportFormat>().unwrap(), ExportFormat::Draco);
        assert!("ply".parse::<ExportFormat>().is_err());
    }

    proptest! {
        #[test]
        fn prop_rotating_len_times_visits_each_format_once(start in 0usize..2) {
            let registry = FormatRegistry::new();
            for _ in 0..start {
                registry.rotate();
            }
            let original = registry.active();

            let mut visited = Vec::new();
            for _ in 0..registry.formats().len() {
                visited.push(registry.rotate());
            }

            prop_assert_eq!(registry.active(), original);
            let mut sorted = visited.clone();
            sorted.sort_by_key(|f| f.extension());
            sorted.dedup();
            prop_assert_eq!(sorted.len(), registry.formats().len());
        }
    }
}
