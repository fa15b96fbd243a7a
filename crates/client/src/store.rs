//! Local customization store.
//!
//! Client-owned, durable storage of per-line customizations. Every
//! mutating call persists synchronously; persistence failures are swallowed
//! and the operation behaves as a no-op, since losing a cosmetic price
//! customization must never block ordering. Malformed stored data reads as
//! absent.

use std::collections::HashMap;
use std::fs;
use std::sync::RwLock;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;

use mensa_primitives::{Customization, LineId};

/// Client-owned customization state, atomic at call granularity. Injected
/// into the engine and shared across every view.
pub trait CustomizationStore: Send + Sync {
    /// Upsert. A prior entry for the same line id is superseded wholesale;
    /// add-on sets are never merged.
    fn save(&self, entry: Customization);

    /// Pure lookup; never fails. Malformed or missing data is `None`.
    fn get(&self, line_id: LineId) -> Option<Customization>;

    /// Idempotent delete.
    fn remove(&self, line_id: LineId);

    /// Bulk delete of every entry this store owns.
    fn clear_all(&self);

    /// Snapshot of every entry, keyed by line id.
    fn get_all(&self) -> HashMap<LineId, Customization>;
}

impl<T: CustomizationStore + ?Sized> CustomizationStore for std::sync::Arc<T> {
    fn save(&self, entry: Customization) {
        (**self).save(entry);
    }

    fn get(&self, line_id: LineId) -> Option<Customization> {
        (**self).get(line_id)
    }

    fn remove(&self, line_id: LineId) {
        (**self).remove(line_id);
    }

    fn clear_all(&self) {
        (**self).clear_all();
    }

    fn get_all(&self) -> HashMap<LineId, Customization> {
        (**self).get_all()
    }
}

/// In-memory implementation for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryCustomizationStore {
    entries: RwLock<HashMap<LineId, Customization>>,
}

impl MemoryCustomizationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomizationStore for MemoryCustomizationStore {
    fn save(&self, entry: Customization) {
        if let Ok(mut entries) = self.entries.write() {
            let _ = entries.insert(entry.line_id, entry);
        }
    }

    fn get(&self, line_id: LineId) -> Option<Customization> {
        self.entries.read().ok()?.get(&line_id).cloned()
    }

    fn remove(&self, line_id: LineId) {
        if let Ok(mut entries) = self.entries.write() {
            let _ = entries.remove(&line_id);
        }
    }

    fn clear_all(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    fn get_all(&self) -> HashMap<LineId, Customization> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

/// File-backed implementation: one JSON document holding the whole map,
/// rewritten on every mutation.
#[derive(Debug)]
pub struct FileCustomizationStore {
    path: Utf8PathBuf,
    entries: RwLock<HashMap<LineId, Customization>>,
}

impl FileCustomizationStore {
    /// Open the store at `path`, loading whatever valid entries exist
    /// there. A missing or corrupt file starts the store empty.
    #[must_use]
    pub fn open(path: impl AsRef<Utf8Path>) -> Self {
        let path = path.as_ref().to_owned();
        let entries = Self::load(&path);
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn load(path: &Utf8Path) -> HashMap<LineId, Customization> {
        let Ok(contents) = fs::read_to_string(path) else {
            return HashMap::new();
        };

        match serde_json::from_str::<Vec<Customization>>(&contents) {
            Ok(entries) => entries.into_iter().map(|c| (c.line_id, c)).collect(),
            Err(err) => {
                warn!(%path, %err, "discarding malformed customization data");
                HashMap::new()
            }
        }
    }

    /// Write the current map out. Failures are logged and swallowed; the
    /// in-memory view stays ahead of the file until the next successful
    /// persist.
    fn persist(&self, entries: &HashMap<LineId, Customization>) {
        let mut values: Vec<&Customization> = entries.values().collect();
        values.sort_by_key(|c| c.line_id);

        let contents = match serde_json::to_string_pretty(&values) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(%err, "failed to serialize customizations");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %self.path, %err, "failed to create customization dir");
                return;
            }
        }

        if let Err(err) = fs::write(&self.path, contents) {
            warn!(path = %self.path, %err, "failed to persist customizations");
        }
    }
}

impl CustomizationStore for FileCustomizationStore {
    fn save(&self, entry: Customization) {
        if let Ok(mut entries) = self.entries.write() {
            let _ = entries.insert(entry.line_id, entry);
            self.persist(&entries);
        }
    }

    fn get(&self, line_id: LineId) -> Option<Customization> {
        self.entries.read().ok()?.get(&line_id).cloned()
    }

    fn remove(&self, line_id: LineId) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.remove(&line_id).is_some() {
                self.persist(&entries);
            }
        }
    }

    fn clear_all(&self) {
        if let Ok(mut entries) = self.entries.write() {
            if !entries.is_empty() {
                entries.clear();
                self.persist(&entries);
            }
        }
    }

    fn get_all(&self) -> HashMap<LineId, Customization> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}
