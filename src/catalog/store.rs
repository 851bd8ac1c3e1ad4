//! Item Store Module
//!
//! Durable holders of the item collection. A store only knows how to read and
//! replace the whole collection; appends are read-modify-write on top of that.
//! Every successful replace notifies the registered mutation observers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::catalog::Item;
use crate::error::{CatalogError, Result};

/// Callback fired after the store content changes.
pub type MutationObserver = Arc<dyn Fn() + Send + Sync>;

// == Store Trait ==
/// Whole-collection access to the durable item list.
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Loads the current collection.
    fn read_all(&self) -> Result<Vec<Item>>;

    /// Persists `items` as the new collection, fully replacing the old one.
    fn replace_all(&self, items: &[Item]) -> Result<()>;

    /// Registers a callback fired after every successful `replace_all`.
    fn subscribe(&self, observer: MutationObserver);

    /// Appends one item. Not atomic across the read and the write; callers
    /// that need lost-update safety must serialize appends themselves.
    fn append(&self, item: Item) -> Result<()> {
        let mut items = self.read_all()?;
        items.push(item);
        self.replace_all(&items)
    }
}

// == Observer List ==
/// Registered mutation observers shared by the store implementations.
#[derive(Default)]
pub struct Observers {
    inner: RwLock<Vec<MutationObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: MutationObserver) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.push(observer);
    }

    /// Fires every observer. The list is cloned first so an observer may
    /// register further observers without deadlocking.
    pub fn notify(&self) {
        let observers: Vec<MutationObserver> = {
            let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
            guard.clone()
        };
        for observer in observers {
            observer();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers").field("count", &self.len()).finish()
    }
}

// == JSON File Store ==
/// Stores the collection as a pretty-printed JSON array in a single file.
///
/// Writes go to a sibling temp file which is synced and renamed over the
/// target, so readers see either the old or the new collection, never a mix.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    observers: Observers,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            observers: Observers::new(),
        }
    }

    /// Creates the backing file with an empty collection if it is missing.
    ///
    /// Does not notify observers.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        info!("Data file {} not found, creating empty collection", self.path.display());
        self.write_atomic(&[])
    }

    fn write_atomic(&self, items: &[Item]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CatalogError::StorageUnavailable(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let serialized = serde_json::to_vec_pretty(items).map_err(|e| {
            CatalogError::StorageUnavailable(format!("Failed to encode collection: {}", e))
        })?;

        let temp_path = self.path.with_extension("tmp");
        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            writer.write_all(&serialized)?;
            writer.flush()?;
            writer.get_mut().sync_all()?;
            fs::rename(&temp_path, &self.path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CatalogError::StorageUnavailable(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Store for JsonFileStore {
    fn read_all(&self) -> Result<Vec<Item>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::StorageUnavailable(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            CatalogError::Decode(format!("Invalid collection in {}: {}", self.path.display(), e))
        })
    }

    fn replace_all(&self, items: &[Item]) -> Result<()> {
        self.write_atomic(items)?;
        debug!("Persisted {} items to {}", items.len(), self.path.display());
        self.observers.notify();
        Ok(())
    }

    fn subscribe(&self, observer: MutationObserver) {
        self.observers.register(observer);
    }
}

// == Memory Store ==
/// In-process store, mainly for tests and embedding.
///
/// Counts reads so callers can check whether a path touched storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
    observers: Observers,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            observers: Observers::new(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `read_all` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn read_all(&self) -> Result<Vec<Item>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn replace_all(&self, items: &[Item]) -> Result<()> {
        {
            let mut guard = self.items.write().unwrap_or_else(|e| e.into_inner());
            *guard = items.to_vec();
        }
        self.observers.notify();
        Ok(())
    }

    fn subscribe(&self, observer: MutationObserver) {
        self.observers.register(observer);
    }
}
