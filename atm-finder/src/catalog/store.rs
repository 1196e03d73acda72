//! Persisted catalog storage.
//!
//! A store maps a network to its whole catalog. There is no partial
//! update: every write replaces the network's catalog in full.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};

use crate::domain::{Catalog, Network};

use super::error::StoreError;

/// A catalog as read back from a store.
#[derive(Debug, Clone)]
pub struct StoredCatalog {
    pub catalog: Catalog,
    /// When the catalog was last written.
    pub modified_at: DateTime<Local>,
}

/// Keyed read-all/write-all persistence for catalogs.
pub trait CatalogStore: Send + Sync {
    /// Read the catalog for `network`, or `None` if none was ever written.
    ///
    /// An unreadable or corrupt entry is an error, never `None`.
    fn read(&self, network: &Network) -> Result<Option<StoredCatalog>, StoreError>;

    /// Replace the catalog for `catalog.network()`.
    fn write(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

/// One JSON document per network inside a directory.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    dir: PathBuf,
}

impl FileCatalogStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the document holding `network`'s catalog.
    pub fn path_for(&self, network: &Network) -> PathBuf {
        self.dir.join(format!("{}.json", network.as_str()))
    }
}

impl CatalogStore for FileCatalogStore {
    fn read(&self, network: &Network) -> Result<Option<StoredCatalog>, StoreError> {
        let path = self.path_for(network);
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(e)),
        };

        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(io_err)?;

        let catalog: Catalog = serde_json::from_str(&contents).map_err(|source| {
            StoreError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;

        if catalog.network() != network {
            return Err(StoreError::Mismatch {
                path,
                expected: network.clone(),
                found: catalog.network().clone(),
            });
        }

        Ok(Some(StoredCatalog {
            catalog,
            modified_at: DateTime::<Local>::from(modified),
        }))
    }

    fn write(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let path = self.path_for(catalog.network());
        let tmp = path.with_extension("json.tmp");

        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(catalog).map_err(StoreError::Serialize)?;

        // Write beside the target then rename, so readers never see half a file
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(StoreError::Io { path, source });
        }

        Ok(())
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    entries: Mutex<HashMap<Network, StoredCatalog>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog with an explicit modification time.
    pub fn insert(&self, catalog: Catalog, modified_at: DateTime<Local>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            catalog.network().clone(),
            StoredCatalog {
                catalog,
                modified_at,
            },
        );
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn read(&self, network: &Network) -> Result<Option<StoredCatalog>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(network).cloned())
    }

    fn write(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.insert(catalog.clone(), Local::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station, UsageCounters};
    use tempfile::tempdir;

    fn catalog(network: &str, banks: &[&str]) -> Catalog {
        let network = Network::parse(network).unwrap();
        let stations = banks
            .iter()
            .map(|bank| Station {
                bank: (*bank).to_string(),
                street: "Florida".to_string(),
                street_number: "100".to_string(),
                location: Coordinate::new(-34.6037, -58.3816).unwrap(),
                terminal_count: 1,
                network: network.clone(),
                locality: "CABA".to_string(),
                counters: UsageCounters::default(),
            })
            .collect();
        Catalog::new(network, "CABA", stations).unwrap()
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let link = catalog("LINK", &["Ciudad", "Galicia"]);

        store.write(&link).unwrap();

        let stored = store.read(link.network()).unwrap().unwrap();
        assert_eq!(stored.catalog, link);
        assert!(stored.modified_at <= Local::now());
    }

    #[test]
    fn file_missing_network_is_none() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let banelco = Network::parse("BANELCO").unwrap();
        assert!(store.read(&banelco).unwrap().is_none());
    }

    #[test]
    fn file_networks_are_independent() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        store.write(&catalog("LINK", &["Ciudad"])).unwrap();
        store.write(&catalog("BANELCO", &["Galicia", "Santander"])).unwrap();

        let link = store.read(&Network::parse("LINK").unwrap()).unwrap().unwrap();
        let banelco = store.read(&Network::parse("BANELCO").unwrap()).unwrap().unwrap();
        assert_eq!(link.catalog.len(), 1);
        assert_eq!(banelco.catalog.len(), 2);
    }

    #[test]
    fn file_write_replaces_whole_catalog() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        store.write(&catalog("LINK", &["Ciudad", "Galicia"])).unwrap();
        store.write(&catalog("LINK", &["Patagonia"])).unwrap();

        let stored = store.read(&Network::parse("LINK").unwrap()).unwrap().unwrap();
        assert_eq!(stored.catalog.len(), 1);
        assert_eq!(stored.catalog.stations()[0].bank, "Patagonia");
        assert!(!dir.path().join("LINK.json.tmp").exists());
    }

    #[test]
    fn file_corrupt_is_error_not_empty() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let link = Network::parse("LINK").unwrap();
        std::fs::write(store.path_for(&link), "{ not json").unwrap();

        assert!(matches!(store.read(&link), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn file_holding_other_network_is_rejected() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let link = Network::parse("LINK").unwrap();
        let banelco = Network::parse("BANELCO").unwrap();

        store.write(&catalog("BANELCO", &["Galicia"])).unwrap();
        std::fs::copy(store.path_for(&banelco), store.path_for(&link)).unwrap();

        let err = store.read(&link).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Mismatch { ref expected, ref found, .. }
                if *expected == link && *found == banelco
        ));
    }

    #[test]
    fn file_with_foreign_station_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let link = Network::parse("LINK").unwrap();

        store.write(&catalog("LINK", &["Ciudad"])).unwrap();
        let path = store.path_for(&link);
        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc["stations"][0]["locality"] = "Rosario".into();
        std::fs::write(&path, doc.to_string()).unwrap();

        assert!(matches!(store.read(&link), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());
        let link = catalog("LINK", &["Ciudad"]);

        // A non-empty directory where the document should go
        let target = store.path_for(link.network());
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("occupied"), "x").unwrap();

        assert!(matches!(store.write(&link), Err(StoreError::Io { .. })));
        assert!(!dir.path().join("LINK.json.tmp").exists());
    }

    #[test]
    fn file_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("catalogs");
        let store = FileCatalogStore::new(&nested);

        store.write(&catalog("LINK", &["Ciudad"])).unwrap();
        assert!(nested.join("LINK.json").exists());
    }

    #[test]
    fn memory_write_and_read() {
        let store = MemoryCatalogStore::new();
        let link = catalog("LINK", &["Ciudad"]);
        assert!(store.read(link.network()).unwrap().is_none());

        store.write(&link).unwrap();
        assert_eq!(store.read(link.network()).unwrap().unwrap().catalog, link);
    }

    #[test]
    fn memory_insert_keeps_timestamp() {
        use chrono::TimeZone;

        let store = MemoryCatalogStore::new();
        let when = Local.with_ymd_and_hms(2026, 3, 2, 7, 30, 0).unwrap();
        let link = catalog("LINK", &["Ciudad"]);
        store.insert(link.clone(), when);

        assert_eq!(store.read(link.network()).unwrap().unwrap().modified_at, when);
    }
}
