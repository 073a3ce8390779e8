//! # Persistence Seam
//!
//! A [`RecordActor`](crate::RecordActor) keeps its records in memory and writes every committed
//! change through a [`RecordStore`]. The store only needs three operations: load everything at
//! startup, upsert one record and remove one record. Lookups and listings are answered from the
//! actor's hydrated map, so a store never has to support queries.
//!
//! Two implementations ship with the crate:
//!
//! | Store | Durability | Typical use |
//! |-------|------------|-------------|
//! | [`MemoryStore`] | process lifetime | tests, demos, "restart" tests sharing one store |
//! | [`JsonFileStore`] | JSON array on disk | single-operator deployments |

use crate::entity::Record;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode records: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Write-through persistence for one record type.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Every persisted record, in any order. Called once when the actor hydrates.
    async fn load_all(&self) -> Result<Vec<T>, StoreError>;

    async fn upsert(&self, record: &T) -> Result<(), StoreError>;

    /// Removing an id that is not stored is not an error.
    async fn remove(&self, id: &T::Id) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process store. Clones share the same map, which lets a test hand one store to two
/// successive actors and observe hydration.
pub struct MemoryStore<T: Record> {
    records: Arc<Mutex<BTreeMap<T::Id, T>>>,
}

impl<T: Record> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Pre-populated store, as if a previous run had written `records`.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            records: Arc::new(Mutex::new(map)),
        }
    }

    /// Current contents in id order.
    pub fn snapshot(&self) -> Vec<T> {
        match self.records.lock() {
            Ok(map) => map.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let map = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }

    async fn upsert(&self, record: &T) -> Result<(), StoreError> {
        let mut map = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(record.id(), record.clone());
        Ok(())
    }

    async fn remove(&self, id: &T::Id) -> Result<(), StoreError> {
        let mut map = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        map.remove(id);
        Ok(())
    }
}

// =============================================================================
// JSON FILE
// =============================================================================

/// Keeps all records of one type in a single pretty-printed JSON array.
///
/// Every write rewrites the whole file through a sibling `*.tmp` file followed by a rename, so a
/// crash mid-write leaves the previous version intact. A missing file reads as an empty store; a
/// file that does not decode is reported instead of being silently reset.
pub struct JsonFileStore<T: Record> {
    path: PathBuf,
    cache: tokio::sync::Mutex<BTreeMap<T::Id, T>>,
}

impl<T: Record> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: tokio::sync::Mutex::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl<T> JsonFileStore<T>
where
    T: Record + Serialize,
{
    async fn write_file(&self, records: &BTreeMap<T::Id, T>) -> Result<(), StoreError> {
        let rows: Vec<&T> = records.values().collect();
        let bytes = serde_json::to_vec_pretty(&rows).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::io_error(parent))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(Self::io_error(&tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(Self::io_error(&self.path))?;
        debug!(path = %self.path.display(), records = rows.len(), "Store written");
        Ok(())
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let records: Vec<T> = match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(Self::io_error(&self.path)(e)),
        };

        let mut cache = self.cache.lock().await;
        *cache = records.iter().map(|r| (r.id(), r.clone())).collect();
        Ok(records)
    }

    async fn upsert(&self, record: &T) -> Result<(), StoreError> {
        let mut cache = self.cache.lock().await;
        let mut next = cache.clone();
        next.insert(record.id(), record.clone());
        self.write_file(&next).await?;
        *cache = next;
        Ok(())
    }

    async fn remove(&self, id: &T::Id) -> Result<(), StoreError> {
        let mut cache = self.cache.lock().await;
        if !cache.contains_key(id) {
            return Ok(());
        }
        let mut next = cache.clone();
        next.remove(id);
        self.write_file(&next).await?;
        *cache = next;
        Ok(())
    }
}
