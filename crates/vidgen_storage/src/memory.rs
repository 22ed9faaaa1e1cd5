//! In-memory implementation of [`BlobStore`].
//!
//! Records live in a map behind an `RwLock` and vanish when the store is
//! dropped. Useful for tests and for sessions that need no durability.

use crate::{BlobStore, sort_newest_first};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use vidgen_core::{NewVideoRecord, RecordId, VideoRecord};
use vidgen_error::StorageResult;

/// In-memory blob store.
///
/// # Example
/// ```
/// use vidgen_storage::{BlobStore, InMemoryBlobStore};
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryBlobStore::new();
///     assert!(store.list_all().await.unwrap().is_empty());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryBlobStore {
    /// Stored records, keyed by id
    records: Arc<RwLock<HashMap<RecordId, VideoRecord>>>,
    /// Next id to assign; never reset, so ids are not reused after a clear
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    #[instrument(skip(self, record), fields(bytes = record.payload().len()))]
    async fn put(&self, record: NewVideoRecord) -> StorageResult<RecordId> {
        let mut next_id = self.next_id.write().await;
        let id = RecordId::from(*next_id);
        *next_id += 1;

        self.records
            .write()
            .await
            .insert(id, record.into_record(id));
        debug!(record_id = %id, "Stored record in memory");
        Ok(id)
    }

    async fn list_all(&self) -> StorageResult<Vec<VideoRecord>> {
        let mut records: Vec<VideoRecord> = self.records.read().await.values().cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> StorageResult<()> {
        self.records.write().await.clear();
        debug!("Cleared in-memory records");
        Ok(())
    }
}
