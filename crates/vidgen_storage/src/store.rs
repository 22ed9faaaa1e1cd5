//! The blob store contract.

use async_trait::async_trait;
use vidgen_core::{NewVideoRecord, RecordId, VideoRecord};
use vidgen_error::StorageResult;

/// Durable key-value persistence for generated videos.
///
/// History is append-only: records are created, listed, or cleared all at
/// once. There is no update and no single delete. Each operation is atomic
/// with respect to the others on the same store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist a record and return its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Write`](vidgen_error::StorageErrorKind::Write)
    /// when the record cannot be written.
    async fn put(&self, record: NewVideoRecord) -> StorageResult<RecordId>;

    /// All records, newest first.
    ///
    /// An empty store yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Read`](vidgen_error::StorageErrorKind::Read)
    /// when stored records are unreadable.
    async fn list_all(&self) -> StorageResult<Vec<VideoRecord>>;

    /// Delete every record. Clearing an empty store succeeds.
    async fn clear(&self) -> StorageResult<()>;
}

/// Order records by timestamp descending, newest id first on ties.
pub fn sort_newest_first(records: &mut [VideoRecord]) {
    records.sort_by(|a, b| {
        b.details()
            .timestamp()
            .cmp(a.details().timestamp())
            .then_with(|| b.id().cmp(a.id()))
    });
}
