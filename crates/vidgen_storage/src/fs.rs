//! Filesystem-backed [`BlobStore`].
//!
//! The container is a directory named for the application and schema
//! version. Each record is a payload file `<id>.mp4` next to a metadata file
//! `<id>.json`. Files are written under a temporary name and renamed into
//! place, metadata last, so a record is only listed once it is complete.

use crate::{BlobStore, sort_newest_first};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use vidgen_core::{NewVideoRecord, RecordId, VideoDetails, VideoRecord};
use vidgen_error::{StorageError, StorageErrorKind, StorageResult};

/// Container name, shared by every schema version.
pub const CONTAINER_NAME: &str = "vidgen-history";
/// Current container schema version.
pub const CONTAINER_VERSION: u32 = 1;

const RECORDS_DIR: &str = "records";
const TOMBSTONE_DIR: &str = ".records.cleared";
const SEQUENCE_FILE: &str = "sequence";
const META_EXT: &str = "json";
const PAYLOAD_EXT: &str = "mp4";

/// Metadata file contents.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMeta {
    id: RecordId,
    #[serde(flatten)]
    details: VideoDetails,
}

/// Durable blob store rooted in a directory.
#[derive(Debug)]
pub struct FsBlobStore {
    container: PathBuf,
    /// Next id to assign. Holding the lock serializes every operation.
    next_id: Mutex<u64>,
}

impl FsBlobStore {
    /// Open (creating on first use) the history container under `data_dir`.
    ///
    /// Opening is idempotent: an existing container is reused and id
    /// assignment resumes after the highest id ever issued.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Unavailable`] when the container cannot be
    /// created or its sequence file is unreadable.
    #[instrument(skip(data_dir), fields(data_dir = %data_dir.as_ref().display()))]
    pub async fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let container = data_dir
            .as_ref()
            .join(format!("{}-v{}", CONTAINER_NAME, CONTAINER_VERSION));

        tokio::fs::create_dir_all(container.join(RECORDS_DIR))
            .await
            .map_err(|e| {
                error!(error = ?e, container = %container.display(), "Cannot create history container");
                StorageError::new(StorageErrorKind::Unavailable(format!(
                    "{}: {}",
                    container.display(),
                    e
                )))
            })?;

        if let Err(e) = remove_dir_if_present(&container.join(TOMBSTONE_DIR)).await {
            warn!(error = ?e, "Could not remove records left by an interrupted clear");
        }

        let stored_next = read_sequence(&container).await?;
        let scanned_next = highest_record_id(&container).await?.map_or(1, |id| id + 1);
        let next_id = stored_next.max(scanned_next);

        info!(container = %container.display(), next_id, "Opened history container");
        Ok(Self {
            container,
            next_id: Mutex::new(next_id),
        })
    }

    /// Directory holding this store's files.
    pub fn container(&self) -> &Path {
        &self.container
    }

    fn records_dir(&self) -> PathBuf {
        self.container.join(RECORDS_DIR)
    }

    fn meta_path(&self, id: RecordId) -> PathBuf {
        self.records_dir().join(format!("{}.{}", id, META_EXT))
    }

    fn payload_path(&self, id: RecordId) -> PathBuf {
        self.records_dir().join(format!("{}.{}", id, PAYLOAD_EXT))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, record), fields(bytes = record.payload().len()))]
    async fn put(&self, record: NewVideoRecord) -> StorageResult<RecordId> {
        let mut next_id = self.next_id.lock().await;
        let id = RecordId::from(*next_id);

        // Claim the id before any record file exists so it is never reissued.
        write_atomic(
            &self.container.join(SEQUENCE_FILE),
            (id.get() + 1).to_string().as_bytes(),
        )
        .await
        .map_err(write_error)?;
        *next_id = id.get() + 1;

        let record = record.into_record(id);
        let (id, details, payload) = record.into_parts();

        write_atomic(&self.payload_path(id), &payload)
            .await
            .map_err(write_error)?;

        let meta = serde_json::to_vec_pretty(&StoredMeta { id, details }).map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "Failed to encode metadata: {}",
                e
            )))
        })?;
        if let Err(e) = write_atomic(&self.meta_path(id), &meta).await {
            let _ = tokio::fs::remove_file(self.payload_path(id)).await;
            return Err(write_error(e));
        }

        debug!(record_id = %id, "Stored record");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> StorageResult<Vec<VideoRecord>> {
        let _guard = self.next_id.lock().await;

        let mut records = Vec::new();
        for meta_path in files_with_extension(&self.records_dir(), META_EXT)
            .await
            .map_err(read_error)?
        {
            let raw = tokio::fs::read(&meta_path).await.map_err(read_error)?;
            let meta: StoredMeta = serde_json::from_slice(&raw).map_err(|e| {
                error!(path = %meta_path.display(), error = ?e, "Corrupt record metadata");
                StorageError::new(StorageErrorKind::Read(format!(
                    "{}: {}",
                    meta_path.display(),
                    e
                )))
            })?;

            let payload = tokio::fs::read(self.payload_path(meta.id))
                .await
                .map_err(|e| {
                    error!(record_id = %meta.id, error = ?e, "Record payload missing");
                    StorageError::new(StorageErrorKind::Read(format!(
                        "payload of record {}: {}",
                        meta.id, e
                    )))
                })?;

            records.push(VideoRecord::new(meta.id, meta.details, payload));
        }

        sort_newest_first(&mut records);
        debug!(count = records.len(), "Listed records");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> StorageResult<()> {
        let _guard = self.next_id.lock().await;
        let records_dir = self.records_dir();
        let tombstone = self.container.join(TOMBSTONE_DIR);

        // A tombstone left by an interrupted clear holds nothing live.
        remove_dir_if_present(&tombstone)
            .await
            .map_err(write_error)?;

        // Every record leaves `records/` in the one rename.
        match tokio::fs::rename(&records_dir, &tombstone).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(write_error(e)),
        }
        if let Err(e) = tokio::fs::create_dir_all(&records_dir).await {
            if let Err(restore) = tokio::fs::rename(&tombstone, &records_dir).await {
                error!(error = ?restore, "Could not restore records after failed clear");
            }
            return Err(write_error(e));
        }

        if let Err(e) = remove_dir_if_present(&tombstone).await {
            warn!(error = ?e, tombstone = %tombstone.display(), "Cleared records not yet deleted");
        }

        info!("Cleared history container");
        Ok(())
    }
}

fn write_error(e: std::io::Error) -> StorageError {
    error!(error = ?e, "History write failed");
    StorageError::new(StorageErrorKind::Write(e.to_string()))
}

fn read_error(e: std::io::Error) -> StorageError {
    error!(error = ?e, "History read failed");
    StorageError::new(StorageErrorKind::Read(e.to_string()))
}

/// Write `bytes` to a hidden sibling file, then rename over `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    tokio::fs::rename(&tmp, path).await
}

async fn remove_dir_if_present(dir: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

async fn files_with_extension(dir: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !hidden && path.extension().is_some_and(|e| e == ext) {
            paths.push(path);
        }
    }
    Ok(paths)
}

async fn read_sequence(container: &Path) -> StorageResult<u64> {
    match tokio::fs::read_to_string(container.join(SEQUENCE_FILE)).await {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "Corrupt sequence file: {}",
                e
            )))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(1),
        Err(e) => Err(StorageError::new(StorageErrorKind::Unavailable(
            e.to_string(),
        ))),
    }
}

async fn highest_record_id(container: &Path) -> StorageResult<Option<u64>> {
    let metas = files_with_extension(&container.join(RECORDS_DIR), META_EXT)
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))?;

    Ok(metas
        .iter()
        .filter_map(|path| path.file_stem()?.to_str()?.parse::<u64>().ok())
        .max())
}
