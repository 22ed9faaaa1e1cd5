//! Saving a video to disk.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use vidgen_core::video_filename;
use vidgen_error::{StorageError, StorageErrorKind, StorageResult};

/// Write `payload` into `dir` as `<slug of prompt>.mp4` and return the path.
///
/// An existing file of the same name is overwritten.
#[instrument(skip(payload, prompt), fields(bytes = payload.len(), dir = %dir.display()))]
pub async fn export_video(payload: &[u8], prompt: &str, dir: &Path) -> StorageResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        StorageError::new(StorageErrorKind::Write(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        )))
    })?;

    let path = dir.join(video_filename(prompt));
    tokio::fs::write(&path, payload).await.map_err(|e| {
        StorageError::new(StorageErrorKind::Write(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )))
    })?;

    info!(path = %path.display(), "Exported video");
    Ok(path)
}
