//! Test doubles for session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use vidgen::{
    AspectRatio, BlobStore, GenerationPipeline, InMemoryBlobStore, PipelineState, PollPolicy,
    RemoteFailure, SessionController, StorageError, StorageErrorKind, StorageResult,
    SubmissionRequest, VideoGenerationApi,
};
use vidgen_core::{NewVideoRecord, RecordId, VideoDetails, VideoRecord};
use vidgen_error::{GenerationError, GenerationResult};
use vidgen_models::{GenerationJob, JobHandle, RemoteSubmission};

pub const VIDEO_URI: &str = "https://files.example/video.mp4?alt=media";
pub const VIDEO_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42-session-video";

pub fn fast_policy() -> PollPolicy {
    PollPolicy::unbounded(Duration::from_millis(2))
}

pub fn request(prompt: &str) -> SubmissionRequest {
    SubmissionRequest::new(prompt, 5, AspectRatio::Portrait).unwrap()
}

pub fn details(prompt: &str, seconds_ago: i64) -> VideoDetails {
    VideoDetails::new(
        prompt,
        4,
        AspectRatio::Square,
        chrono::Utc::now() - chrono::Duration::seconds(seconds_ago),
    )
}

/// Generation API with optional gates on submit and the first poll.
pub struct GatedApi {
    pub submit_gate: Option<Arc<Notify>>,
    pub poll_gate: Mutex<Option<Arc<Notify>>>,
    pub pending_polls: AtomicUsize,
    pub submit_failure: Option<RemoteFailure>,
    pub polls: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl GatedApi {
    /// Finishes on the second poll, never blocks.
    pub fn open() -> Self {
        Self {
            submit_gate: None,
            poll_gate: Mutex::new(None),
            pending_polls: AtomicUsize::new(1),
            submit_failure: None,
            polls: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn gated(submit_gate: Arc<Notify>, poll_gate: Arc<Notify>) -> Self {
        Self {
            submit_gate: Some(submit_gate),
            poll_gate: Mutex::new(Some(poll_gate)),
            ..Self::open()
        }
    }

    pub fn rejecting(failure: RemoteFailure) -> Self {
        Self {
            submit_failure: Some(failure),
            ..Self::open()
        }
    }
}

fn handle() -> JobHandle {
    JobHandle::new("operations/session-op")
}

#[async_trait]
impl VideoGenerationApi for GatedApi {
    async fn submit(&self, _submission: &RemoteSubmission) -> GenerationResult<GenerationJob> {
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        match &self.submit_failure {
            Some(failure) => Err(GenerationError::remote(failure.clone())),
            None => Ok(GenerationJob::pending(handle())),
        }
    }

    async fn poll(&self, handle: &JobHandle) -> GenerationResult<GenerationJob> {
        let gate = self.poll_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.polls.fetch_add(1, Ordering::SeqCst);
        let still_pending = self
            .pending_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if still_pending {
            Ok(GenerationJob::pending(handle.clone()))
        } else {
            Ok(GenerationJob::completed(
                handle.clone(),
                vec![VIDEO_URI.to_string()],
            ))
        }
    }

    async fn fetch_artifact(&self, _uri: &str) -> GenerationResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(VIDEO_BYTES.to_vec())
    }
}

/// In-memory store whose operations can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryBlobStore,
    pub fail_list: AtomicBool,
    pub fail_put: AtomicBool,
    pub fail_clear: AtomicBool,
}

impl FlakyStore {
    pub fn fail_on_clear(self) -> Self {
        self.fail_clear.store(true, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl BlobStore for FlakyStore {
    async fn put(&self, record: NewVideoRecord) -> StorageResult<RecordId> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Write("quota exceeded".into())));
        }
        self.inner.put(record).await
    }

    async fn list_all(&self) -> StorageResult<Vec<VideoRecord>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Read("corrupt".into())));
        }
        self.inner.list_all().await
    }

    async fn clear(&self) -> StorageResult<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Write("locked".into())));
        }
        self.inner.clear().await
    }
}

/// In-memory store whose `put` stalls after writing until released.
#[derive(Default)]
pub struct StallingStore {
    pub inner: InMemoryBlobStore,
    pub written: Notify,
    pub release: Notify,
}

#[async_trait]
impl BlobStore for StallingStore {
    async fn put(&self, record: NewVideoRecord) -> StorageResult<RecordId> {
        let id = self.inner.put(record).await?;
        self.written.notify_one();
        self.release.notified().await;
        Ok(id)
    }

    async fn list_all(&self) -> StorageResult<Vec<VideoRecord>> {
        self.inner.list_all().await
    }

    async fn clear(&self) -> StorageResult<()> {
        self.inner.clear().await
    }
}

pub async fn session_with(
    store: Arc<dyn BlobStore>,
    api: Arc<dyn VideoGenerationApi>,
) -> SessionController {
    SessionController::start(store, GenerationPipeline::new(api, fast_policy())).await
}

/// Wait until the session reaches `state`.
pub async fn wait_for_state(session: &SessionController, state: PipelineState) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while session.pipeline_state() != state {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("session never reached the expected state");
}
