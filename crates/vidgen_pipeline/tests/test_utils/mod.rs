//! Scripted generation API for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use vidgen_error::{GenerationError, GenerationResult, RemoteFailure};
use vidgen_models::{GenerationJob, JobHandle, RemoteSubmission, VideoGenerationApi};

pub const JOB_NAME: &str = "models/veo-2.0-generate-001/operations/test-op";
pub const VIDEO_URI: &str = "https://files.example/video.mp4?alt=media";
pub const VIDEO_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42-test-video";

/// Replays canned responses and records every call.
#[derive(Default)]
pub struct ScriptedApi {
    submit_result: Mutex<Option<GenerationResult<GenerationJob>>>,
    poll_results: Mutex<VecDeque<GenerationResult<GenerationJob>>>,
    fetch_result: Mutex<Option<GenerationResult<Vec<u8>>>>,
    pub submissions: Mutex<Vec<RemoteSubmission>>,
    pub polls: Mutex<Vec<JobHandle>>,
    pub fetches: Mutex<Vec<String>>,
}

impl ScriptedApi {
    /// Job accepted, done after `pending_polls` running polls, one video.
    pub fn completing_after(pending_polls: usize) -> Self {
        let api = Self::default();
        *api.submit_result.lock() = Some(Ok(pending()));
        {
            let mut polls = api.poll_results.lock();
            for _ in 0..pending_polls {
                polls.push_back(Ok(pending()));
            }
            polls.push_back(Ok(completed()));
        }
        *api.fetch_result.lock() = Some(Ok(VIDEO_BYTES.to_vec()));
        api
    }

    /// Job already finished when submitted.
    pub fn done_at_submit() -> Self {
        let api = Self::default();
        *api.submit_result.lock() = Some(Ok(completed()));
        *api.fetch_result.lock() = Some(Ok(VIDEO_BYTES.to_vec()));
        api
    }

    /// Submission rejected with `failure`.
    pub fn rejecting(failure: RemoteFailure) -> Self {
        let api = Self::default();
        *api.submit_result.lock() = Some(Err(GenerationError::remote(failure)));
        api
    }

    /// Job that never finishes.
    pub fn never_finishing() -> Self {
        let api = Self::default();
        *api.submit_result.lock() = Some(Ok(pending()));
        api
    }

    pub fn with_polls(self, results: Vec<GenerationResult<GenerationJob>>) -> Self {
        *self.poll_results.lock() = results.into();
        self
    }

    pub fn with_fetch(self, result: GenerationResult<Vec<u8>>) -> Self {
        *self.fetch_result.lock() = Some(result);
        self
    }

    pub fn poll_count(&self) -> usize {
        self.polls.lock().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().len()
    }
}

pub fn pending() -> GenerationJob {
    GenerationJob::pending(JobHandle::new(JOB_NAME))
}

pub fn completed() -> GenerationJob {
    GenerationJob::completed(JobHandle::new(JOB_NAME), vec![VIDEO_URI.to_string()])
}

#[async_trait]
impl VideoGenerationApi for ScriptedApi {
    async fn submit(&self, submission: &RemoteSubmission) -> GenerationResult<GenerationJob> {
        self.submissions.lock().push(submission.clone());
        self.submit_result
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(pending()))
    }

    async fn poll(&self, handle: &JobHandle) -> GenerationResult<GenerationJob> {
        self.polls.lock().push(handle.clone());
        self.poll_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(pending()))
    }

    async fn fetch_artifact(&self, uri: &str) -> GenerationResult<Vec<u8>> {
        self.fetches.lock().push(uri.to_string());
        self.fetch_result
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(VIDEO_BYTES.to_vec()))
    }
}
