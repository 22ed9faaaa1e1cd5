//! The remote generation service contract.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use vidgen_error::{GenerationResult, RemoteFailure};

/// Opaque token naming an in-flight remote operation.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wrap an operation name returned by the service.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The operation name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A base64-encoded image sent inline with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Standard base64 (padded) of the image bytes
    pub data: String,
    /// Image MIME type, e.g. `image/png`
    pub mime_type: String,
}

/// The request as the remote service sees it.
///
/// Built from a user submission by a prompt composer; the service only
/// understands free text plus an optional image.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RemoteSubmission {
    /// Final prompt text
    prompt: String,
    /// Optional starting frame
    #[builder(default)]
    image: Option<InlineImage>,
    /// Number of videos to generate
    #[builder(default = "1")]
    sample_count: u32,
}

impl RemoteSubmission {
    /// A single-sample submission.
    pub fn new(prompt: impl Into<String>, image: Option<InlineImage>) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            sample_count: 1,
        }
    }

    /// Creates a new builder for RemoteSubmission.
    pub fn builder() -> RemoteSubmissionBuilder {
        RemoteSubmissionBuilder::default()
    }
}

/// Snapshot of one remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GenerationJob {
    /// Operation name
    handle: JobHandle,
    /// Completion flag; terminal once true
    done: bool,
    /// Result video URIs, one slot per sample in service order; `None`
    /// where a sample carried no URI
    video_uris: Vec<Option<String>>,
    /// Failure embedded in a completed operation
    failure: Option<RemoteFailure>,
}

impl GenerationJob {
    /// A job that is still running.
    pub fn pending(handle: JobHandle) -> Self {
        Self {
            handle,
            done: false,
            video_uris: Vec::new(),
            failure: None,
        }
    }

    /// A job that finished with results.
    pub fn completed(handle: JobHandle, video_uris: Vec<String>) -> Self {
        Self::from_samples(handle, video_uris.into_iter().map(Some).collect())
    }

    /// A finished job whose samples may lack URIs, kept in position.
    pub fn from_samples(handle: JobHandle, video_uris: Vec<Option<String>>) -> Self {
        Self {
            handle,
            done: true,
            video_uris,
            failure: None,
        }
    }

    /// A job that finished with an embedded failure.
    pub fn failed(handle: JobHandle, failure: RemoteFailure) -> Self {
        Self {
            handle,
            done: true,
            video_uris: Vec::new(),
            failure: Some(failure),
        }
    }

    /// The URI of the first sample. `None` when there are no samples or
    /// the first one has no URI; later samples are never substituted.
    pub fn first_video_uri(&self) -> Option<&str> {
        self.video_uris.first()?.as_deref()
    }
}

/// A remote service that turns prompts into videos asynchronously.
///
/// Implementations classify every failure into a
/// [`RemoteFailure`] at this boundary.
#[async_trait]
pub trait VideoGenerationApi: Send + Sync {
    /// Start a generation job.
    async fn submit(&self, submission: &RemoteSubmission) -> GenerationResult<GenerationJob>;

    /// Re-query a job's status.
    async fn poll(&self, handle: &JobHandle) -> GenerationResult<GenerationJob>;

    /// Download a finished video, authenticating with the client's credential.
    async fn fetch_artifact(&self, uri: &str) -> GenerationResult<Vec<u8>>;
}
