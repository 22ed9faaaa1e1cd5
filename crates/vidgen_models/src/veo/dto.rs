//! Wire types for the Generative Language long-running video API.

use crate::{GenerationJob, JobHandle, RemoteSubmission, veo::classify};
use serde::{Deserialize, Serialize};

/// `predictLongRunning` request body.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    /// One instance per prompt
    pub instances: Vec<PredictInstance>,
    /// Generation parameters
    pub parameters: PredictParameters,
}

/// A single prompt instance.
#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    /// Prompt text
    pub prompt: String,
    /// Optional starting frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
}

/// Inline image bytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Base64 image data
    pub bytes_base64_encoded: String,
    /// Image MIME type
    pub mime_type: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Videos to generate
    pub sample_count: u32,
}

impl From<&RemoteSubmission> for PredictRequest {
    fn from(submission: &RemoteSubmission) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: submission.prompt().clone(),
                image: submission.image().as_ref().map(|image| ImagePayload {
                    bytes_base64_encoded: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                }),
            }],
            parameters: PredictParameters {
                sample_count: *submission.sample_count(),
            },
        }
    }
}

/// A long-running operation as returned by submit and poll.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    /// Operation name, e.g. `models/veo-2.0-generate-001/operations/abc`
    pub name: String,
    /// Completion flag; omitted while running
    #[serde(default)]
    pub done: bool,
    /// Result payload once done
    #[serde(default)]
    pub response: Option<OperationResponse>,
    /// Failure payload once done
    #[serde(default)]
    pub error: Option<ApiStatus>,
}

/// Result payload of a finished operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    /// Video generation result
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated samples plus safety filtering details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// Generated videos
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
    /// Number of videos removed by safety filters
    #[serde(default)]
    pub rai_media_filtered_count: Option<u32>,
    /// Why videos were removed
    #[serde(default)]
    pub rai_media_filtered_reasons: Vec<String>,
}

/// One generated sample.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedSample {
    /// Video reference
    #[serde(default)]
    pub video: Option<VideoRef>,
}

/// Where a generated video can be downloaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoRef {
    /// Download URI
    #[serde(default)]
    pub uri: Option<String>,
}

/// Google API error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ApiStatus,
}

/// Google RPC status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStatus {
    /// HTTP or RPC code
    #[serde(default)]
    pub code: Option<i32>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. `INVALID_ARGUMENT`
    #[serde(default)]
    pub status: String,
}

impl Operation {
    /// Convert to the service-neutral job snapshot.
    pub fn into_job(self) -> GenerationJob {
        let handle = JobHandle::new(self.name);

        if !self.done {
            return GenerationJob::pending(handle);
        }
        if let Some(status) = self.error {
            return GenerationJob::failed(handle, classify::classify_status(&status, None));
        }

        let video = self
            .response
            .and_then(|response| response.generate_video_response)
            .unwrap_or_default();
        let uris: Vec<Option<String>> = video
            .generated_samples
            .into_iter()
            .map(|sample| sample.video.and_then(|v| v.uri))
            .collect();

        let filtered = video.rai_media_filtered_count.unwrap_or(0) > 0
            || !video.rai_media_filtered_reasons.is_empty();
        let first_missing = uris.first().is_none_or(Option::is_none);
        if first_missing && filtered {
            return GenerationJob::failed(
                handle,
                classify::classify_filtered(&video.rai_media_filtered_reasons),
            );
        }

        GenerationJob::from_samples(handle, uris)
    }
}
