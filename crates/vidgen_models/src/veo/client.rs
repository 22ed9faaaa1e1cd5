//! REST client for Veo video generation.

use crate::veo::{Operation, PredictRequest, classify};
use crate::{GenerationJob, JobHandle, RemoteSubmission, VideoGenerationApi};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use vidgen_core::VidgenConfig;
use vidgen_error::{
    GenerationError, GenerationErrorKind, GenerationResult, HttpError, RemoteFailure,
};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Generative Language long-running video endpoints.
///
/// Submits with `predictLongRunning`, polls the returned operation by name,
/// and downloads results with the API key appended as the `key` query
/// parameter.
#[derive(Clone)]
pub struct VeoClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for VeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeoClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl VeoClient {
    /// Creates a new Veo client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `model` - Model identifier, e.g. `veo-2.0-generate-001`
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com`
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip_all, fields(model = %model.as_ref(), base_url = %base_url.as_ref()))]
    pub fn new(
        api_key: impl Into<String>,
        model: impl AsRef<str>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created Veo client");
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.as_ref().to_string(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &VidgenConfig) -> Result<Self, HttpError> {
        Self::new(
            config.api_key().clone(),
            config.model(),
            config.base_url(),
            config.request_timeout(),
        )
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn submit_url(&self) -> String {
        format!(
            "{}/{}/models/{}:predictLongRunning",
            self.base_url, API_VERSION, self.model
        )
    }

    fn operation_url(&self, handle: &JobHandle) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, handle.as_str())
    }

    /// Turn a response into an operation, classifying HTTP failures.
    async fn read_operation(response: Response) -> GenerationResult<Operation> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Veo API error");
            return Err(GenerationError::remote(classify::classify_http(
                status.as_u16(),
                &body,
            )));
        }

        response.json::<Operation>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse operation");
            GenerationError::new(GenerationErrorKind::Decode(format!(
                "Failed to parse operation: {}",
                e
            )))
        })
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    error!(error = ?e, "HTTP request failed");
    GenerationError::remote(RemoteFailure::Transport(e.to_string()))
}

#[async_trait]
impl VideoGenerationApi for VeoClient {
    #[instrument(skip(self, submission), fields(model = %self.model, with_image = submission.image().is_some()))]
    async fn submit(&self, submission: &RemoteSubmission) -> GenerationResult<GenerationJob> {
        let body = PredictRequest::from(submission);

        let response = self
            .client
            .post(self.submit_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let operation = Self::read_operation(response).await?;
        info!(job = %operation.name, "Submitted generation job");
        Ok(operation.into_job())
    }

    #[instrument(skip_all, fields(job = %handle))]
    async fn poll(&self, handle: &JobHandle) -> GenerationResult<GenerationJob> {
        let response = self
            .client
            .get(self.operation_url(handle))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let job = Self::read_operation(response).await?.into_job();
        debug!(done = job.done(), "Polled generation job");
        Ok(job)
    }

    #[instrument(skip(self, uri))]
    async fn fetch_artifact(&self, uri: &str) -> GenerationResult<Vec<u8>> {
        let mut url = Url::parse(uri).map_err(|e| {
            GenerationError::new(GenerationErrorKind::Download {
                status: None,
                message: format!("Invalid video URI: {}", e),
            })
        })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, "Video fetch failed");
            GenerationError::new(GenerationErrorKind::Download {
                status: None,
                message: e.to_string(),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Video fetch returned error status");
            return Err(GenerationError::new(GenerationErrorKind::Download {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            }));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = ?e, "Video body read failed");
            GenerationError::new(GenerationErrorKind::Download {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })
        })?;

        info!(bytes = bytes.len(), "Downloaded video");
        Ok(bytes.to_vec())
    }
}
