//! The generation pipeline.

use crate::{InlinePromptComposer, PipelineError, PromptComposer};
use std::sync::Arc;
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, instrument};
use vidgen_core::{PipelineState, PollPolicy, SubmissionRequest};
use vidgen_error::{GenerationError, GenerationErrorKind, GenerationResult};
use vidgen_models::VideoGenerationApi;

/// Receives the pipeline's progress notifications.
pub type ProgressObserver = dyn Fn(PipelineState) + Send + Sync;

/// Drives one submission through submit, poll and download.
///
/// Emits exactly two notifications: [`PipelineState::Polling`] once a job
/// exists and [`PipelineState::Downloading`] once it has a result.
#[derive(Clone)]
pub struct GenerationPipeline {
    api: Arc<dyn VideoGenerationApi>,
    composer: Arc<dyn PromptComposer>,
    policy: PollPolicy,
}

impl std::fmt::Debug for GenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPipeline")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl GenerationPipeline {
    /// Creates a pipeline with the inline prompt composer.
    pub fn new(api: Arc<dyn VideoGenerationApi>, policy: PollPolicy) -> Self {
        Self {
            api,
            composer: Arc::new(InlinePromptComposer),
            policy,
        }
    }

    /// Replace the prompt composer.
    pub fn with_composer(mut self, composer: Arc<dyn PromptComposer>) -> Self {
        self.composer = composer;
        self
    }

    /// The active polling policy.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Generate a video and return its bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] carrying the user message for the
    /// failure; the raw cause is logged here.
    #[instrument(
        skip_all,
        fields(
            duration_secs = *request.duration_secs(),
            aspect_ratio = %request.aspect_ratio(),
            with_image = request.image().is_some()
        )
    )]
    pub async fn run(
        &self,
        request: &SubmissionRequest,
        observer: &ProgressObserver,
    ) -> Result<Vec<u8>, PipelineError> {
        match self.generate(request, observer).await {
            Ok(payload) => {
                info!(bytes = payload.len(), "Video generated");
                Ok(payload)
            }
            Err(cause) => {
                let failure = PipelineError::from_cause(cause);
                error!(cause = %failure.cause(), message = ?failure.message(), "Generation failed");
                Err(failure)
            }
        }
    }

    async fn generate(
        &self,
        request: &SubmissionRequest,
        observer: &ProgressObserver,
    ) -> GenerationResult<Vec<u8>> {
        let submission = self.composer.compose(request);
        let mut job = self.api.submit(&submission).await?;
        info!(job = %job.handle(), "Job submitted");

        observer(PipelineState::Polling);
        let started = Instant::now();
        let mut attempt: u32 = 0;
        while !*job.done() {
            attempt += 1;
            let interval = *self.policy.interval();
            if self.policy.exhausted(attempt, started.elapsed() + interval) {
                return Err(GenerationError::new(GenerationErrorKind::PollTimeout {
                    attempts: attempt - 1,
                }));
            }
            sleep(interval).await;
            job = self.api.poll(job.handle()).await?;
            debug!(job = %job.handle(), attempt, done = *job.done(), "Polled job");
        }

        if let Some(failure) = job.failure() {
            return Err(GenerationError::remote(failure.clone()));
        }
        let uri = job
            .first_video_uri()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingArtifact))?;

        observer(PipelineState::Downloading);
        self.api.fetch_artifact(uri).await
    }
}
