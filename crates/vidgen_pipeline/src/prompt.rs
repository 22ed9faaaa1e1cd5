//! Building the remote request from a user submission.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use vidgen_core::SubmissionRequest;
use vidgen_models::{InlineImage, RemoteSubmission};

/// Turns a validated submission into what the remote service accepts.
pub trait PromptComposer: Send + Sync {
    /// Compose the remote request.
    fn compose(&self, request: &SubmissionRequest) -> RemoteSubmission;
}

/// Folds duration and aspect ratio into the prompt text.
///
/// The service takes only free text plus an image, so the requested shape
/// travels as words.
///
/// # Examples
///
/// ```
/// use vidgen_core::{AspectRatio, SubmissionRequest};
/// use vidgen_pipeline::{InlinePromptComposer, PromptComposer};
///
/// let request = SubmissionRequest::new("A lighthouse at dusk", 5, AspectRatio::Portrait).unwrap();
/// let submission = InlinePromptComposer.compose(&request);
/// assert_eq!(
///     submission.prompt(),
///     "A lighthouse at dusk, a 5-second video, aspect ratio 9:16."
/// );
/// assert_eq!(*submission.sample_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlinePromptComposer;

impl PromptComposer for InlinePromptComposer {
    fn compose(&self, request: &SubmissionRequest) -> RemoteSubmission {
        let prompt = format!(
            "{}, a {}-second video, aspect ratio {}.",
            request.prompt(),
            request.duration_secs(),
            request.aspect_ratio()
        );
        let image = request.image().as_ref().map(|image| InlineImage {
            data: STANDARD.encode(image.bytes()),
            mime_type: image.mime().to_string(),
        });

        RemoteSubmission::new(prompt, image)
    }
}
