//! User submissions.

use crate::{AspectRatio, SourceImage};
use derive_getters::Getters;
use vidgen_error::{ValidationError, ValidationErrorKind};

/// Shortest video the generator is asked for, in seconds.
pub const MIN_DURATION_SECS: u32 = 1;
/// Longest video the generator is asked for, in seconds.
pub const MAX_DURATION_SECS: u32 = 10;
/// Duration preselected for new submissions.
pub const DEFAULT_DURATION_SECS: u32 = 3;

/// One validated request to generate a video.
///
/// # Examples
///
/// ```
/// use vidgen_core::{AspectRatio, SubmissionRequest};
///
/// let request = SubmissionRequest::new("A fox in the snow", 5, AspectRatio::Portrait).unwrap();
/// assert_eq!(*request.duration_secs(), 5);
/// assert!(request.image().is_none());
///
/// assert!(SubmissionRequest::new("   ", 5, AspectRatio::Portrait).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SubmissionRequest {
    /// Prompt text as typed by the user
    prompt: String,
    /// Requested length in seconds
    duration_secs: u32,
    /// Requested frame shape
    aspect_ratio: AspectRatio,
    /// Optional starting frame
    image: Option<SourceImage>,
}

impl SubmissionRequest {
    /// Create a text-only submission.
    ///
    /// # Errors
    ///
    /// Fails when the prompt is blank or the duration is outside
    /// [`MIN_DURATION_SECS`]..=[`MAX_DURATION_SECS`].
    pub fn new(
        prompt: impl Into<String>,
        duration_secs: u32,
        aspect_ratio: AspectRatio,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyPrompt));
        }
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration_secs) {
            return Err(ValidationError::new(
                ValidationErrorKind::DurationOutOfRange {
                    value: duration_secs,
                    min: MIN_DURATION_SECS,
                    max: MAX_DURATION_SECS,
                },
            ));
        }

        Ok(Self {
            prompt,
            duration_secs,
            aspect_ratio,
            image: None,
        })
    }

    /// Attach a starting frame.
    pub fn with_image(mut self, image: SourceImage) -> Self {
        self.image = Some(image);
        self
    }
}
