//! Pipeline failure as seen by callers.

use derive_getters::Getters;
use vidgen_core::UserMessage;
use vidgen_error::GenerationError;

/// A failed generation: the message to show plus the logged cause.
///
/// Displays as the user message only.
#[derive(Debug, Clone, Getters, derive_more::Display, derive_more::Error)]
#[display("{}", message)]
pub struct PipelineError {
    /// What the user sees
    #[error(not(source))]
    message: UserMessage,
    /// What actually went wrong
    #[error(source)]
    cause: GenerationError,
}

impl PipelineError {
    /// Translate a generation failure.
    pub fn from_cause(cause: GenerationError) -> Self {
        Self {
            message: crate::user_message(&cause),
            cause,
        }
    }
}

impl From<GenerationError> for PipelineError {
    fn from(cause: GenerationError) -> Self {
        Self::from_cause(cause)
    }
}
