//! Failure-to-message translation.

use vidgen_core::UserMessage;
use vidgen_error::{GenerationError, GenerationErrorKind, RemoteFailure};

/// The message shown for a generation failure.
///
/// # Examples
///
/// ```
/// use vidgen_core::UserMessage;
/// use vidgen_error::{GenerationError, RemoteFailure};
/// use vidgen_pipeline::user_message;
///
/// let err = GenerationError::remote(RemoteFailure::ClientError { status: 400 });
/// assert_eq!(user_message(&err), UserMessage::InvalidInput);
/// ```
pub fn user_message(error: &GenerationError) -> UserMessage {
    match &error.kind {
        GenerationErrorKind::Submission(failure) => match failure {
            RemoteFailure::InvalidCredential => UserMessage::InvalidCredential,
            RemoteFailure::RateLimited => UserMessage::RateLimited,
            RemoteFailure::PolicyBlocked => UserMessage::PolicyBlocked,
            RemoteFailure::InvalidArgument | RemoteFailure::ClientError { .. } => {
                UserMessage::InvalidInput
            }
            RemoteFailure::ServerError { .. } => UserMessage::ServerUnavailable,
            RemoteFailure::Transport(_) | RemoteFailure::Other(_) => UserMessage::Unexpected,
        },
        GenerationErrorKind::Download { .. } => UserMessage::DownloadFailed,
        GenerationErrorKind::PollTimeout { .. } => UserMessage::TimedOut,
        GenerationErrorKind::MissingArtifact | GenerationErrorKind::Decode(_) => {
            UserMessage::Unexpected
        }
    }
}
