//! User-facing messages.

/// The closed set of messages a user ever sees for a failure.
///
/// Raw remote payloads and storage diagnostics are logged, never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UserMessage {
    /// API key rejected
    #[display("The API key is not valid. Please check that it is configured correctly.")]
    InvalidCredential,
    /// Too many requests
    #[display("You have exceeded the allowed request rate. Please wait a moment and try again.")]
    RateLimited,
    /// Content policy violation
    #[display(
        "Your request was blocked because it may violate safety policies. Please revise the prompt and try again."
    )]
    PolicyBlocked,
    /// Invalid prompt, image or parameters
    #[display("The request was rejected due to invalid input. Please check the prompt and image.")]
    InvalidInput,
    /// Transient server error
    #[display("The video service is temporarily unavailable. Please try again later.")]
    ServerUnavailable,
    /// Finished video could not be fetched
    #[display(
        "An error occurred while downloading the final video. The problem may be temporary, please try again."
    )]
    DownloadFailed,
    /// Job did not finish within the poll budget
    #[display("Video generation is taking longer than expected. Please try again later.")]
    TimedOut,
    /// Anything else
    #[display("An unexpected error occurred while generating the video. Please try again.")]
    Unexpected,
    /// History could not be loaded at startup
    #[display("We could not load your generation history.")]
    HistoryLoadFailed,
    /// History could not be cleared
    #[display("We could not clear your generation history.")]
    HistoryClearFailed,
    /// A generated video could not be saved to history
    #[display("The video was generated but could not be saved to your history.")]
    HistorySaveFailed,
}

impl UserMessage {
    /// True for messages about local history rather than generation.
    pub fn is_storage(self) -> bool {
        matches!(
            self,
            UserMessage::HistoryLoadFailed
                | UserMessage::HistoryClearFailed
                | UserMessage::HistorySaveFailed
        )
    }
}
