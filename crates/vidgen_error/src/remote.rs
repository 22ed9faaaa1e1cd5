//! Classified failures of the remote generation service.

/// Closed classification of a failed remote call.
///
/// Produced at the remote-call boundary so that callers never inspect the
/// text of third-party error payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RemoteFailure {
    /// The API key was rejected
    #[display("invalid credential")]
    InvalidCredential,
    /// Request quota or rate limit exceeded
    #[display("rate limited")]
    RateLimited,
    /// Prompt or image blocked by content policy
    #[display("blocked by content policy")]
    PolicyBlocked,
    /// The service rejected the request arguments
    #[display("invalid argument")]
    InvalidArgument,
    /// Any other 4xx response
    #[display("client error (HTTP {})", status)]
    ClientError {
        /// HTTP status code
        status: u16,
    },
    /// A 5xx response
    #[display("server error (HTTP {})", status)]
    ServerError {
        /// HTTP status code
        status: u16,
    },
    /// The request never produced a response
    #[display("transport failure: {}", _0)]
    Transport(String),
    /// Unrecognized failure
    #[display("{}", _0)]
    Other(String),
}

impl RemoteFailure {
    /// Classify a bare HTTP status with no further detail.
    ///
    /// # Examples
    ///
    /// ```
    /// use vidgen_error::RemoteFailure;
    ///
    /// assert_eq!(RemoteFailure::from_status(429), RemoteFailure::RateLimited);
    /// assert_eq!(
    ///     RemoteFailure::from_status(503),
    ///     RemoteFailure::ServerError { status: 503 }
    /// );
    /// ```
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => RemoteFailure::InvalidCredential,
            429 => RemoteFailure::RateLimited,
            400..=499 => RemoteFailure::ClientError { status },
            500..=599 => RemoteFailure::ServerError { status },
            _ => RemoteFailure::Other(format!("unexpected HTTP status {}", status)),
        }
    }
}
