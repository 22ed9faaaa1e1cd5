//! Maps Google API failures onto [`RemoteFailure`].
//!
//! Checks run in a fixed precedence: credential, rate limit, content
//! policy, invalid argument, then the HTTP status family.

use crate::veo::dto::{ApiStatus, ErrorEnvelope};
use tracing::debug;
use vidgen_error::RemoteFailure;

/// Classify a non-success HTTP response from its status and body.
///
/// # Examples
///
/// ```
/// use vidgen_error::RemoteFailure;
/// use vidgen_models::classify_http;
///
/// let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
/// assert_eq!(classify_http(400, body), RemoteFailure::InvalidCredential);
/// assert_eq!(classify_http(502, "<html>bad gateway</html>"), RemoteFailure::ServerError { status: 502 });
/// ```
pub fn classify_http(status: u16, body: &str) -> RemoteFailure {
    let api_status = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| ApiStatus {
            code: Some(i32::from(status)),
            message: body.to_string(),
            status: String::new(),
        });
    classify_status(&api_status, Some(status))
}

/// Classify an RPC status, optionally with the HTTP status it arrived with.
///
/// Failures embedded in a finished operation carry no HTTP status; their
/// canonical status name decides the server-error family.
pub fn classify_status(api_status: &ApiStatus, http_status: Option<u16>) -> RemoteFailure {
    let message = api_status.message.to_lowercase();
    let status = api_status.status.as_str();

    let failure = if message.contains("api key not valid")
        || message.contains("api_key_invalid")
        || status == "UNAUTHENTICATED"
        || status == "PERMISSION_DENIED"
        || http_status == Some(401)
    {
        RemoteFailure::InvalidCredential
    } else if message.contains("rate limit")
        || status == "RESOURCE_EXHAUSTED"
        || http_status == Some(429)
    {
        RemoteFailure::RateLimited
    } else if message.contains("blocked") {
        RemoteFailure::PolicyBlocked
    } else if message.contains("invalid argument") || status == "INVALID_ARGUMENT" {
        RemoteFailure::InvalidArgument
    } else if let Some(code) = http_status {
        RemoteFailure::from_status(code)
    } else {
        match status {
            "INTERNAL" => RemoteFailure::ServerError { status: 500 },
            "UNAVAILABLE" => RemoteFailure::ServerError { status: 503 },
            "DEADLINE_EXCEEDED" => RemoteFailure::ServerError { status: 504 },
            _ => RemoteFailure::Other(api_status.message.clone()),
        }
    };

    debug!(?http_status, status, %failure, "Classified remote failure");
    failure
}

/// Classify a finished operation whose videos were all removed by safety filters.
pub fn classify_filtered(reasons: &[String]) -> RemoteFailure {
    debug!(?reasons, "All samples filtered");
    RemoteFailure::PolicyBlocked
}
