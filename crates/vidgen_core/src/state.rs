//! Pipeline progress states.

use serde::{Deserialize, Serialize};

/// Where a session's submission currently is.
///
/// Transitions are strictly `Idle → Generating → Polling → Downloading → Idle`,
/// with a failure at any stage returning directly to `Idle`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PipelineState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Submitting the request
    Generating,
    /// Waiting for the remote job to finish
    Polling,
    /// Fetching the finished video
    Downloading,
}

/// Status copy shown while a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusText {
    /// Headline
    pub title: &'static str,
    /// Supporting line
    pub subtitle: &'static str,
}

impl PipelineState {
    /// True when no submission is running.
    pub fn is_idle(self) -> bool {
        matches!(self, PipelineState::Idle)
    }

    /// User-visible status text; `None` when idle.
    pub fn status_text(self) -> Option<StatusText> {
        match self {
            PipelineState::Idle => None,
            PipelineState::Generating => Some(StatusText {
                title: "Sending your request...",
                subtitle: "Contacting the video generation model.",
            }),
            PipelineState::Polling => Some(StatusText {
                title: "Generating your video...",
                subtitle: "This can take a few minutes. Please be patient.",
            }),
            PipelineState::Downloading => Some(StatusText {
                title: "Almost done!",
                subtitle: "Downloading the finished video.",
            }),
        }
    }
}
