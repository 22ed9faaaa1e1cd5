//! Durable history records.

use crate::AspectRatio;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a [`VideoRecord`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The raw integer key.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Everything about a generated video except its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VideoDetails {
    /// Prompt as submitted, before augmentation
    prompt: String,
    /// Requested length in seconds
    duration_secs: u32,
    /// Requested frame shape
    aspect_ratio: AspectRatio,
    /// When the video was stored
    timestamp: DateTime<Utc>,
}

impl VideoDetails {
    /// Describe a video created at `timestamp`.
    pub fn new(
        prompt: impl Into<String>,
        duration_secs: u32,
        aspect_ratio: AspectRatio,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs,
            aspect_ratio,
            timestamp,
        }
    }
}

/// A video that has not been stored yet. Only a store assigns ids.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewVideoRecord {
    details: VideoDetails,
    payload: Vec<u8>,
}

impl NewVideoRecord {
    /// Pair details with the downloaded bytes.
    pub fn new(details: VideoDetails, payload: Vec<u8>) -> Self {
        Self { details, payload }
    }

    /// Give the record its id. Called by stores.
    pub fn into_record(self, id: RecordId) -> VideoRecord {
        VideoRecord {
            id,
            details: self.details,
            payload: self.payload,
        }
    }
}

/// A stored video, the unit of history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VideoRecord {
    id: RecordId,
    details: VideoDetails,
    payload: Vec<u8>,
}

impl VideoRecord {
    /// Reassemble a record read back from storage.
    pub fn new(id: RecordId, details: VideoDetails, payload: Vec<u8>) -> Self {
        Self {
            id,
            details,
            payload,
        }
    }

    /// Split into id, details and bytes without copying the payload.
    pub fn into_parts(self) -> (RecordId, VideoDetails, Vec<u8>) {
        (self.id, self.details, self.payload)
    }
}
