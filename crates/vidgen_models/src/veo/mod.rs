//! Google Veo integration over the Generative Language REST API.

pub mod classify;
mod client;
mod dto;

pub use client::VeoClient;
pub use dto::{
    ApiStatus, ErrorEnvelope, GenerateVideoResponse, GeneratedSample, ImagePayload, Operation,
    OperationResponse, PredictInstance, PredictParameters, PredictRequest, VideoRef,
};
