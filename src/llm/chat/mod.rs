pub mod gateway;

use async_trait::async_trait;
use axum::body::Bytes;
use futures::Stream;
use reqwest::StatusCode;
use serde::Serialize;
use std::error::Error as StdError;
use std::pin::Pin;

use crate::models::chat::UpstreamTurn;
use crate::relay::error::RelayError;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Box<dyn StdError + Send + Sync>>> + Send>>;

/// Body posted to the chat completions endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct UpstreamChatRequest {
    pub model: String,
    pub messages: Vec<UpstreamTurn>,
    pub stream: bool,
}

pub enum UpstreamReply {
    /// 2xx: the raw event-stream body, untouched.
    Stream(ByteStream),
    /// Non-success status with whatever body text could be read.
    Rejected {
        status: StatusCode,
        body: String,
    },
}

impl std::fmt::Debug for UpstreamReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamReply::Stream(_) => f.debug_tuple("Stream").finish_non_exhaustive(),
            UpstreamReply::Rejected { status, body } => f
                .debug_struct("Rejected")
                .field("status", status)
                .field("body", body)
                .finish(),
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Checks the client holds what it needs to call the gateway. Makes no request.
    fn ensure_configured(&self) -> Result<(), RelayError>;

    async fn stream_chat(&self, request: &UpstreamChatRequest) -> Result<UpstreamReply, RelayError>;

    fn get_model(&self) -> String;
}
