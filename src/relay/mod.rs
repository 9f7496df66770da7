pub mod error;
pub mod payload;

use std::sync::Arc;

use axum::{
    body::{ Body, Bytes },
    extract::{ rejection::BytesRejection, State },
    http::{ header::CONTENT_TYPE, HeaderValue, StatusCode },
    response::{ IntoResponse, Response },
};
use futures::TryStreamExt;
use log::{ error, info };

use crate::config::prompt::SystemPrompt;
use crate::llm::chat::{ ByteStream, ChatClient, UpstreamChatRequest, UpstreamReply };
use crate::models::chat::ChatRequest;
use self::error::RelayError;
use self::payload::build_upstream_messages;

/// Immutable per-process state. Requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ChatClient>,
    pub system_prompt: SystemPrompt,
}

impl AppState {
    pub fn new(client: Arc<dyn ChatClient>, system_prompt: SystemPrompt) -> Self {
        Self { client, system_prompt }
    }
}

/// Cross-origin preflight. The body is never read.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn chat_relay(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match relay(&state, body).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn relay(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, RelayError> {
    state.client.ensure_configured()?;

    let body = body.map_err(|rejection| RelayError::Internal(rejection.body_text()))?;
    let ChatRequest { messages } = serde_json::from_slice(&body)?;
    info!("Relaying chat with {} turns", messages.len());

    let request = UpstreamChatRequest {
        model: state.client.get_model(),
        messages: build_upstream_messages(state.system_prompt.as_str(), messages),
        stream: true,
    };

    match state.client.stream_chat(&request).await? {
        UpstreamReply::Stream(stream) => Ok(event_stream_response(stream)),
        UpstreamReply::Rejected { status, body } =>
            Err(RelayError::from_upstream_status(status, body)),
    }
}

fn event_stream_response(stream: ByteStream) -> Response {
    let stream = stream.inspect_err(|e| error!("Chat stream error: {}", e));
    let mut response = Response::new(Body::from_stream(stream));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
    response
}
