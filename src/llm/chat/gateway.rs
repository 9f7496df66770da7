use async_trait::async_trait;
use futures::{ StreamExt, TryStreamExt };
use log::{ debug, warn };
use reqwest::{ Client as HttpClient, header::{ HeaderValue, AUTHORIZATION, CONTENT_TYPE } };
use std::error::Error as StdError;

use super::{ ChatClient, UpstreamChatRequest, UpstreamReply };
use crate::llm::LlmConfig;
use crate::relay::error::RelayError;

pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";

/// Chat client for an OpenAI-compatible completions gateway.
pub struct GatewayChatClient {
    http: HttpClient,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GatewayChatClient {
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        connect_timeout: std::time::Duration,
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let http = HttpClient::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;

        Ok(Self { http, api_key, model, base_url })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(
            config.api_key.clone(),
            config.completion_model.clone(),
            config.base_url.clone(),
            config.connect_timeout,
        )
    }

    fn bearer(&self) -> Result<HeaderValue, RelayError> {
        let key = self.api_key.as_deref().ok_or(RelayError::MissingCredential(API_KEY_ENV))?;
        HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e|
            RelayError::Internal(format!("Invalid API key format: {}", e))
        )
    }
}

#[async_trait]
impl ChatClient for GatewayChatClient {
    fn ensure_configured(&self) -> Result<(), RelayError> {
        self.bearer().map(|_| ())
    }

    async fn stream_chat(&self, request: &UpstreamChatRequest) -> Result<UpstreamReply, RelayError> {
        let auth = self.bearer()?;
        debug!(
            "POST {} model={} turns={}",
            self.base_url,
            request.model,
            request.messages.len()
        );

        let resp = self.http
            .post(&self.base_url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(request)
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not read AI gateway error body: {}", e);
                    String::new()
                }
            };
            return Ok(UpstreamReply::Rejected { status, body });
        }

        let stream = resp
            .bytes_stream()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)
            .boxed();
        Ok(UpstreamReply::Stream(stream))
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
