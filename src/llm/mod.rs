pub mod chat;

use std::time::Duration;

use crate::cli::Args;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl From<&Args> for LlmConfig {
    fn from(args: &Args) -> Self {
        Self {
            api_key: args.gateway_api_key(),
            completion_model: args.model.clone(),
            base_url: args.gateway_url.clone(),
            connect_timeout: Duration::from_secs(args.connect_timeout_secs),
        }
    }
}
