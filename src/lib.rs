pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;

use cli::Args;
use config::prompt::load_system_prompt;
use llm::chat::gateway::{ GatewayChatClient, API_KEY_ENV };
use llm::LlmConfig;
use log::{ info, warn };
use relay::AppState;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let llm_config = LlmConfig::from(&args);

    info!("--- Relay Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Relay Route: {}", args.route);
    info!("Gateway URL: {}", llm_config.base_url);
    info!("Model: {}", llm_config.completion_model);
    info!("Gateway API Key: {}", if llm_config.api_key.is_some() { "set" } else { "NOT SET" });
    info!("System Prompt: {}", args.system_prompt_path.as_deref().unwrap_or("built-in"));
    info!("Max Body Bytes: {}", args.max_body_bytes);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    if llm_config.api_key.is_none() {
        warn!("{} is not set. Chat requests will fail until it is configured.", API_KEY_ENV);
    }

    let system_prompt = load_system_prompt(args.system_prompt_path.as_deref())?;
    let client = GatewayChatClient::from_config(&llm_config)?;
    let state = AppState::new(Arc::new(client), system_prompt);

    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, state, args);
    server.run().await?;

    Ok(())
}
