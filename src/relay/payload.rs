use serde_json::Value;

use crate::models::chat::{ Turn, UpstreamTurn };

/// Prepends the system turn to the client's conversation. Client turns keep their order and content.
pub fn build_upstream_messages(system_prompt: &str, turns: Vec<Value>) -> Vec<UpstreamTurn> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(UpstreamTurn::Relay(Turn::system(system_prompt)));
    messages.extend(turns.into_iter().map(UpstreamTurn::Client));
    messages
}
