use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream Gateway Args ---
    /// API key for the AI gateway. Whitespace-only values count as unset, and chat requests then fail.
    #[arg(long, env = "AI_GATEWAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat completions endpoint of the AI gateway.
    #[arg(
        long,
        env = "AI_GATEWAY_URL",
        default_value = "https://ai.gateway.lovable.dev/v1/chat/completions"
    )]
    pub gateway_url: String,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "AI_GATEWAY_MODEL", default_value = "google/gemini-2.5-flash")]
    pub model: String,

    /// Seconds allowed for establishing the upstream connection. Generation itself is not timed out.
    #[arg(long, env = "CONNECT_TIMEOUT_SECS", default_value = "10")]
    pub connect_timeout_secs: u64,

    // --- Prompt Args ---
    /// Optional file replacing the built-in system prompt. Read once at startup.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Path the chat relay is mounted on.
    #[arg(long, env = "RELAY_ROUTE", default_value = "/defi-chat")]
    pub route: String,

    /// Largest accepted request body in bytes.
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "2097152")]
    pub max_body_bytes: usize,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    /// The gateway key with blank values treated as absent.
    pub fn gateway_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
    }
}
