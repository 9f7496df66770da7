use std::error::Error;
use std::fmt;
use std::fs;
use std::sync::Arc;
use log::info;

/// Persona and knowledge prompt injected ahead of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../../prompts/system_prompt.md");

#[derive(Debug)]
pub enum PromptError {
    Empty(String),
    IoError(String, std::io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Empty(path) => write!(f, "System prompt file '{}' is empty", path),
            PromptError::IoError(path, e) =>
                write!(f, "Failed to read system prompt file '{}': {}", path, e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}

/// The system turn content, shared read-only by every request.
#[derive(Debug, Clone)]
pub struct SystemPrompt {
    text: Arc<str>,
}

impl SystemPrompt {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

pub fn load_system_prompt(path: Option<&str>) -> Result<SystemPrompt, PromptError> {
    let Some(path) = path else {
        info!("Using built-in system prompt ({} bytes)", DEFAULT_SYSTEM_PROMPT.len());
        return Ok(SystemPrompt::default());
    };

    let text = fs::read_to_string(path).map_err(|e| PromptError::IoError(path.to_string(), e))?;
    if text.trim().is_empty() {
        return Err(PromptError::Empty(path.to_string()));
    }
    info!("Loaded system prompt from '{}' ({} bytes)", path, text.len());
    Ok(SystemPrompt::new(text))
}
