use axum::{
    http::StatusCode,
    response::{ IntoResponse, Response },
    Json,
};
use log::{ error, warn };
use serde::Serialize;
use thiserror::Error;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";
pub const CREDITS_MESSAGE: &str = "AI credits depleted. Please add more credits to continue.";
pub const SERVICE_ERROR_MESSAGE: &str = "AI service error";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Every way a chat request can fail. Each one ends the request with a single JSON error.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    #[error("{}", CREDITS_MESSAGE)]
    CreditsDepleted,

    /// Upstream detail stays server side; only the generic message reaches the caller.
    #[error("{}", SERVICE_ERROR_MESSAGE)]
    Upstream {
        status: StatusCode,
        body: String,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl RelayError {
    /// Maps a non-success gateway status. 429 and 402 pass through, everything else collapses to 500.
    pub fn from_upstream_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => RelayError::RateLimited,
            StatusCode::PAYMENT_REQUIRED => RelayError::CreditsDepleted,
            _ => RelayError::Upstream { status, body },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RelayError::CreditsDepleted => StatusCode::PAYMENT_REQUIRED,
            RelayError::MissingCredential(_)
            | RelayError::InvalidBody(_)
            | RelayError::Upstream { .. }
            | RelayError::Transport(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the caller.
    pub fn client_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    fn log(&self) {
        match self {
            RelayError::Upstream { status, body } => error!("AI gateway error: {} {}", status, body),
            RelayError::MissingCredential(_) => warn!("Chat request refused: {}", self),
            RelayError::RateLimited | RelayError::CreditsDepleted =>
                warn!("AI gateway refused request: {}", self.status_code()),
            _ => error!("Chat error: {}", self),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorBody { error: self.client_message() };
        (self.status_code(), Json(body)).into_response()
    }
}
