use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("commerce platform could not be reached: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("commerce platform rejected the client credentials ({status})")]
    Auth { status: StatusCode },
    #[error("commerce platform rejected the cart mutation ({status})")]
    Rejected { status: StatusCode, body: String },
    #[error("commerce platform returned an unreadable response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Rejected { status, .. }
                if status.is_client_error()
                    && *status != StatusCode::UNAUTHORIZED
                    && *status != StatusCode::FORBIDDEN =>
            {
                *status
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn public_message(&self) -> String {
        match self {
            UpstreamError::Transport(e) if e.is_timeout() => String::from("Commerce platform timed out"),
            UpstreamError::Transport(_) => String::from("Commerce platform is unavailable"),
            UpstreamError::Auth { .. } => String::from("Could not authenticate with the commerce platform"),
            UpstreamError::Rejected { status, .. } if *status == StatusCode::CONFLICT => {
                String::from("Cart was modified concurrently, cartVersion is out of date")
            }
            UpstreamError::Rejected { status, .. } => {
                format!("Commerce platform rejected the cart update with status {}", status.as_u16())
            }
            UpstreamError::Decode(_) => String::from("Commerce platform returned an unexpected response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CartWebhookError {
    #[error("invalid webhook request: {0}")]
    Validation(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("cart {cart_id} (version {cart_version}) has no line item with sku {sku}")]
    DataIntegrity {
        cart_id: String,
        cart_version: u64,
        sku: String,
    },
}

impl CartWebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CartWebhookError::Validation(_) => StatusCode::BAD_REQUEST,
            CartWebhookError::Upstream(e) => e.status_code(),
            CartWebhookError::DataIntegrity { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller. Upstream bodies and transport details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            CartWebhookError::Validation(reason) => reason.clone(),
            CartWebhookError::Upstream(e) => e.public_message(),
            CartWebhookError::DataIntegrity { sku, .. } => {
                format!("Cart does not contain the purchased item {}", sku)
            }
        }
    }
}
