use thiserror::Error;

/// Longest slice of a foreign payload (reply text, provider body) carried in an error.
pub const MAX_ERROR_PAYLOAD_CHARS: usize = 200;

/// Every failure an extraction or chat call can end with. None are retried.
#[derive(Debug, Error)]
pub enum TabulaError {
    #[error("service credential is unusable: {0}")]
    CredentialFormat(String),

    #[error("token exchange failed: {0}")]
    AuthExchange(String),

    #[error("provider returned HTTP {status}: {body}")]
    ProviderRequest { status: u16, body: String },

    #[error("provider response is malformed: {0}")]
    MalformedResponse(String),

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("could not parse model reply into rows: {preview}")]
    UnparsableResponse { preview: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TabulaError {
    /// Stable name for surfacing the failure class to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            TabulaError::CredentialFormat(_) => "credential_format",
            TabulaError::AuthExchange(_) => "auth_exchange",
            TabulaError::ProviderRequest { .. } => "provider_request",
            TabulaError::MalformedResponse(_) => "malformed_response",
            TabulaError::EmptyReply => "empty_reply",
            TabulaError::UnparsableResponse { .. } => "unparsable_response",
            TabulaError::Configuration(_) => "configuration",
        }
    }

    pub fn provider_request(status: u16, body: &str) -> Self {
        TabulaError::ProviderRequest {
            status,
            body: bounded(body, MAX_ERROR_PAYLOAD_CHARS),
        }
    }

    pub fn unparsable(raw: &str) -> Self {
        TabulaError::UnparsableResponse {
            preview: bounded(raw, MAX_ERROR_PAYLOAD_CHARS),
        }
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when something was cut.
pub fn bounded(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
