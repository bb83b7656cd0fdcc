use tabula_core::errors::{MAX_ERROR_PAYLOAD_CHARS, TabulaError, bounded};
use tracing::info;

use crate::contracts::GoogleTokenResponse;

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Trades a signed assertion for a bearer token. One attempt, no caching.
#[derive(Clone)]
pub struct TokenExchanger {
    http: reqwest::Client,
    token_url: String,
}

impl TokenExchanger {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token_url)
    }

    pub fn with_client(http: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    pub async fn exchange(&self, assertion: &str) -> Result<String, TabulaError> {
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)];
        let res = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| TabulaError::AuthExchange(format!("token endpoint unreachable: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| TabulaError::AuthExchange(format!("failed to read token response: {e}")))?;

        match serde_json::from_str::<GoogleTokenResponse>(&body) {
            Ok(GoogleTokenResponse { error: Some(error), error_description, .. }) => {
                let description = error_description.filter(|d| !d.is_empty()).unwrap_or(error);
                Err(TabulaError::AuthExchange(bounded(&description, MAX_ERROR_PAYLOAD_CHARS)))
            }
            Ok(GoogleTokenResponse { access_token: Some(token), expires_in, .. })
                if status.is_success() && !token.is_empty() =>
            {
                info!(expires_in = ?expires_in, "Google: obtained access token");
                Ok(token)
            }
            _ => Err(TabulaError::AuthExchange(format!(
                "HTTP {}: {}",
                status.as_u16(),
                bounded(&body, MAX_ERROR_PAYLOAD_CHARS)
            ))),
        }
    }
}
