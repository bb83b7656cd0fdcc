use async_trait::async_trait;
use tabula_core::{
    TabulaClient,
    contracts::{TabulaChatRequest, TabulaExtractRequest, TabulaGenerationReply},
    errors::{MAX_ERROR_PAYLOAD_CHARS, TabulaError, bounded},
};
use tracing::{info, warn};

use crate::contracts::{GoogleGenerateRequest, GoogleGenerateResponse, ServiceAccount};
use crate::credentials::CredentialSigner;
use crate::token::{GOOGLE_TOKEN_URL, TokenExchanger};

/// Vertex AI `generateContent` client.
///
/// Every call signs a fresh assertion and exchanges it for its own access
/// token; nothing is shared between calls.
#[derive(Clone)]
pub struct TabulaClientVertexAI {
    pub account: ServiceAccount,
    /// Endpoint template with a `{{MODEL}}` placeholder.
    pub api_url: String,
    pub token_url: String,
    http: reqwest::Client,
}

impl TabulaClientVertexAI {
    pub fn new(sa: &ServiceAccount, api_url: String) -> Self {
        Self {
            account: sa.clone(),
            api_url,
            token_url: GOOGLE_TOKEN_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub async fn fetch_access_token(&self) -> Result<String, TabulaError> {
        info!("Google: creating new access token");
        let assertion = CredentialSigner::new(&self.account)?.sign()?;
        TokenExchanger::with_client(self.http.clone(), &self.token_url)
            .exchange(&assertion)
            .await
    }

    pub fn endpoint(&self, model: &str) -> String {
        self.api_url.replace("{{MODEL}}", model) + ":generateContent"
    }

    async fn generate(
        &self,
        model: &str,
        request: GoogleGenerateRequest,
    ) -> Result<TabulaGenerationReply, TabulaError> {
        let url = self.endpoint(model);
        let token = self.fetch_access_token().await?;

        let body = serde_json::to_vec(&request)
            .map_err(|e| TabulaError::Configuration(format!("failed to encode request: {e}")))?;
        drop(request);

        info!(model, bytes = body.len(), "Vertex AI: sending generateContent request");
        let res = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TabulaError::ProviderRequest {
                status: 0,
                body: bounded(&e.to_string(), MAX_ERROR_PAYLOAD_CHARS),
            })?;

        let status = res.status();
        let res_text = res.text().await.map_err(|e| {
            TabulaError::MalformedResponse(format!("failed to read response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(TabulaError::provider_request(status.as_u16(), &res_text));
        }

        let response: GoogleGenerateResponse = serde_json::from_str(&res_text).map_err(|e| {
            TabulaError::MalformedResponse(format!(
                "{e}: {}",
                bounded(&res_text, MAX_ERROR_PAYLOAD_CHARS)
            ))
        })?;
        drop(res_text);

        let reply = response.into_reply()?;
        if reply.finish_reason.as_deref() == Some("MAX_TOKENS") {
            warn!(model, "Vertex AI: reply stopped at the output token limit");
        }
        info!(
            model,
            input_tokens = reply.usage.input_tokens,
            output_tokens = reply.usage.output_tokens,
            "Vertex AI: reply received"
        );
        Ok(reply)
    }
}

#[async_trait]
impl TabulaClient for TabulaClientVertexAI {
    async fn generate_extraction(
        &self,
        request: &TabulaExtractRequest,
    ) -> Result<TabulaGenerationReply, TabulaError> {
        self.generate(&request.model, GoogleGenerateRequest::for_extraction(request))
            .await
    }

    async fn generate_chat(
        &self,
        request: &TabulaChatRequest,
    ) -> Result<TabulaGenerationReply, TabulaError> {
        self.generate(&request.model, GoogleGenerateRequest::for_chat(request))
            .await
    }
}
