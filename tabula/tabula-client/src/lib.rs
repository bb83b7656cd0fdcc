use std::sync::Arc;

use serde_json::json;
use tabula_core::{
    TabulaClient,
    contracts::{
        TabulaChatRequest, TabulaChatResponse, TabulaExtractRequest, TabulaExtractResponse,
    },
    errors::TabulaError,
    logging::{ConsoleTabulaLogger, ITabulaLogger},
    normalizer::normalize,
};
use tabula_provider_vertexai::vertexai_client::TabulaClientVertexAI;
pub use tabula_provider_vertexai::contracts::ServiceAccount;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Tabula service.
#[derive(Debug, Clone, Default)]
pub struct TabulaClientConfig {
    /// Vertex AI endpoint template containing `{{MODEL}}`, e.g.
    /// "https://us-central1-aiplatform.googleapis.com/v1/projects/p/locations/us-central1/publishers/google/models/{{MODEL}}".
    pub vertexai_api_url: Option<String>,
    /// Service Account credentials for Vertex AI.
    pub vertexai_sa: Option<ServiceAccount>,
    /// Overrides the OAuth2 token endpoint.
    pub token_url: Option<String>,
    /// Model used when a request leaves `model` blank.
    pub default_model: Option<String>,
    /// Optional logger for requests and responses.
    pub logger: Option<Arc<dyn ITabulaLogger>>,
}

impl TabulaClientConfig {
    /// Reads `VERTEXAI_API_URL`, `VERTEXAI_SA_JSON` or `VERTEXAI_SA_PATH`,
    /// `VERTEXAI_TOKEN_URL` and `TABULA_MODEL`.
    pub fn from_env() -> Result<Self, TabulaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, TabulaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let vertexai_sa = match (non_blank("VERTEXAI_SA_JSON"), non_blank("VERTEXAI_SA_PATH")) {
            (Some(secret), _) => Some(ServiceAccount::from_json(&secret)?),
            (None, Some(path)) => Some(ServiceAccount::from_file(path)?),
            (None, None) => None,
        };

        Ok(Self {
            vertexai_api_url: non_blank("VERTEXAI_API_URL"),
            vertexai_sa,
            token_url: non_blank("VERTEXAI_TOKEN_URL"),
            default_model: non_blank("TABULA_MODEL"),
            logger: Some(Arc::new(ConsoleTabulaLogger)),
        })
    }
}

/// Entry point for callers: turns documents into datasets and runs chats.
///
/// Holds no per-request state; one instance can serve concurrent requests.
pub struct TabulaService {
    client: Arc<dyn TabulaClient>,
    default_model: String,
    logger: Option<Arc<dyn ITabulaLogger>>,
}

impl TabulaService {
    /// Builds a service backed by Vertex AI.
    pub fn new(config: TabulaClientConfig) -> Result<Self, TabulaError> {
        let sa = config
            .vertexai_sa
            .as_ref()
            .ok_or_else(|| TabulaError::Configuration("VertexAI Service Account not configured".to_string()))?;
        let url = config
            .vertexai_api_url
            .as_deref()
            .ok_or_else(|| TabulaError::Configuration("VertexAI API URL not configured".to_string()))?;

        let mut vertexai = TabulaClientVertexAI::new(sa, url.to_string());
        if let Some(token_url) = &config.token_url {
            vertexai = vertexai.with_token_url(token_url.clone());
        }
        Ok(Self::with_client(Arc::new(vertexai), config))
    }

    /// Builds a service around an existing client.
    pub fn with_client(client: Arc<dyn TabulaClient>, config: TabulaClientConfig) -> Self {
        Self {
            client,
            default_model: config.default_model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            logger: config.logger,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends the document and instruction to the model and normalizes the reply.
    ///
    /// Takes the request by value so the document buffer is released as soon
    /// as the provider call returns.
    pub async fn extract(&self, mut request: TabulaExtractRequest) -> Result<TabulaExtractResponse, TabulaError> {
        if request.model.trim().is_empty() {
            request.model = self.default_model.clone();
        }
        let correlation_id = request.correlation_id.clone();
        let model = request.model.clone();

        if let Some(logger) = &self.logger {
            logger.log_request(
                correlation_id.as_deref(),
                "extract",
                &model,
                json!({
                    "instruction": request.instruction,
                    "document_name": request.document.as_ref().and_then(|d| d.name.clone()),
                    "document_bytes": request.document.as_ref().map(|d| d.data.len()).unwrap_or(0),
                    "generation_config": request.generation_config,
                }),
            );
        }

        let reply = self.client.generate_extraction(&request).await;
        drop(request);
        let reply = reply.inspect_err(|e| self.log_failure(correlation_id.as_deref(), "extract", &model, e))?;

        let normalized = normalize(&reply.text)
            .inspect_err(|e| self.log_failure(correlation_id.as_deref(), "extract", &model, e))?;

        let response = TabulaExtractResponse {
            rows: normalized.rows,
            usage: reply.usage,
            strategy: normalized.strategy,
        };

        if let Some(logger) = &self.logger {
            logger.log_response(
                correlation_id.as_deref(),
                "extract",
                &model,
                json!({ "rows": response.rows.len(), "strategy": response.strategy }),
                serde_json::to_value(response.usage).ok(),
            );
        }

        Ok(response)
    }

    /// Runs one conversational turn; the reply text is returned as is.
    pub async fn chat(&self, mut request: TabulaChatRequest) -> Result<TabulaChatResponse, TabulaError> {
        if request.model.trim().is_empty() {
            request.model = self.default_model.clone();
        }
        let correlation_id = request.correlation_id.clone();
        let model = request.model.clone();

        if let Some(logger) = &self.logger {
            logger.log_request(
                correlation_id.as_deref(),
                "chat",
                &model,
                json!({
                    "turns": request.history.len(),
                    "attachments": request.attachments.len(),
                    "has_context": request.context.is_some(),
                    "generation_config": request.generation_config,
                }),
            );
        }

        let reply = self.client.generate_chat(&request).await;
        drop(request);
        let reply = reply.inspect_err(|e| self.log_failure(correlation_id.as_deref(), "chat", &model, e))?;

        let response = TabulaChatResponse {
            reply: reply.text,
            usage: reply.usage,
        };

        if let Some(logger) = &self.logger {
            logger.log_response(
                correlation_id.as_deref(),
                "chat",
                &model,
                json!({ "reply_chars": response.reply.chars().count() }),
                serde_json::to_value(response.usage).ok(),
            );
        }

        Ok(response)
    }

    fn log_failure(&self, correlation_id: Option<&str>, request_type: &str, model: &str, error: &TabulaError) {
        if let Some(logger) = &self.logger {
            logger.log_error(correlation_id, request_type, model, error.kind(), &error.to_string());
        }
    }
}
