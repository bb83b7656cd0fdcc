use std::sync::Arc;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tabula_client::TabulaService;
use tabula_core::{
    contracts::{
        TabulaAttachment, TabulaChatRequest, TabulaChatResponse, TabulaChatTurn,
        TabulaExtractRequest, TabulaExtractResponse, TabulaGenerationConfig,
    },
    errors::TabulaError,
};
use tower_http::cors::CorsLayer;
use tracing::error;

/// Inline documents arrive base64-encoded inside the JSON body.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub struct AppState {
    pub service: TabulaService,
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/extract", post(handle_extract))
        .route("/v1/chat", post(handle_chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ExtractPayload {
    #[serde(default)]
    pub model: String,
    pub correlation_id: Option<String>,
    pub instruction: String,
    pub document_base64: Option<String>,
    pub document_name: Option<String>,
    pub document_mime_type: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AttachmentPayload {
    pub data_base64: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatTurnPayload {
    pub role: String,
    #[serde(default)]
    pub content: String,
    /// Only honoured on the final user turn.
    #[serde(default)]
    pub attachments: Vec<AttachmentPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub model: String,
    pub correlation_id: Option<String>,
    pub history: Vec<ChatTurnPayload>,
    #[serde(default)]
    pub attachments: Vec<AttachmentPayload>,
    pub context: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<usize>,
}

/// Error body: `{ "kind": ..., "message": ... }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "bad_request",
            message: message.into(),
        }
    }
}

impl From<TabulaError> for ApiError {
    fn from(err: TabulaError) -> Self {
        let status = match &err {
            TabulaError::CredentialFormat(_) | TabulaError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TabulaError::AuthExchange(_)
            | TabulaError::ProviderRequest { .. }
            | TabulaError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            TabulaError::EmptyReply | TabulaError::UnparsableResponse { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "kind": self.kind, "message": self.message }))).into_response()
    }
}

fn generation_config(temperature: Option<f32>, max_output_tokens: Option<usize>) -> Option<TabulaGenerationConfig> {
    (temperature.is_some() || max_output_tokens.is_some()).then_some(TabulaGenerationConfig {
        temperature,
        max_output_tokens,
    })
}

fn decode_attachment(
    data_base64: &str,
    name: Option<String>,
    mime_type: Option<String>,
) -> Result<TabulaAttachment, ApiError> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(data_base64.trim())
        .map_err(|e| ApiError::bad_request(format!("attachment is not valid base64: {e}")))?;
    Ok(TabulaAttachment { data, mime_type, name })
}

fn decode_attachments(payloads: Vec<AttachmentPayload>) -> Result<Vec<TabulaAttachment>, ApiError> {
    payloads
        .into_iter()
        .map(|a| decode_attachment(&a.data_base64, a.name, a.mime_type))
        .collect()
}

impl ExtractPayload {
    pub fn into_request(self) -> Result<TabulaExtractRequest, ApiError> {
        if self.instruction.trim().is_empty() {
            return Err(ApiError::bad_request("instruction must not be empty"));
        }
        let document = match self.document_base64.as_deref() {
            Some(data) => Some(decode_attachment(data, self.document_name, self.document_mime_type)?),
            None => None,
        };
        Ok(TabulaExtractRequest {
            model: self.model,
            correlation_id: self.correlation_id,
            document,
            instruction: self.instruction,
            generation_config: generation_config(self.temperature, self.max_output_tokens),
        })
    }
}

impl ChatPayload {
    pub fn into_request(self) -> Result<TabulaChatRequest, ApiError> {
        if self.history.is_empty() {
            return Err(ApiError::bad_request("history must contain at least one turn"));
        }
        let attachments = decode_attachments(self.attachments)?;
        let history = self
            .history
            .into_iter()
            .map(|turn| {
                Ok(TabulaChatTurn {
                    role: turn.role,
                    content: turn.content,
                    attachments: decode_attachments(turn.attachments)?,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        Ok(TabulaChatRequest {
            model: self.model,
            correlation_id: self.correlation_id,
            history,
            attachments,
            context: self.context,
            generation_config: generation_config(self.temperature, self.max_output_tokens),
        })
    }
}

async fn handle_extract(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExtractPayload>,
) -> Result<Json<TabulaExtractResponse>, ApiError> {
    let request = payload.into_request()?;
    match state.service.extract(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Extract error: {}", e);
            Err(e.into())
        }
    }
}

async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<TabulaChatResponse>, ApiError> {
    let request = payload.into_request()?;
    match state.service.chat(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Chat error: {}", e);
            Err(e.into())
        }
    }
}
