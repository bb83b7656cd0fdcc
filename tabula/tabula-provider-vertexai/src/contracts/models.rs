use serde::{Deserialize, Serialize};
use tabula_core::contracts::{
    TabulaAttachment, TabulaChatRequest, TabulaExtractRequest, TabulaGenerationConfig,
    TabulaGenerationReply, TabulaUsage,
};
use tabula_core::errors::TabulaError;
use tracing::warn;

/// Appended to every extraction instruction. Models tend to keep producing
/// plausible rows after the document runs out; this forbids it.
pub const STRICT_EXTRACTION_DIRECTIVE: &str = "\n\nSTRICT EXTRACTION RULES:\n\
- Extract only content that is actually present in the provided document.\n\
- Do not invent, infer or complete items that are not written in the document.\n\
- Stop as soon as the last real item of the document has been extracted.\n\
- Leave a field empty when the document does not provide its value.";

pub const EXTRACTION_DEFAULT_TEMPERATURE: f32 = 0.0;
pub const EXTRACTION_DEFAULT_MAX_TOKENS: usize = 65_536;
pub const CHAT_DEFAULT_TEMPERATURE: f32 = 0.7;
pub const CHAT_DEFAULT_MAX_TOKENS: usize = 8_192;

pub const CONTEXT_PREAMBLE: &str = "Use the following context for this conversation:\n\n";
pub const CONTEXT_ACKNOWLEDGEMENT: &str = "Understood. I will ground my answers in this context.";

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleGenerateRequest {
    pub contents: Vec<GoogleContent>,

    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GoogleParameters>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GoogleContent {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<GooglePart>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct GooglePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GoogleInlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GoogleInlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct GoogleParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<usize>,
}

impl GooglePart {
    pub fn text(text: impl Into<String>) -> GooglePart {
        GooglePart {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline(attachment: &TabulaAttachment) -> GooglePart {
        GooglePart {
            inline_data: Some(GoogleInlineData {
                mime_type: attachment.resolved_mime_type(),
                data: base64::Engine::encode(
                    &base64::engine::general_purpose::STANDARD,
                    &attachment.data,
                ),
            }),
            ..Default::default()
        }
    }
}

impl GoogleContent {
    /// A turn holding one text part, or no parts when the text is blank.
    pub fn text(role: &str, text: &str) -> GoogleContent {
        let parts = if text.trim().is_empty() {
            vec![]
        } else {
            vec![GooglePart::text(text)]
        };
        GoogleContent {
            role: role.to_owned(),
            parts,
        }
    }
}

impl GoogleParameters {
    pub fn resolve(
        config: Option<&TabulaGenerationConfig>,
        default_temperature: f32,
        default_max_tokens: usize,
    ) -> GoogleParameters {
        let max_output_tokens = config
            .and_then(|c| c.max_output_tokens)
            .filter(|n| *n > 0)
            .unwrap_or(default_max_tokens);
        GoogleParameters {
            temperature: Some(resolve_temperature(
                config.and_then(|c| c.temperature),
                default_temperature,
            )),
            max_output_tokens: Some(max_output_tokens),
        }
    }
}

/// NaN falls back to the default; anything outside `[0, 1]` is clamped.
pub fn resolve_temperature(requested: Option<f32>, default: f32) -> f32 {
    match requested {
        None => default,
        Some(t) if t.is_nan() => default,
        Some(t) if !(0.0..=1.0).contains(&t) => {
            let clamped = t.clamp(0.0, 1.0);
            warn!(requested = t, clamped, "temperature out of range, clamping");
            clamped
        }
        Some(t) => t,
    }
}

impl GoogleGenerateRequest {
    /// Single user turn: the document (if any) followed by the instruction.
    pub fn for_extraction(source: &TabulaExtractRequest) -> GoogleGenerateRequest {
        let mut parts = Vec::with_capacity(2);
        if let Some(document) = source.document.as_ref().filter(|d| !d.data.is_empty()) {
            parts.push(GooglePart::inline(document));
        }
        parts.push(GooglePart::text(format!(
            "{}{}",
            source.instruction, STRICT_EXTRACTION_DIRECTIVE
        )));

        GoogleGenerateRequest {
            contents: vec![GoogleContent {
                role: "user".to_owned(),
                parts,
            }],
            generation_config: Some(GoogleParameters::resolve(
                source.generation_config.as_ref(),
                EXTRACTION_DEFAULT_TEMPERATURE,
                EXTRACTION_DEFAULT_MAX_TOKENS,
            )),
        }
    }

    /// Context preamble, then history as text only. The final user turn's own
    /// attachments and the request's attachments ride on that turn; earlier
    /// turns never resend theirs.
    pub fn for_chat(source: &TabulaChatRequest) -> GoogleGenerateRequest {
        let mut contents = Vec::with_capacity(source.history.len() + 3);

        if let Some(context) = source.context.as_deref().filter(|c| !c.trim().is_empty()) {
            contents.push(GoogleContent::text("user", &format!("{CONTEXT_PREAMBLE}{context}")));
            contents.push(GoogleContent::text("model", CONTEXT_ACKNOWLEDGEMENT));
        }

        for turn in &source.history {
            let content = GoogleContent::text(&to_google_role(&turn.role), &turn.content);
            if !content.parts.is_empty() {
                contents.push(content);
            }
        }

        let final_user_turn = source.history.last().filter(|t| t.is_user());
        let mut attachments: Vec<&TabulaAttachment> = final_user_turn
            .map(|t| t.attachments.iter().collect())
            .unwrap_or_default();
        attachments.extend(&source.attachments);

        if !attachments.is_empty() {
            let ends_with_user = final_user_turn.is_some_and(|t| !t.content.trim().is_empty());
            if !ends_with_user {
                contents.push(GoogleContent {
                    role: "user".to_owned(),
                    parts: vec![],
                });
            }
            if let Some(last) = contents.last_mut() {
                let mut parts: Vec<GooglePart> = attachments.into_iter().map(GooglePart::inline).collect();
                parts.append(&mut last.parts);
                last.parts = parts;
            }
        }

        GoogleGenerateRequest {
            contents,
            generation_config: Some(GoogleParameters::resolve(
                source.generation_config.as_ref(),
                CHAT_DEFAULT_TEMPERATURE,
                CHAT_DEFAULT_MAX_TOKENS,
            )),
        }
    }
}

pub fn to_google_role(input: &str) -> String {
    match input {
        "assistant" | "model" => "model".to_owned(),
        _ => "user".to_owned(),
    }
}

/*
{
    "candidates": [
        {
            "content": {
                "role": "model",
                "parts": [ { "text": "S.No | Question\n1 | What is X?" } ]
            },
            "finishReason": "STOP"
        }
    ],
    "usageMetadata": {
        "promptTokenCount": 34,
        "candidatesTokenCount": 176,
        "totalTokenCount": 395
    },
    "modelVersion": "gemini-2.5-flash"
}
*/

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleGenerateResponse {
    #[serde(default)]
    pub candidates: Vec<GoogleCandidate>,
    #[serde(rename = "usageMetadata", default)]
    pub usage_metadata: Option<GoogleUsageMetadata>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleCandidate {
    #[serde(default)]
    pub content: Option<GoogleContent>,

    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct GoogleUsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: Option<usize>,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: Option<usize>,
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: Option<usize>,
}

impl GoogleUsageMetadata {
    pub fn to_usage(&self) -> TabulaUsage {
        let input_tokens = self.prompt_token_count.unwrap_or_default();
        let output_tokens = self.candidates_token_count.unwrap_or_default();
        TabulaUsage {
            input_tokens,
            output_tokens,
            total_tokens: self.total_token_count.unwrap_or(input_tokens + output_tokens),
        }
    }
}

impl GoogleGenerateResponse {
    /// Text of the first candidate with thought parts left out.
    pub fn into_reply(self) -> Result<TabulaGenerationReply, TabulaError> {
        let usage = self
            .usage_metadata
            .as_ref()
            .map(GoogleUsageMetadata::to_usage)
            .unwrap_or_default();

        let GoogleCandidate { content, finish_reason } = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TabulaError::MalformedResponse("response has no candidates".to_string()))?;

        let content = content.ok_or_else(|| {
            TabulaError::MalformedResponse(format!(
                "candidate has no content (finishReason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        let texts: Vec<String> = content
            .parts
            .into_iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text)
            .collect();
        if texts.is_empty() {
            return Err(TabulaError::MalformedResponse(
                "candidate content has no text parts".to_string(),
            ));
        }

        Ok(TabulaGenerationReply {
            text: texts.concat(),
            usage,
            finish_reason,
        })
    }
}
