use super::{TabulaAttachment, TabulaChatTurn, TabulaGenerationConfig};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
pub struct TabulaChatRequest {

    #[serde(default)]
    pub model:String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    pub history:Vec<TabulaChatTurn>,

    /// Sent with the final user turn only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments:Vec<TabulaAttachment>,

    /// Grounding text injected ahead of the history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context:Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config:Option<TabulaGenerationConfig>,
}
