use super::{TabulaAttachment, TabulaGenerationConfig};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
pub struct TabulaExtractRequest {

    #[serde(default)]
    pub model:String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document:Option<TabulaAttachment>,

    pub instruction:String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config:Option<TabulaGenerationConfig>,
}
