use super::TabulaUsage;

/// Raw model output, consumed right away by the normalizer or returned as a chat reply.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
pub struct TabulaGenerationReply {

    pub text:String,

    pub usage:TabulaUsage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason:Option<String>,
}
