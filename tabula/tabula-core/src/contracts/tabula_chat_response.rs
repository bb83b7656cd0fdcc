use super::TabulaUsage;

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct TabulaChatResponse {

    pub reply:String,

    pub usage:TabulaUsage,
}
