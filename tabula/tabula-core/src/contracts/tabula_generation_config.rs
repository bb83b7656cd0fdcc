#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct TabulaGenerationConfig {

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature:Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens:Option<usize>,
}
