#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabulaUsage {
    #[serde(default)]
    pub input_tokens: usize,

    #[serde(default)]
    pub output_tokens: usize,

    #[serde(default)]
    pub total_tokens: usize,
}
