use crate::normalizer::ParseStrategy;

use super::{Dataset, TabulaUsage};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct TabulaExtractResponse {

    pub rows:Dataset,

    pub usage:TabulaUsage,

    pub strategy:ParseStrategy,
}
