use async_trait::async_trait;

use crate::contracts::{TabulaChatRequest, TabulaExtractRequest, TabulaGenerationReply};
use crate::errors::TabulaError;
pub mod contracts;
pub mod errors;
pub mod logging;
pub mod normalizer;

/// A generative-AI backend able to answer the two call shapes the service issues.
#[async_trait]
pub trait TabulaClient : Send + Sync {

    /// Single-turn request: optional document plus instruction.
    async fn generate_extraction(&self, request:&TabulaExtractRequest) -> Result<TabulaGenerationReply, TabulaError>;

    /// Multi-turn request over a conversation history.
    async fn generate_chat(&self, request:&TabulaChatRequest) -> Result<TabulaGenerationReply, TabulaError>;
}
