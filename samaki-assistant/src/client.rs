use crate::{
    error::AssistantError,
    types::{CompletionRequest, CompletionResponse, StreamChunk},
};
use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

/// Stream of completion chunks
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AssistantError>> + Send>>;

/// Core trait for chat model bindings
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete a request (non-streaming)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AssistantError>;

    /// Get provider name (e.g., "mistral")
    fn provider_name(&self) -> &str;

    /// Get model name (e.g., "mistral-large-latest")
    fn model_name(&self) -> &str;

    /// Check if streaming is supported
    fn supports_streaming(&self) -> bool {
        false
    }

    /// Stream completion (optional, returns error if not supported)
    fn stream_complete(&self, _request: CompletionRequest) -> Result<ChunkStream, AssistantError> {
        Err(AssistantError::not_supported("Streaming not supported"))
    }
}
