use actix_web::web;
use async_trait::async_trait;
use samaki_api::AppState;
use samaki_assistant::client::ChatModel;
use samaki_assistant::engine::AssistantEngine;
use samaki_assistant::error::AssistantError;
use samaki_assistant::tools::ToolCall;
use samaki_assistant::types::{CompletionRequest, CompletionResponse, Role, Usage};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted model for route tests: pops responses front-to-back.
pub struct MockChatModel {
    responses: Mutex<Vec<CompletionResponse>>,
    delay: Option<Duration>,
    fail_with: Option<String>,
}

impl MockChatModel {
    pub fn with_responses(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            delay: None,
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            delay: None,
            fail_with: Some(message.to_string()),
        }
    }

    /// Delay every completion; used to exercise the turn time cap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            content: text.to_string(),
            role: Role::Assistant,
            usage: Usage::default(),
            finish_reason: Some("stop".to_string()),
            tool_calls: None,
        }
    }

    pub fn tool_call_response(name: &str, arguments: serde_json::Value) -> CompletionResponse {
        CompletionResponse {
            content: String::new(),
            role: Role::Assistant,
            usage: Usage::default(),
            finish_reason: Some("tool_calls".to_string()),
            tool_calls: Some(vec![ToolCall::new(
                "call_1".to_string(),
                name.to_string(),
                arguments,
            )]),
        }
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, AssistantError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.fail_with {
            return Err(AssistantError::api_error(500, message.clone()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(AssistantError::internal("mock ran out of responses"));
        }
        Ok(responses.remove(0))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn app_state(model: MockChatModel) -> web::Data<AppState> {
    let engine = AssistantEngine::new(Arc::new(model));
    web::Data::new(AppState::new(Arc::new(engine)))
}

pub fn app_state_with_timeout(model: MockChatModel, timeout: Duration) -> web::Data<AppState> {
    let engine = AssistantEngine::new(Arc::new(model));
    web::Data::new(AppState::new(Arc::new(engine)).with_turn_timeout(timeout))
}

/// Decode an SSE body into its `data:` JSON payloads.
pub fn parse_sse_events(body: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(body)
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .filter_map(|data| serde_json::from_str(data).ok())
        .collect()
}
