use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::{
    client::{ChatModel, ChunkStream},
    error::AssistantError,
    mistral::types::{
        MistralChatCompletionRequest, MistralChatCompletionResponse, MistralErrorResponse,
        MistralMessage, MistralRole, MistralStreamChunk, MistralTool, MistralToolCall,
    },
    tools::{ToolCall, ToolChoice},
    types::{CompletionRequest, CompletionResponse, Role, StreamChunk, Usage},
};

/// Mistral chat model client
pub struct MistralClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl MistralClient {
    /// Create a new Mistral client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, AssistantError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(AssistantError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| AssistantError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: "https://api.mistral.ai".to_string(),
            model: crate::mistral::MISTRAL_LARGE_ID.to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn headers(&self) -> Result<HeaderMap, AssistantError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| AssistantError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Create a chat completion (non-streaming)
    pub async fn create_chat_completion(
        &self,
        request: MistralChatCompletionRequest,
    ) -> Result<MistralChatCompletionResponse, AssistantError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network { source: e })?;

        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                AssistantError::internal(format!("Failed to parse response: {}", e))
            })
        } else {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = serde_json::from_str::<MistralErrorResponse>(&error_text)
                .map(|e| e.message)
                .unwrap_or(error_text);

            match status {
                reqwest::StatusCode::BAD_REQUEST => Err(AssistantError::invalid_request(message)),
                reqwest::StatusCode::UNAUTHORIZED => Err(AssistantError::authentication(message)),
                reqwest::StatusCode::FORBIDDEN => Err(AssistantError::authentication(message)),
                reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    Err(AssistantError::rate_limit(message, retry_after))
                }
                _ => Err(AssistantError::api_error(status.as_u16(), message)),
            }
        }
    }

    /// Stream a chat completion as server-sent events. Text deltas are
    /// yielded as they arrive; tool calls accumulate across fragments and
    /// are emitted with the final chunk.
    pub fn stream_chat_completion(
        &self,
        mut request: MistralChatCompletionRequest,
    ) -> ChunkStream {
        request.stream = Some(true);
        let url = format!("{}/v1/chat/completions", self.base_url);
        let headers = self.headers();
        let http_client = self.http_client.clone();

        Box::pin(async_stream::stream! {
            let headers = match headers {
                Ok(h) => h,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let response = match http_client
                .post(&url)
                .headers(headers)
                .json(&request)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    yield Err(AssistantError::Network { source: e });
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let message = serde_json::from_str::<MistralErrorResponse>(&error_text)
                    .map(|e| e.message)
                    .unwrap_or(error_text);
                yield Err(match status {
                    reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                        AssistantError::authentication(message)
                    }
                    reqwest::StatusCode::TOO_MANY_REQUESTS => {
                        AssistantError::rate_limit(message, None)
                    }
                    _ => AssistantError::api_error(status.as_u16(), message),
                });
                return;
            }

            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();
            let mut pending_calls: Vec<PartialToolCall> = Vec::new();
            let mut done = false;

            'outer: while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(AssistantError::Network { source: e });
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline_pos) = buffer.find('\n') {
                    let line = buffer[..newline_pos].trim().to_string();
                    buffer = buffer[newline_pos + 1..].to_string();

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data == "[DONE]" {
                        done = true;
                        break 'outer;
                    }

                    let Ok(parsed) = serde_json::from_str::<MistralStreamChunk>(data) else {
                        tracing::debug!(%data, "skipping unparseable stream line");
                        continue;
                    };
                    for choice in parsed.choices {
                        if let Some(text) = choice.delta.content {
                            if !text.is_empty() {
                                yield Ok(StreamChunk {
                                    content: text,
                                    ..Default::default()
                                });
                            }
                        }
                        if let Some(fragments) = choice.delta.tool_calls {
                            accumulate_tool_calls(&mut pending_calls, fragments);
                        }
                        if choice.finish_reason.is_some() {
                            done = true;
                        }
                    }
                }
            }

            if !done {
                yield Err(AssistantError::internal(
                    "stream ended before completion",
                ));
                return;
            }

            yield Ok(StreamChunk {
                content: String::new(),
                is_finished: true,
                tool_calls: pending_calls.into_iter().map(PartialToolCall::finalize).collect(),
            });
        })
    }
}

/// A tool call under assembly from stream fragments
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl PartialToolCall {
    fn finalize(self) -> ToolCall {
        // Malformed argument text surfaces later as a ToolArgumentParse
        // failure rather than killing the stream here
        let arguments = serde_json::from_str(&self.arguments).unwrap_or(Value::Null);
        ToolCall::new(self.id, self.name, arguments)
    }
}

fn accumulate_tool_calls(
    pending: &mut Vec<PartialToolCall>,
    fragments: Vec<crate::mistral::types::MistralToolCallDelta>,
) {
    for fragment in fragments {
        let index = fragment.index.unwrap_or(pending.len().saturating_sub(1));
        while pending.len() <= index {
            pending.push(PartialToolCall {
                id: String::new(),
                name: String::new(),
                arguments: String::new(),
            });
        }
        let slot = &mut pending[index];
        if let Some(id) = fragment.id {
            slot.id = id;
        }
        if let Some(function) = fragment.function {
            if let Some(name) = function.name {
                slot.name.push_str(&name);
            }
            if let Some(arguments) = function.arguments {
                slot.arguments.push_str(&arguments);
            }
        }
    }
}

fn to_mistral_request(
    request: CompletionRequest,
    stream: bool,
) -> MistralChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(system) = request.system {
        messages.push(MistralMessage::system(system));
    }
    for msg in request.messages {
        let role = match msg.role {
            Role::User => MistralRole::User,
            Role::Assistant => MistralRole::Assistant,
            Role::System => MistralRole::System,
        };
        messages.push(MistralMessage::new(role, msg.content));
    }

    let tools = request.tools.map(|tools| {
        tools
            .into_iter()
            .map(|tool| MistralTool {
                r#type: "function".to_string(),
                function: crate::mistral::types::MistralFunction {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters().clone(),
                },
            })
            .collect()
    });

    let tool_choice = request.tool_choice.map(|choice| {
        match choice {
            ToolChoice::Auto => "auto",
            ToolChoice::Required => "any",
            ToolChoice::None => "none",
        }
        .to_string()
    });

    MistralChatCompletionRequest {
        model: request.model,
        messages,
        max_tokens: Some(request.max_tokens),
        temperature: request.temperature,
        top_p: None,
        stream: stream.then_some(true),
        tools,
        tool_choice,
    }
}

fn from_tool_calls(tool_calls: Vec<MistralToolCall>) -> Vec<ToolCall> {
    tool_calls
        .into_iter()
        .map(|call| {
            let arguments =
                serde_json::from_str(&call.function.arguments).unwrap_or(Value::Null);
            ToolCall::new(call.id, call.function.name, arguments)
        })
        .collect()
}

#[async_trait]
impl ChatModel for MistralClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AssistantError> {
        let mistral_request = to_mistral_request(request, false);
        let response = self.create_chat_completion(mistral_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::internal("response contained no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .map(from_tool_calls)
            .filter(|calls| !calls.is_empty());

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            role: Role::Assistant,
            usage: Usage {
                input_tokens: response.usage.prompt_tokens,
                output_tokens: response.usage.completion_tokens,
            },
            finish_reason: choice.finish_reason,
            tool_calls,
        })
    }

    fn provider_name(&self) -> &str {
        crate::mistral::MISTRAL
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AssistantError> {
        let mistral_request = to_mistral_request(request, true);
        Ok(self.stream_chat_completion(mistral_request))
    }
}
