use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};

/// Mistral chat completion request (OpenAI-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralChatCompletionRequest {
    /// The model to use for generation
    pub model: String,
    /// Input messages
    pub messages: Vec<MistralMessage>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for randomness (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Tools available to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<MistralTool>>,
    /// Tool choice strategy ("auto", "any", "none")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// A message in the Mistral conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralMessage {
    /// Role of the message sender
    pub role: MistralRole,
    /// Content of the message (may be absent on tool-call turns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls made by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<MistralToolCall>>,
    /// Tool call ID for tool result messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Role of a Mistral message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistralRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool result message
    Tool,
}

/// Tool definition in Mistral's function-calling format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralTool {
    /// Type of tool (always "function")
    #[serde(rename = "type")]
    pub r#type: String,
    /// Function definition
    pub function: MistralFunction,
}

/// Function definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralFunction {
    /// Function name
    pub name: String,
    /// Function description
    pub description: String,
    /// Function parameters schema
    pub parameters: RootSchema,
}

/// Tool call in a Mistral response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralToolCall {
    /// Unique identifier for the tool call
    pub id: String,
    /// Type of tool call (always "function")
    #[serde(rename = "type", default = "function_type")]
    pub r#type: String,
    /// Function call details
    pub function: MistralFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

/// Function call details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralFunctionCall {
    /// Function name
    pub name: String,
    /// Function arguments as a JSON string
    pub arguments: String,
}

/// Mistral chat completion response (OpenAI-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralChatCompletionResponse {
    /// Unique identifier for the response
    pub id: String,
    /// Object type (always "chat.completion")
    pub object: String,
    /// Unix timestamp of creation
    pub created: u64,
    /// Model used for generation
    pub model: String,
    /// Completion choices
    pub choices: Vec<MistralChoice>,
    /// Token usage information
    pub usage: MistralUsage,
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralChoice {
    /// Index of the choice
    pub index: u32,
    /// The message content
    pub message: MistralMessage,
    /// Reason why generation stopped
    #[serde(rename = "finish_reason")]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralUsage {
    /// Number of prompt tokens
    #[serde(rename = "prompt_tokens")]
    pub prompt_tokens: u32,
    /// Number of completion tokens
    #[serde(rename = "completion_tokens")]
    pub completion_tokens: u32,
    /// Total number of tokens
    #[serde(rename = "total_tokens")]
    pub total_tokens: u32,
}

/// Mistral API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralErrorResponse {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

// ---- Streaming (server-sent events) ----

/// One parsed SSE chunk of a streamed completion
#[derive(Debug, Clone, Deserialize)]
pub struct MistralStreamChunk {
    /// Delta choices in this chunk
    pub choices: Vec<MistralStreamChoice>,
}

/// A streamed choice delta
#[derive(Debug, Clone, Deserialize)]
pub struct MistralStreamChoice {
    /// Incremental message payload
    pub delta: MistralDelta,
    /// Set on the last chunk of a round
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental content of a streamed choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MistralDelta {
    /// Text fragment
    #[serde(default)]
    pub content: Option<String>,
    /// Tool call fragments, accumulated by index
    #[serde(default)]
    pub tool_calls: Option<Vec<MistralToolCallDelta>>,
}

/// A fragment of a streamed tool call
#[derive(Debug, Clone, Deserialize)]
pub struct MistralToolCallDelta {
    /// Position of the tool call this fragment belongs to
    #[serde(default)]
    pub index: Option<usize>,
    /// Tool call id (first fragment only)
    #[serde(default)]
    pub id: Option<String>,
    /// Function name/argument fragments
    #[serde(default)]
    pub function: Option<MistralFunctionCallDelta>,
}

/// Function fragments of a streamed tool call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MistralFunctionCallDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

impl MistralMessage {
    /// Create a new text message
    pub fn new<S: Into<String>>(role: MistralRole, content: S) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a system message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(MistralRole::System, content)
    }

    /// Create a user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(MistralRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(MistralRole::Assistant, content)
    }
}
