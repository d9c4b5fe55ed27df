use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Chat Wire Model ============

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::System => write!(f, "system"),
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One ordered content segment of a chat message: plain text or a tool
/// invocation record. Order within a message is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text {
        text: String,
    },
    ToolInvocation {
        tool_name: String,
        #[ts(type = "any")]
        input: serde_json::Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },
}

/// One turn in a conversation. Never mutated after being marked complete;
/// the transcript holding it is session-scoped and unpersisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub parts: Vec<MessagePart>,
}

/// Request body of the chat proxy route: the caller's transcript, in order.
/// The server injects the system prompt itself; callers never supply it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatMessage {
    /// Create a message with a fresh id and a single text part.
    pub fn text(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            parts: vec![MessagePart::Text { text: text.into() }],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(ChatRole::Assistant, text)
    }

    /// Concatenated text parts, in order. Tool invocations are skipped.
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::ToolInvocation { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_parts_are_tagged() {
        let msg = ChatMessage::user("habari!");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["parts"][0]["type"], "text");
        assert_eq!(json["parts"][0]["text"], "habari!");
    }

    #[test]
    fn plain_text_skips_tool_invocations() {
        let msg = ChatMessage {
            id: "m1".into(),
            role: ChatRole::Assistant,
            parts: vec![
                MessagePart::Text {
                    text: "Let me check. ".into(),
                },
                MessagePart::ToolInvocation {
                    tool_name: "get_samakicash_help".into(),
                    input: serde_json::json!({"topic": "loans"}),
                    result: Some("Access microloans...".into()),
                },
                MessagePart::Text {
                    text: "Here is what I found.".into(),
                },
            ],
        };
        assert_eq!(msg.plain_text(), "Let me check. Here is what I found.");
    }
}
