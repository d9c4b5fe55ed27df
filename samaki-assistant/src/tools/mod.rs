use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AssistantError;

/// A tool that can be called by the model
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    parameters: RootSchema,
}

impl ToolDefinition {
    fn from_type<T: schemars::JsonSchema>(name: &str, description: &str) -> Self {
        // Use inline_subschemas to avoid allOf/$ref which have limited
        // support in provider APIs
        use schemars::gen::SchemaSettings;

        let settings = SchemaSettings::draft07().with(|s| {
            s.inline_subschemas = true;
        });
        let generator = settings.into_generator();
        let parameters = generator.into_root_schema_for::<T>();

        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &RootSchema {
        &self.parameters
    }
}

/// A tool call from the model
#[derive(Debug, Clone)]
pub struct ToolCall {
    id: String,
    name: String,
    arguments: Value,
}

impl ToolCall {
    pub fn new(id: String, name: String, arguments: Value) -> Self {
        Self {
            id,
            name,
            arguments,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse arguments into a strongly-typed struct
    pub fn parse_arguments<T>(&self) -> Result<T, AssistantError>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_json::from_value(self.arguments.clone()).map_err(|e| {
            AssistantError::ToolArgumentParse {
                tool_name: self.name.clone(),
                source: e,
            }
        })
    }

    /// Get raw JSON arguments
    pub fn raw_arguments(&self) -> &Value {
        &self.arguments
    }
}

/// Tool choice strategy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to use tools
    #[default]
    Auto,
    /// Force the model to use at least one tool
    Required,
    /// Disable tool use
    None,
}

/// The assistant's callable capabilities. A closed set: adding a tool means
/// adding a variant, its input type, and its arm in `execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTool {
    /// Canned help lookup over SamakiCash features
    HelpLookup,
    /// Hand the conversation off to human support
    HumanHandoff,
}

/// Input for [`AssistantTool::HelpLookup`]
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpLookupInput {
    /// The topic the user needs help with
    pub topic: String,
}

/// Input for [`AssistantTool::HumanHandoff`]
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HumanHandoffInput {
    /// Why the user needs human support
    pub reason: String,
}

pub const SUPPORT_PHONE: &str = "+255 123 456 789";
pub const SUPPORT_EMAIL: &str = "support@samakicash.com";

/// Topic table for the help tool. Matching is a case-insensitive substring
/// check of the user's topic against each key.
const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "upload fish photos",
        "To upload fish photos: 1) Go to Dashboard, 2) Click \"Add Catch\", 3) Take or select photo, 4) Our AI will analyze and provide price recommendations.",
    ),
    (
        "credit score",
        "Your credit score is calculated based on fishing activity, loan repayment, catch reporting, and engagement. Check it in the Credit section.",
    ),
    (
        "insurance",
        "We offer boat, equipment, catch, and personal accident insurance. Get quotes in the Insurance section.",
    ),
    (
        "offline mode",
        "SamakiCash works offline! You can log catches and view data without internet. Sync occurs when you reconnect.",
    ),
    (
        "pricing",
        "Our AI analyzes your fish photos to identify species, size, and quality, then gives market-based pricing recommendations.",
    ),
    (
        "loans",
        "Access microloans based on credit score and fishing history. Apply in the Credit section.",
    ),
];

impl AssistantTool {
    pub const ALL: [AssistantTool; 2] = [AssistantTool::HelpLookup, AssistantTool::HumanHandoff];

    /// Name of the tool on the wire
    pub fn wire_name(&self) -> &'static str {
        match self {
            AssistantTool::HelpLookup => "get_samakicash_help",
            AssistantTool::HumanHandoff => "connect_to_human",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_name() == name)
    }

    /// Schema-bearing definition advertised to the model
    pub fn definition(&self) -> ToolDefinition {
        match self {
            AssistantTool::HelpLookup => ToolDefinition::from_type::<HelpLookupInput>(
                self.wire_name(),
                "Get help information about SamakiCash features and services",
            ),
            AssistantTool::HumanHandoff => ToolDefinition::from_type::<HumanHandoffInput>(
                self.wire_name(),
                "Connect the user to human support for personalized assistance",
            ),
        }
    }

    /// Definitions of every registered tool, in registry order
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|t| t.definition()).collect()
    }

    /// Validate the arguments against this tool's input type and run it.
    /// Both tools are deterministic and infallible once their input parses.
    pub fn execute(&self, arguments: &Value) -> Result<String, AssistantError> {
        match self {
            AssistantTool::HelpLookup => {
                let input: HelpLookupInput =
                    parse_input(self.wire_name(), arguments)?;
                Ok(help_lookup(&input.topic))
            }
            AssistantTool::HumanHandoff => {
                let input: HumanHandoffInput =
                    parse_input(self.wire_name(), arguments)?;
                Ok(human_handoff(&input.reason))
            }
        }
    }
}

/// Dispatch a model-issued tool call against the registry. Unknown names
/// and malformed arguments are tool failures, not panics.
pub fn dispatch_tool_call(call: &ToolCall) -> Result<String, AssistantError> {
    let tool = AssistantTool::from_wire_name(call.name())
        .ok_or_else(|| AssistantError::tool_execution(format!("unknown tool: {}", call.name())))?;
    let result = tool.execute(call.raw_arguments())?;
    tracing::debug!(
        tool_name = call.name(),
        tool_id = call.id(),
        "tool executed"
    );
    Ok(result)
}

fn parse_input<T: for<'de> Deserialize<'de>>(
    tool_name: &str,
    arguments: &Value,
) -> Result<T, AssistantError> {
    serde_json::from_value(arguments.clone()).map_err(|e| AssistantError::ToolArgumentParse {
        tool_name: tool_name.to_string(),
        source: e,
    })
}

fn help_lookup(topic: &str) -> String {
    let lower_topic = topic.to_lowercase();
    for (key, answer) in HELP_TOPICS {
        if lower_topic.contains(key) {
            return (*answer).to_string();
        }
    }

    "I can help you with uploading photos, checking credit scores, insurance, offline mode, \
     pricing, and loans. Which topic would you like to know more about?"
        .to_string()
}

fn human_handoff(reason: &str) -> String {
    format!(
        "Connecting you to human support for: {}. Call {} or email {} for immediate assistance.",
        reason, SUPPORT_PHONE, SUPPORT_EMAIL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn help_lookup_matches_case_insensitive_substring() {
        let call = ToolCall::new(
            "call_1".into(),
            "get_samakicash_help".into(),
            json!({"topic": "How do I upload fish photos?"}),
        );
        let result = dispatch_tool_call(&call).unwrap();
        assert!(result.starts_with("To upload fish photos:"));
    }

    #[test]
    fn help_lookup_falls_back_to_topic_listing() {
        let call = ToolCall::new(
            "call_2".into(),
            "get_samakicash_help".into(),
            json!({"topic": "boat engines"}),
        );
        let result = dispatch_tool_call(&call).unwrap();
        assert!(result.contains("Which topic would you like to know more about?"));
        assert!(result.contains("insurance"));
        assert!(result.contains("loans"));
    }

    #[test]
    fn human_handoff_embeds_reason_and_contact_channels() {
        let call = ToolCall::new(
            "call_3".into(),
            "connect_to_human".into(),
            json!({"reason": "loan dispute"}),
        );
        let result = dispatch_tool_call(&call).unwrap();
        assert!(result.contains("loan dispute"));
        assert!(result.contains(SUPPORT_PHONE));
        assert!(result.contains(SUPPORT_EMAIL));
    }

    #[test]
    fn unknown_tool_is_an_execution_error() {
        let call = ToolCall::new("call_4".into(), "open_ticket".into(), json!({}));
        assert!(matches!(
            dispatch_tool_call(&call).unwrap_err(),
            AssistantError::ToolExecutionFailed { .. }
        ));
    }

    #[test]
    fn malformed_arguments_are_a_parse_error() {
        let call = ToolCall::new(
            "call_5".into(),
            "connect_to_human".into(),
            json!({"cause": "wrong field"}),
        );
        assert!(matches!(
            dispatch_tool_call(&call).unwrap_err(),
            AssistantError::ToolArgumentParse { .. }
        ));
    }

    #[test]
    fn definitions_cover_the_whole_registry() {
        let defs = AssistantTool::definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name(), "get_samakicash_help");
        assert_eq!(defs[1].name(), "connect_to_human");
        assert!(!defs[0].description().is_empty());
    }

    #[test]
    fn wire_names_round_trip() {
        for tool in AssistantTool::ALL {
            assert_eq!(AssistantTool::from_wire_name(tool.wire_name()), Some(tool));
        }
        assert_eq!(AssistantTool::from_wire_name("nope"), None);
    }
}
