use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// A retrieval invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Tool arguments as parsed JSON (e.g. `{"query": "..."}`)
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// String argument by name, if present
    pub fn argument_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Set on tool messages: the call this message answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("안녕하세요");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "안녕하세요");
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("call-1", "retrieve_restaurants", json!({"query": "잠실 점심"}));
        assert_eq!(call.argument_str("query"), Some("잠실 점심"));
        assert_eq!(call.argument_str("missing"), None);
    }

    #[test]
    fn test_assistant_with_tool_calls() {
        let msg = Message::assistant("").with_tool_calls(vec![ToolCall::new(
            "call-1",
            "retrieve_restaurants",
            json!({"query": "냉면"}),
        )]);
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls[0].name, "retrieve_restaurants");
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::assistant("추천드립니다");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(!json.contains("tool_calls"));

        let tool_msg = Message::tool("[]", "call-1");
        let json = serde_json::to_string(&tool_msg).unwrap();
        assert!(json.contains("\"tool_call_id\":\"call-1\""));
    }
}
