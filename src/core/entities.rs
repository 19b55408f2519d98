use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a dialogue. Turn order is dialogue order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A browser action directive: `{"name": "...", "parameters": {"k": "v"}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub parameters: HashMap<String, String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), parameters: HashMap::new() }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Payload posted to the inference backend's chat endpoint.
///
/// `messages` are kept as raw JSON so the chat relay can forward whatever the
/// client sent without reshaping it.
#[derive(Clone, Debug, Serialize)]
pub struct InferenceRequest {
    pub model: String,
    pub messages: Vec<serde_json::Value>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Decoded backend response body. Only `message.content` is interpreted.
#[derive(Clone, Debug)]
pub struct InferenceReply {
    pub raw: serde_json::Value,
}

impl InferenceReply {
    /// Assistant text, if the backend returned a string at `message.content`.
    pub fn content(&self) -> Option<&str> {
        self.raw.pointer("/message/content").and_then(|x| x.as_str())
    }
}
