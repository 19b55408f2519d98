//! Turns a spoken browser command into a backend conversation, and the model's
//! reply back into a [`FunctionCall`].

use std::borrow::Cow;

use serde_json::error::Category;

use crate::core::entities::{ConversationTurn, FunctionCall};

pub const SYSTEM_PROMPT: &str = r#"You are a function calling assistant for a voice-controlled browser. 
Parse user commands into JSON function calls with this exact structure:
{
  "name": "function_name",
  "parameters": {"key": "value"}
}

Available functions:
- open_browser(url: string) - Navigate to a URL
- search_web(query: string) - Search Google
- go_back() - Navigate back
- go_forward() - Navigate forward  
- refresh_page() - Reload page

Examples:
"open google" -> {"name": "open_browser", "parameters": {"url": "google.com"}}
"search for cats" -> {"name": "search_web", "parameters": {"query": "cats"}}
"go back" -> {"name": "go_back", "parameters": {}}

Return ONLY the JSON, no explanation."#;

/// Content assumed when the backend reply carries no text.
pub const EMPTY_REPLY: &str = "{}";

const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("not valid JSON: {0}")]
    Syntax(serde_json::Error),
    #[error("not a function call: {0}")]
    Shape(serde_json::Error),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => ParseError::Shape(e),
            Category::Syntax | Category::Eof | Category::Io => ParseError::Syntax(e),
        }
    }
}

/// System instruction followed by the user's command.
pub fn to_conversation(command: &str) -> Vec<serde_json::Value> {
    [ConversationTurn::system(SYSTEM_PROMPT), ConversationTurn::user(command)]
        .iter()
        .map(|t| serde_json::json!(t))
        .collect()
}

/// Removes markdown code fence markers from a model reply.
pub fn strip_code_fences(raw: &str) -> Cow<'_, str> {
    if !raw.contains(FENCE) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace(FENCE_JSON, "").replace(FENCE, "").trim().to_string())
}

pub fn decode_function_call(raw: &str) -> Result<FunctionCall, ParseError> {
    let call = serde_json::from_str(&strip_code_fences(raw))?;
    Ok(call)
}

/// What a command means when the model's answer is unusable: search for it.
pub fn fallback(command: &str) -> FunctionCall {
    FunctionCall::new("search_web").with_param("query", command)
}
