pub mod gemini;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use serde_json::Value;

use super::LlmError;
use crate::models::chat::{ ChatRequest, ChatRole };

pub const FALLBACK_REPLY: &str = "I apologize, but I cannot generate a response at the moment.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiContent {
    pub role: ChatRole,
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn text(role: ChatRole, text: impl Into<String>) -> Self {
        Self { role, parts: vec![GeminiPart { text: text.into() }] }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends one `generateContent` call and returns the raw success body.
    async fn generate(&self, contents: &[GeminiContent]) -> Result<Value, LlmError>;

    fn get_model(&self) -> String;
}

/// History turns in order, then the new message as the final user turn.
pub fn build_contents(request: &ChatRequest) -> Vec<GeminiContent> {
    request.conversation_history
        .iter()
        .map(|turn| GeminiContent::text(turn.role, turn.content.clone()))
        .chain(std::iter::once(GeminiContent::text(ChatRole::User, request.message.clone())))
        .collect()
}

/// `candidates[0].content.parts[0].text`, or `None` when any step is absent
/// or the text is empty.
pub fn extract_reply_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.is_empty())
}
