use log::{ error, warn };
use serde_json::Value;
use std::sync::Arc;

use crate::error::RelayError;
use crate::llm::chat::{ build_contents, extract_reply_text, ChatClient, FALLBACK_REPLY };
use crate::models::chat::{ ChatReply, ChatRequest, FieldError };

/// Translates chat requests into one upstream `generateContent` call each.
#[derive(Clone)]
pub struct ChatRelay {
    chat_client: Arc<dyn ChatClient>,
}

impl ChatRelay {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn handle(&self, raw_body: &[u8]) -> Result<ChatReply, RelayError> {
        let body: Value = serde_json::from_slice(raw_body).map_err(|e| {
            RelayError::Validation(
                vec![FieldError::new(Vec::new(), "invalid_json", format!("Malformed JSON: {}", e))]
            )
        })?;
        self.handle_value(&body).await
    }

    pub async fn handle_value(&self, body: &Value) -> Result<ChatReply, RelayError> {
        let request = ChatRequest::from_value(body).map_err(|errors| {
            warn!("Rejected chat request with {} field error(s)", errors.len());
            RelayError::Validation(errors)
        })?;

        let contents = build_contents(&request);
        let response = self.chat_client.generate(&contents).await.map_err(|e| {
            error!("Chat API error: {}", e);
            RelayError::from(e)
        })?;

        let message = match extract_reply_text(&response) {
            Some(text) => text.to_string(),
            None => {
                warn!(
                    "Upstream response from model {} carried no candidate text; using fallback",
                    self.chat_client.get_model()
                );
                FALLBACK_REPLY.to_string()
            }
        };

        Ok(ChatReply { message })
    }
}
