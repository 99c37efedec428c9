use async_trait::async_trait;
use serde_json::Value;
use log::{ info, error };

use super::{ ChatClient, GeminiContent, GenerateContentRequest };
use crate::llm::{ LlmConfig, LlmError };

pub struct GeminiChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiChatClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self { http, config }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(reqwest::Client::new(), config.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.completion_model
        )
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn generate(&self, contents: &[GeminiContent]) -> Result<Value, LlmError> {
        let url = self.endpoint();
        info!(
            "GeminiChatClient::generate() → model={} turns={}",
            self.config.completion_model,
            contents.len()
        );

        let payload = GenerateContentRequest { contents: contents.to_vec() };
        let resp = self.http
            .post(&url)
            .query(&[("key", self.config.resolve_api_key())])
            .header("Content-Type", "application/json")
            .json(&payload)
            .send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            error!("Gemini API error ({}): {}", status, body);
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))
    }

    fn get_model(&self) -> String {
        self.config.completion_model.clone()
    }
}
