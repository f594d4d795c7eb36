//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelSettings;
use crate::error::GenerationError;

use super::prompt::GenerationRequest;

/// Turns a prompt into candidate text.
///
/// This abstraction allows mocking the HTTP service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends one request per call to `{base_url}/chat/completions`. No retries.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    settings: ModelSettings,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, settings: ModelSettings) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.task,
                },
                ChatMessage {
                    role: "user",
                    content: &request.input,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
        };

        debug!(
            "Requesting completion from {} (model {})",
            self.endpoint(),
            self.settings.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::NoCompletions)?;

        let content = choice.message.content.unwrap_or_default();
        debug!("Received completion ({} chars)", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut settings = ModelSettings::default();
        settings.base_url = "http://localhost:1234/v1/".to_string();
        let client = OpenAiClient::new("key", settings);
        assert_eq!(client.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_request_serializes_three_messages_in_order() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "task" },
                ChatMessage { role: "user", content: "input" },
            ],
            max_tokens: 10,
            temperature: 0.0,
            top_p: 1.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "task");
        assert_eq!(json["messages"][2]["content"], "input");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_response_without_choices_parses_empty() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
