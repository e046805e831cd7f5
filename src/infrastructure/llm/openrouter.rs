//! OpenRouter chat-completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::completion::CompletionClient;
use crate::domain::errors::CompletionError;

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const TEMPERATURE: f32 = 0.2;

/// Connection settings for [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Sends prompts to OpenRouter's OpenAI-compatible `chat/completions` endpoint
/// and asks for a JSON object reply.
pub struct OpenRouterClient {
    http: reqwest::Client,
    settings: OpenRouterSettings,
}

impl OpenRouterClient {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] if the HTTP client cannot be built.
    pub fn new(settings: OpenRouterSettings) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self { http, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Value, CompletionError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Completion request rejected");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedReply(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::MalformedReply("reply has no content".to_string()))?;

        parse_object(&content)
    }
}

/// Parses model output that must be a single JSON object.
pub fn parse_object(content: &str) -> Result<Value, CompletionError> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|e| CompletionError::MalformedReply(e.to_string()))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(CompletionError::MalformedReply(
            "expected a JSON object".to_string(),
        ))
    }
}
