use crate::domain::model::ChatMessage;
use crate::domain::ports::ChatModel;
use crate::utils::error::{DrillError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI 相容的 chat completions 客戶端（預設 Groq）
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleChat {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompatibleChat {
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: GROQ_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        tracing::debug!(
            "🤖 LLM request: model={}, messages={}, max_tokens={}, temp={}",
            self.model,
            messages.len(),
            self.max_tokens,
            self.temperature
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(
            "🤖 LLM response: status={}, {} bytes in {:?}",
            status,
            text.len(),
            start.elapsed()
        );

        if !status.is_success() {
            return Err(DrillError::ExternalServiceError {
                service: "LLM".to_string(),
                status: status.as_u16(),
                message: text,
            });
        }

        let completion: ChatCompletion = serde_json::from_str(&text)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DrillError::ExternalServiceError {
                service: "LLM".to_string(),
                status: status.as_u16(),
                message: "response has no choices[0].message.content".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn chat(server: &MockServer) -> OpenAiCompatibleChat {
        OpenAiCompatibleChat::groq("test-key").with_endpoint(server.url("/openai/v1/chat/completions"))
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .header("Authorization", "Bearer test-key")
                .json_body_partial(r#"{"model": "llama-3.1-8b-instant", "max_tokens": 2048}"#)
                .body_contains(r#""role":"user","content":"hi""#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "hello there"}}]
                }));
        });

        let answer = chat(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(answer, "hello there");
    }

    #[tokio::test]
    async fn test_non_success_status_is_external_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(401).body("invalid api key");
        });

        let err = chat(&server)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        match err {
            DrillError::ExternalServiceError { status, message, .. } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_external_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "choices": [] }));
        });

        let err = chat(&server)
            .complete(&[ChatMessage::system("sys")])
            .await
            .unwrap_err();
        assert!(matches!(err, DrillError::ExternalServiceError { status: 200, .. }));
    }
}
