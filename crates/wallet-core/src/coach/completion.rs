//! OpenAI-compatible completion backend
//!
//! Works with any server implementing the `/v1/chat/completions` API, which
//! covers the hosted endpoints the original client talked to as well as
//! local servers (vLLM, LocalAI, llama-server).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::CoachBackend;

/// Completion backend over an OpenAI-compatible chat endpoint
#[derive(Clone)]
pub struct CompletionBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl CompletionBackend {
    /// Create a new completion backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    /// Create with an API key
    pub fn with_api_key(base_url: &str, model: &str, api_key: &str) -> Self {
        let mut backend = Self::new(base_url, model);
        backend.api_key = Some(api_key.to_string());
        backend
    }

    /// Create from environment variables
    ///
    /// Required: `WALLET_COMPLETION_HOST`
    /// Optional: `WALLET_COMPLETION_MODEL` (default: gpt-3.5-turbo)
    /// Optional: `WALLET_COMPLETION_API_KEY`
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("WALLET_COMPLETION_HOST").ok()?;
        let model = std::env::var("WALLET_COMPLETION_MODEL")
            .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let api_key = std::env::var("WALLET_COMPLETION_API_KEY").ok();

        let mut backend = Self::new(&host, &model);
        backend.api_key = api_key;
        Some(backend)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            // Persona chat wants variety, not deterministic classification
            temperature: Some(0.7),
            max_tokens: None,
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Coach(format!(
                "Completion API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Coach("No choices in completion response".into()))
    }
}

#[async_trait]
impl CoachBackend for CompletionBackend {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user.to_string(),
        });

        debug!(model = %self.model, "sending coach completion request");
        let reply = self.chat_completion(messages).await?;
        Ok(reply.trim().to_string())
    }

    async fn health_check(&self) -> Result<()> {
        let mut req_builder = self
            .http_client
            .get(format!("{}/v1/models", self.base_url));

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Coach(format!(
                "Completion host unhealthy: {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &'static str {
        "completion"
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockCompletionServer;

    #[tokio::test]
    async fn completes_against_mock_server() {
        let server = MockCompletionServer::start().await;
        let backend = CompletionBackend::new(&server.url(), "test-model");

        let reply = backend
            .complete(Some("You are Catty."), "I want to buy ice cream")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn health_check_against_mock_server() {
        let server = MockCompletionServer::start().await;
        let backend = CompletionBackend::new(&server.url(), "test-model");
        backend.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        // Port 1 is never listening
        let backend = CompletionBackend::new("http://127.0.0.1:1", "test-model");
        assert!(backend.complete(None, "hi").await.is_err());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let backend = CompletionBackend::new("http://localhost:8080/", "m");
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }
}
