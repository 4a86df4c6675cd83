//! Test utilities for wallet-core
//!
//! This module provides testing infrastructure including a mock
//! OpenAI-compatible completion server usable for development and
//! integration tests.

use axum::{
    extract::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock completion server for testing and development
///
/// Serves `/v1/chat/completions` and `/v1/models` on an ephemeral port
/// and answers with short canned coach replies.
pub struct MockCompletionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_completions));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Models endpoint (health check)
async fn handle_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        object: "list".to_string(),
        data: vec![ModelInfo {
            id: "test-model".to_string(),
            object: "model".to_string(),
            owned_by: "mock".to_string(),
        }],
    })
}

/// Chat completions endpoint
async fn handle_chat_completions(
    Json(request): Json<ChatCompletionRequest>,
) -> Json<ChatCompletionResponse> {
    let user_message = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
        .unwrap_or("");
    let system_prompt = request
        .messages
        .iter()
        .find(|m| m.role == "system")
        .map(|m| m.content.as_str())
        .unwrap_or("");

    let reply = coach_reply_mock(system_prompt, user_message);

    Json(ChatCompletionResponse {
        object: "chat.completion".to_string(),
        model: request.model,
        choices: vec![ChatChoice {
            index: 0,
            message: ChatResponseMessage {
                role: "assistant".to_string(),
                content: reply,
            },
            finish_reason: "stop".to_string(),
        }],
    })
}

/// Canned coach replies keyed on message content
///
/// Persona is inferred from the system prompt so tests can assert the
/// right prompt section was forwarded.
fn coach_reply_mock(system_prompt: &str, user_message: &str) -> String {
    let wants_to_buy = {
        let m = user_message.to_lowercase();
        m.contains("buy") || m.contains("want") || m.contains("purchase")
    };

    if system_prompt.contains("future self") {
        if wants_to_buy {
            "Put it back. In 2034 I still remember that charge.".to_string()
        } else {
            "Good. Every dollar you keep buys me a quieter retirement.".to_string()
        }
    } else if wants_to_buy {
        "Meow... do your savings a favor and sleep on it. 🐱".to_string()
    } else {
        "Purr. Your wallet and I are both comfortable today.".to_string()
    }
}

// Request/Response types for the mock server

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<RequestMessage>,
    #[allow(dead_code)]
    #[serde(default)]
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct RequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionResponse {
    object: String,
    model: String,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Serialize)]
struct ChatChoice {
    index: u32,
    message: ChatResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Serialize)]
struct ChatResponseMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    object: String,
    data: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    id: String,
    object: String,
    owned_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::{CoachBackend, CompletionBackend};

    #[tokio::test]
    async fn mock_server_health_check() {
        let server = MockCompletionServer::start().await;
        let client = CompletionBackend::new(&server.url(), "test-model");

        client.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn mock_server_discourages_purchases() {
        let server = MockCompletionServer::start().await;
        let client = CompletionBackend::new(&server.url(), "test-model");

        let reply = client
            .complete(Some("You are Catty."), "I want to buy a new keyboard")
            .await
            .unwrap();
        assert!(reply.contains("sleep on it"));
    }

    #[tokio::test]
    async fn mock_server_switches_persona_on_system_prompt() {
        let server = MockCompletionServer::start().await;
        let client = CompletionBackend::new(&server.url(), "test-model");

        let reply = client
            .complete(
                Some("You are the user's future self from ten years ahead."),
                "Should I buy this?",
            )
            .await
            .unwrap();
        assert!(reply.contains("2034"));
    }

    #[tokio::test]
    async fn mock_server_praise_without_purchase_intent() {
        let server = MockCompletionServer::start().await;
        let client = CompletionBackend::new(&server.url(), "test-model");

        let reply = client
            .complete(Some("You are Catty."), "I skipped the coffee run today")
            .await
            .unwrap();
        assert!(reply.contains("Purr"));
    }
}
