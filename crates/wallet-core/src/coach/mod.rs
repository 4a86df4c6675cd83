//! Remote completion backend for the chat coach
//!
//! The coach is presentation glue over a hosted chat-completions API: a
//! persona prompt is rendered with ledger statistics and forwarded, the
//! free-text reply comes back as the coach's message.
//!
//! # Architecture
//!
//! - `CoachBackend` trait: the interface a completion provider implements
//! - `CoachClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `CompletionBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `WALLET_COACH_BACKEND`: Backend to use (completion, mock).
//!   Default: completion
//! - `WALLET_COMPLETION_HOST`: Completion server URL (required for the
//!   completion backend)
//! - `WALLET_COMPLETION_MODEL`: Model name (default: gpt-3.5-turbo)
//! - `WALLET_COMPLETION_API_KEY`: Bearer token if the host requires one

mod completion;
mod mock;

pub use completion::CompletionBackend;
pub use mock::MockBackend;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// Trait defining the interface for coach completion backends
#[async_trait]
pub trait CoachBackend: Send + Sync {
    /// Send a rendered persona prompt, get the coach's reply
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Human-readable backend name for logging
    fn name(&self) -> &'static str;
}

/// Concrete coach client with compile-time dispatch
///
/// Wraps the trait object pattern in an enum so callers get Clone and
/// match-based dispatch without boxing.
#[derive(Clone)]
pub enum CoachClient {
    Completion(CompletionBackend),
    Mock(MockBackend),
}

impl CoachClient {
    /// Create from environment variables
    ///
    /// Returns `None` when no backend is configured; the chat feature is
    /// then unavailable but everything else works offline.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("WALLET_COACH_BACKEND")
            .unwrap_or_else(|_| "completion".to_string());

        match backend.as_str() {
            "mock" => Some(Self::Mock(MockBackend::new())),
            _ => {
                let client = CompletionBackend::from_env()?;
                debug!(host = %client.base_url(), "coach completion backend configured");
                Some(Self::Completion(client))
            }
        }
    }
}

#[async_trait]
impl CoachBackend for CoachClient {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        match self {
            Self::Completion(backend) => backend.complete(system, user).await,
            Self::Mock(backend) => backend.complete(system, user).await,
        }
    }

    async fn health_check(&self) -> Result<()> {
        match self {
            Self::Completion(backend) => backend.health_check().await,
            Self::Mock(backend) => backend.health_check().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Completion(backend) => backend.name(),
            Self::Mock(backend) => backend.name(),
        }
    }
}
