//! Mock coach backend for tests and offline development

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Result;

use super::CoachBackend;

/// Mock backend returning canned replies
///
/// Replies queued with [`MockBackend::push_reply`] are returned in order;
/// once the queue is empty a generic fallback is used. Requests are
/// recorded for assertion.
#[derive(Clone, Default)]
pub struct MockBackend {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next completion call
    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    /// User prompts seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoachBackend for MockBackend {
    async fn complete(&self, _system: Option<&str>, user: &str) -> Result<String> {
        self.requests.lock().unwrap().push(user.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Tap water + imagination = iced americano. Zero dollars.".to_string());
        Ok(reply)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_come_back_in_order() {
        let mock = MockBackend::new();
        mock.push_reply("first");
        mock.push_reply("second");

        assert_eq!(mock.complete(None, "a").await.unwrap(), "first");
        assert_eq!(mock.complete(None, "b").await.unwrap(), "second");
        // Queue exhausted, fallback reply
        assert!(!mock.complete(None, "c").await.unwrap().is_empty());
        assert_eq!(mock.requests(), vec!["a", "b", "c"]);
    }
}
