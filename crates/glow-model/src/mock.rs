// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{ChatError, Message, Role};

/// Deterministic mock provider for tests.  Echoes the last user message
/// back as the assistant response.
#[derive(Default)]
pub struct MockProvider;

#[async_trait]
impl crate::ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }
    fn model_name(&self) -> &str {
        "mock-model"
    }

    async fn send_chat(&self, history: &[Message]) -> Result<String, ChatError> {
        let reply = history
            .iter()
            .rev()
            .find(|m| matches!(m.role, Role::User))
            .map(|m| m.content.as_str())
            .unwrap_or("[no input]");
        Ok(format!("MOCK: {reply}"))
    }
}

/// A pre-scripted mock provider.  Each call to `send_chat` pops the next
/// reply from the front of the queue.  This lets tests specify exact
/// response sequences — including failures — without network access.
pub struct ScriptedMockProvider {
    replies: Arc<Mutex<Vec<Result<String, ChatError>>>>,
    /// The last history seen by this provider.
    /// Written on each `send_chat` call so tests can inspect what was sent.
    pub last_history: Arc<Mutex<Option<Vec<Message>>>>,
}

impl ScriptedMockProvider {
    /// Build a provider from an ordered list of per-call outcomes.
    pub fn new(replies: Vec<Result<String, ChatError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies)),
            last_history: Arc::new(Mutex::new(None)),
        }
    }

    /// Convenience: provider that always returns the same text reply.
    pub fn always_text(reply: impl Into<String>) -> Self {
        Self::new(vec![Ok(reply.into())])
    }

    /// Convenience: provider whose single call fails the shape check.
    pub fn always_malformed() -> Self {
        Self::new(vec![Err(ChatError::MalformedResponse("{}".into()))])
    }
}

#[async_trait]
impl crate::ChatProvider for ScriptedMockProvider {
    fn name(&self) -> &str {
        "scripted-mock"
    }
    fn model_name(&self) -> &str {
        "scripted-mock-model"
    }

    async fn send_chat(&self, history: &[Message]) -> Result<String, ChatError> {
        *self.last_history.lock().unwrap() = Some(history.to_vec());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default fallback when all scripts are consumed
            Ok("[no more scripts]".into())
        } else {
            replies.remove(0)
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
