// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! OpenAI-compatible chat completions driver.
//!
//! Speaks the plain (non-streaming) `/chat/completions` wire format: the full
//! message history is POSTed on every call and the first choice's message
//! content is returned.  The same driver covers hosted OpenAI and relay
//! deployments that hold the API key server-side (construct with no key — no
//! `Authorization` header is sent).

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{ChatError, Message};

/// OpenAI chat-completions driver.
pub struct OpenAiProvider {
    model: String,
    /// Pre-resolved API key.  `None` sends no auth header (relay deployments).
    api_key: Option<String>,
    /// Full chat completions URL, e.g. `https://api.openai.com/v1/chat/completions`.
    chat_url: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    /// Pass-through flag asking the endpoint for server-side web augmentation.
    web_search: bool,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        web_search: bool,
    ) -> Self {
        let base = base_url.as_deref().unwrap_or("https://api.openai.com/v1");
        let base = base.trim_end_matches('/');
        Self {
            model,
            api_key,
            chat_url: format!("{base}/chat/completions"),
            max_tokens,
            temperature,
            web_search,
            client: reqwest::Client::new(),
        }
    }

    /// Build the JSON request body for one call.
    ///
    /// The baseline body is exactly `{model, messages}`; tuning fields and
    /// the `web_search` flag are attached only when configured.  Never send
    /// null-valued parameters — some endpoints reject them.
    fn build_body(&self, history: &[Message]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": history,
        });
        if let Some(mt) = self.max_tokens {
            body["max_tokens"] = json!(mt);
        }
        if let Some(t) = self.temperature {
            body["temperature"] = json!(t);
        }
        if self.web_search {
            body["web_search"] = json!(true);
        }
        body
    }
}

#[async_trait]
impl crate::ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn send_chat(&self, history: &[Message]) -> Result<String, ChatError> {
        let body = self.build_body(history);

        debug!(
            model = %self.model,
            message_count = history.len(),
            "sending completion request"
        );

        let mut http_req = self.client.post(&self.chat_url).json(&body);
        if let Some(key) = &self.api_key {
            http_req = http_req.bearer_auth(key);
        }

        let resp = http_req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Api { provider: "openai".into(), status, body });
        }

        let payload: Value = resp.json().await?;
        extract_reply(&payload)
    }
}

/// Shape-check a completion response and pull out the first choice's text.
///
/// Expected shape: `{"choices": [{"message": {"content": "..."}}]}`.
/// Anything else is a [`ChatError::MalformedResponse`] — the caller shows a
/// fixed fallback message rather than crashing.
pub(crate) fn extract_reply(payload: &Value) -> Result<String, ChatError> {
    payload["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            let preview: String = payload.to_string().chars().take(200).collect();
            ChatError::MalformedResponse(preview)
        })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
