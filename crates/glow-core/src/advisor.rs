// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The advisor: owns the conversation log and a chat provider, and exposes
//! the two submit paths — free-form questions and routine generation.

use serde_json::json;
use tracing::debug;

use glow_config::Config;
use glow_model::{ChatError, ChatProvider, Message};

use crate::catalog::Product;
use crate::conversation::ConversationLog;
use crate::prompts;

pub struct Advisor {
    provider: Box<dyn ChatProvider>,
    log: ConversationLog,
}

impl Advisor {
    pub fn new(provider: Box<dyn ChatProvider>, system_prompt: &str) -> Self {
        Self { provider, log: ConversationLog::new(system_prompt) }
    }

    /// Build an advisor from configuration: configured provider plus the
    /// built-in system prompt unless overridden.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = glow_model::from_config(&config.model)?;
        let prompt: &str = config
            .advisor
            .system_prompt
            .as_deref()
            .unwrap_or_else(|| prompts::system_prompt());
        Ok(Self::new(provider, prompt))
    }

    /// The full history, system seed first.
    pub fn history(&self) -> &[Message] {
        self.log.messages()
    }

    /// Append the user message and send the full history to the endpoint.
    ///
    /// On success the assistant reply is appended and returned.  On failure
    /// the user message stays in the log and nothing is appended; the error
    /// is terminal for this call only and the user must re-trigger.
    pub async fn ask(&mut self, text: impl Into<String>) -> Result<String, ChatError> {
        self.log.push_user(text);
        debug!(messages = self.log.len(), "submitting conversation");
        let reply = self.provider.send_chat(self.log.messages()).await?;
        self.log.push_assistant(&reply);
        Ok(reply)
    }

    /// Ask for a personalized routine built from the given products.
    ///
    /// Callers are responsible for rejecting an empty product list before
    /// getting here.
    pub async fn generate_routine(&mut self, products: &[Product]) -> Result<String, ChatError> {
        self.ask(routine_request(products)).await
    }
}

/// The routine request message: a fixed instruction followed by the selected
/// products as pretty-printed JSON (name/brand/category/description only —
/// image references mean nothing to the model).
fn routine_request(products: &[Product]) -> String {
    let data: Vec<_> = products
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "brand": p.brand,
                "category": p.category,
                "description": p.description,
            })
        })
        .collect();
    let body = serde_json::to_string_pretty(&data).expect("product summaries serialize");
    format!("Create a personalized beauty routine using these products:\n\n{body}")
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
