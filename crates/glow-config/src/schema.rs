// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier: "openai" (any OpenAI-compatible endpoint) | "mock"
    pub provider: String,
    /// Model name forwarded to the provider API
    pub name: String,
    /// Environment variable that holds the API key (read at runtime)
    pub api_key_env: Option<String>,
    /// Explicit API key; prefer api_key_env in config files to avoid secrets
    /// in version-controlled files
    pub api_key: Option<String>,
    /// Base URL override.  Useful for local proxies or a relay worker that
    /// attaches the real key server-side (in which case leave both key fields
    /// unset — no Authorization header is sent).
    pub base_url: Option<String>,
    /// Maximum tokens to request in a single completion.
    /// `None` omits the field from the request body entirely.
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0–2.0).  `None` omits the field.
    pub temperature: Option<f32>,
    /// Pass-through flag asking the endpoint to augment answers with
    /// server-side web search.  Only honoured by relay deployments that
    /// understand it; hosted OpenAI ignores unknown body fields.
    #[serde(default)]
    pub web_search: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            name: "gpt-4o".into(),
            // api_key_env is intentionally None here; resolve_api_key() falls
            // back to OPENAI_API_KEY for the openai provider.
            api_key_env: None,
            api_key: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            web_search: false,
        }
    }
}

/// Where the product catalog document comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON document of shape `{"products": [...]}`.
    /// `None` uses the bundled catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Location of the key-value store that persists UI state between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one file per key.
    /// `None` defaults to `$XDG_DATA_HOME/glow/store`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// System prompt override; leave None to use the built-in advisor prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
