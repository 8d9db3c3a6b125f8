mod types;
mod error;
mod provider;
mod openai;
mod mock;

pub use types::{Message, Role};
pub use error::ChatError;
pub use provider::ChatProvider;
pub use openai::OpenAiProvider;
pub use mock::{MockProvider, ScriptedMockProvider};

use anyhow::bail;
use glow_config::ModelConfig;

/// Construct a boxed [`ChatProvider`] from configuration.
///
/// Provider selection:
/// - `"openai"` → [`OpenAiProvider`] (hosted OpenAI or any compatible endpoint)
/// - `"mock"` → [`MockProvider`] (echo-back, for tests and offline runs)
pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Box<dyn ChatProvider>> {
    let key = resolve_api_key(cfg);
    match cfg.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiProvider::new(
            cfg.name.clone(),
            key,
            cfg.base_url.clone(),
            cfg.max_tokens,
            cfg.temperature,
            cfg.web_search,
        ))),
        "mock" => Ok(Box::new(MockProvider)),
        other => bail!("unknown model provider: {other}"),
    }
}

fn resolve_api_key(cfg: &ModelConfig) -> Option<String> {
    if let Some(k) = &cfg.api_key {
        return Some(k.clone());
    }
    if let Some(env) = &cfg.api_key_env {
        return std::env::var(env).ok();
    }
    // Canonical env var for the default provider.  A relay base_url with no
    // key at all is also valid — the relay holds the key server-side.
    if cfg.provider == "openai" {
        return std::env::var("OPENAI_API_KEY").ok();
    }
    None
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
