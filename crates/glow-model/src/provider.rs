use async_trait::async_trait;

use crate::{ChatError, Message};

/// Narrow client interface to a chat completion endpoint.
///
/// The full conversation history goes in, the assistant's reply text comes
/// out.  Everything network-shaped hides behind this trait so the core logic
/// is testable with a mock substituted for the wire.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name for status display.
    fn name(&self) -> &str;

    /// Model identifier as reported to users.
    fn model_name(&self) -> &str;

    /// Send the full history and return the assistant reply.
    async fn send_chat(&self, history: &[Message]) -> Result<String, ChatError>;
}
