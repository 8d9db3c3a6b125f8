// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use glow_model::{Message, Role};

/// Append-only conversation history for one session.
///
/// Seeded with a fixed system message that is never removed.  There is no
/// truncation, summarization, or cap: the full history goes out with every
/// request, so the payload grows for the lifetime of the session.  Nothing is
/// persisted — a new session starts from the seed again.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self { messages: vec![Message::system(system_prompt)] }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// The full history, system seed first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed user/assistant exchanges.
    pub fn turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::Assistant).count()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_holds_only_the_system_seed() {
        let log = ConversationLog::new("seed");
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].role, Role::System);
        assert_eq!(log.messages()[0].content, "seed");
    }

    #[test]
    fn appends_keep_order() {
        let mut log = ConversationLog::new("seed");
        log.push_user("q1");
        log.push_assistant("a1");
        log.push_user("q2");
        let roles: Vec<Role> = log.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn seed_survives_any_number_of_appends() {
        let mut log = ConversationLog::new("seed");
        for i in 0..50 {
            log.push_user(format!("q{i}"));
            log.push_assistant(format!("a{i}"));
        }
        assert_eq!(log.messages()[0].content, "seed");
        assert_eq!(log.len(), 101);
    }

    #[test]
    fn turns_counts_assistant_replies() {
        let mut log = ConversationLog::new("seed");
        assert_eq!(log.turns(), 0);
        log.push_user("q");
        log.push_assistant("a");
        assert_eq!(log.turns(), 1);
    }
}
