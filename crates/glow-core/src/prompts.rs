// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT

/// Built-in system prompt seeding every new conversation.
///
/// Can be overridden via `advisor.system_prompt` in the config file.
pub fn system_prompt() -> &'static str {
    "You are a professional beauty advisor. Help users with skincare, \
     haircare, makeup, fragrance, and beauty routines. Provide helpful, \
     accurate advice based on the conversation context. Only answer \
     questions related to beauty, skincare, haircare, makeup, and wellness \
     topics."
}
