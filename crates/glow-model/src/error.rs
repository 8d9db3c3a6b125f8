// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use thiserror::Error;

/// Failure taxonomy for one chat completion call.
///
/// Every variant is terminal for the triggering request only — callers surface
/// a message and wait for the user to re-trigger the action; nothing retries.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never produced an HTTP response (DNS, TLS, connect, body).
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{provider} error {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    /// The response parsed as JSON but did not have the expected
    /// `choices[0].message.content` shape.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}
