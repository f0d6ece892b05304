// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for storeline-rpc.

use serde_json::Value;
use thiserror::Error;

/// Result type using RpcError.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Errors that can occur when talking to the ERP server.
///
/// The taxonomy keeps three failure sources distinct: the server said no
/// (`Server`), the server could not be reached ([`Transport`](Self::Transport)),
/// and credentials were not accepted ([`Auth`](Self::Auth)) — so callers can
/// pick a recovery policy without string-matching messages. The client never
/// retries and never swallows an error.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Credentials rejected or the authentication endpoint failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The server returned a well-formed envelope with an error object.
    /// Code, message and detail are propagated verbatim.
    #[error("server error [{code}]: {message}")]
    Server {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// The HTTP exchange itself failed (network, timeout, non-2xx status,
    /// malformed response body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response envelope violated the protocol shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Serialization/deserialization error on the request side.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        RpcError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for RpcError {
    fn from(err: url::ParseError) -> Self {
        RpcError::Config(err.to_string())
    }
}
